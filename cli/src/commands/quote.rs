use anyhow::{bail, Context, Result};
use roofquote::flow::{AddressForm, ContactDetails};
use roofquote::footprint::OverpassClient;
use roofquote::geocode::{GeocodedAddress, GoogleGeocoder};
use roofquote::geom::bounds_center;
use roofquote::surface::{load_maps, static_map_url, MapView, OverlayStyle};
use roofquote::{
    write_json_atomic, Coordinate, GeocodeError, Geocoder, HeadlessSurface, Settings, WidgetFlow,
};
use tracing::warn;

use super::{load_config, parse_coordinate};

/// Geocoder that answers every address with one fixed point.
struct FixedPoint(Coordinate);

impl Geocoder for FixedPoint {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> {
        Ok(GeocodedAddress { location: self.0, formatted_address: address.to_string() })
    }
}

/// Address line standing in for a bare coordinate; always long enough to submit.
fn address_line(point: Coordinate) -> String {
    format!("{:.6}, {:.6}", point.latitude, point.longitude)
}

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::QuoteArgs) -> Result<()> {
    let settings = Settings::from_env();
    let config = load_config(cli)?;

    let (geocoder, address): (Box<dyn Geocoder>, String) = match (&args.at, &args.address) {
        (Some(at), address) => {
            let point = parse_coordinate(at)?;
            (Box::new(FixedPoint(point)), address.clone().unwrap_or_else(|| address_line(point)))
        }
        (None, Some(address)) => (Box::new(GoogleGeocoder::from_settings(&settings)?), address.clone()),
        (None, None) => bail!("give an address or --at lat,lng"),
    };

    let runtime = load_maps(&settings)
        .inspect_err(|e| warn!("[maps] {e}; measuring with the planar model"))
        .ok();
    let surface = match &runtime {
        Some(runtime) => HeadlessSurface::with_runtime(runtime),
        None => HeadlessSurface::new(),
    };
    let footprints = OverpassClient::from_settings(&settings)?;
    let mut flow = WidgetFlow::new(&config, &settings, geocoder, footprints, surface);

    flow.set_address(AddressForm::from_line(address))?;
    let property = flow.submit_address()?;
    println!("address:   {}", property.geocoded.formatted_address);
    println!("footprint: {}", property.footprint.id);

    flow.select_pitch(args.pitch)?;
    flow.confirm_property()?;
    flow.select_tier(args.tier)?;
    flow.set_add_ons(args.removal, args.permit);

    let quote = flow.quote().context("no estimate available")?;
    println!("area:      {:.0} ft² ({:.1} squares)", quote.roof_area_square_feet, quote.roof_squares());
    for card in flow.tier_cards() {
        let marker = if card.selected { ">" } else { " " };
        println!("{marker} {:<24} {:>10}", card.display_name, card.formatted_price);
    }
    if let Some(b) = flow.breakdown().filter(|b| b.grand_total != b.roofing) {
        println!("  removal {:.0}, permit {:.0}, total {:.0}", b.removal, b.permit, b.grand_total);
    }

    if let (Some(runtime), Some(view), Ok(path)) =
        (&runtime, flow.editor().surface().view(), flow.editor().current_path()) {
        let view = MapView { center: bounds_center(&path).unwrap_or(view.center), ..*view };
        println!("map:       {}", static_map_url(runtime, &view, &path, OverlayStyle::Confirmed)?);
    }

    let (Some(first), Some(last), Some(email)) = (&args.first_name, &args.last_name, &args.email) else {
        if args.output.is_some() {
            bail!("--output needs --first-name, --last-name and --email");
        }
        return Ok(());
    };

    flow.proceed_to_contact()?;
    let contact = ContactDetails { phone: args.phone.clone(), ..ContactDetails::new(first, last, email) };
    let lead = flow.submit_contact(contact)?;

    match &args.output {
        Some(path) => {
            write_json_atomic(path, lead, args.force)?;
            println!("lead:      {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(lead)?),
    }
    Ok(())
}
