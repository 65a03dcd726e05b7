use anyhow::Result;
use roofquote::footprint::{closest_building, OverpassClient};
use roofquote::{FootprintSource, Settings};

use super::parse_coordinate;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FootprintArgs) -> Result<()> {
    let settings = Settings::from_env();
    let center = parse_coordinate(&args.at)?;
    let radius = args.radius.unwrap_or(settings.search_radius_m);

    let client = OverpassClient::from_settings(&settings)?;
    let buildings = client.fetch_buildings(center, radius)?;
    if buildings.is_empty() {
        println!("no buildings within {radius} m of {:.6},{:.6}", center.latitude, center.longitude);
        return Ok(());
    }

    let closest = closest_building(buildings.iter().cloned(), center).map(|b| b.id);
    for b in &buildings {
        let marker = if Some(&b.id) == closest.as_ref() { "*" } else { " " };
        let c = b.centroid();
        println!("{marker} {:<16} {:>8.0} ft²  {:>3} vertices  centroid {:.6},{:.6}",
            b.id, b.area_square_feet(), b.polygon.len(), c.latitude, c.longitude);
    }
    Ok(())
}
