use std::cell::Cell;
use std::collections::HashMap;

use roofquote::config::{BrandingConfig, PricingConfig};
use roofquote::estimate::estimate;
use roofquote::flow::{AddressForm, ContactDetails, LookupStatus};
use roofquote::footprint::{FALLBACK_FOOTPRINT_ID, FALLBACK_ROOF_AREA_SQFT};
use roofquote::geocode::GeocodedAddress;
use roofquote::geom::METERS_PER_DEGREE_LAT;
use roofquote::surface::MapType;
use roofquote::*;

const AMPHITHEATRE: &str = "1600 Amphitheatre Parkway, Mountain View, CA";
const MAIN_STREET: &str = "742 Evergreen Terrace, Springfield";

struct FakeGeocoder {
    known: HashMap<&'static str, GeocodedAddress>,
    calls: Cell<usize>,
}

impl FakeGeocoder {
    fn new() -> Self {
        let mut known = HashMap::new();
        known.insert(AMPHITHEATRE, GeocodedAddress {
            location: Coordinate::new(37.4224764, -122.0842499).unwrap(),
            formatted_address: "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA".into(),
        });
        known.insert(MAIN_STREET, GeocodedAddress {
            location: Coordinate::new(40.0, -75.0).unwrap(),
            formatted_address: "742 Evergreen Terrace, Springfield, USA".into(),
        });
        Self { known, calls: Cell::new(0) }
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        self.known.get(address).cloned().ok_or_else(|| GeocodeError::NotFound(address.to_string()))
    }
}

/// Returns a 20 m x 10 m building near (40, -75), nothing elsewhere, or fails on demand.
struct FakeFootprints {
    fail: Cell<bool>,
}

impl FakeFootprints {
    fn new() -> Self { Self { fail: Cell::new(false) } }
}

fn rectangle(lat: f64, lng: f64, w: f64, h: f64) -> Vec<Coordinate> {
    let d_lat = h / METERS_PER_DEGREE_LAT;
    let d_lng = w / (METERS_PER_DEGREE_LAT * (lat + d_lat / 2.0).to_radians().cos());
    vec![
        Coordinate { latitude: lat, longitude: lng },
        Coordinate { latitude: lat, longitude: lng + d_lng },
        Coordinate { latitude: lat + d_lat, longitude: lng + d_lng },
        Coordinate { latitude: lat + d_lat, longitude: lng },
    ]
}

impl FootprintSource for FakeFootprints {
    fn fetch_buildings(&self, center: Coordinate, _: f64) -> Result<Vec<BuildingFootprint>, FootprintLookupError> {
        if self.fail.get() {
            return Err(FootprintLookupError::Request("503 Service Unavailable".into()));
        }
        if center.latitude != 40.0 {
            return Ok(vec![]);
        }
        let near = rectangle(40.00001, -75.00001, 20.0, 10.0);
        let far = rectangle(40.0004, -75.0004, 30.0, 30.0);
        Ok([("way/1", far), ("way/2", near)]
            .into_iter()
            .map(|(id, points)| BuildingFootprint {
                id: id.into(),
                area_square_meters: polygon_area_square_meters(&points),
                polygon: Polygon::new(points).unwrap(),
            })
            .collect())
    }
}

type Flow<'a> = WidgetFlow<&'a FakeGeocoder, &'a FakeFootprints, HeadlessSurface>;

fn flow<'a>(geocoder: &'a FakeGeocoder, footprints: &'a FakeFootprints) -> Flow<'a> {
    WidgetFlow::new(&StaticConfig::default(), &Settings::default(), geocoder, footprints, HeadlessSurface::new())
}

fn submit(flow: &mut Flow<'_>, address: &str) -> Result<(), FlowError> {
    flow.set_address(AddressForm::from_line(address))?;
    flow.submit_address().map(|_| ())
}

#[test]
fn address_without_buildings_gets_fallback_square() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    submit(&mut flow, AMPHITHEATRE).unwrap();

    assert_eq!(flow.step(), Step::PropertyConfirmation);
    assert_eq!(flow.lookup_status(), &LookupStatus::Ready);

    let property = flow.property().unwrap();
    assert_eq!(property.footprint.id, FALLBACK_FOOTPRINT_ID);
    assert_eq!(property.footprint.polygon.len(), 4);
    assert_eq!(flow.roof_area_square_feet(), Some(FALLBACK_ROOF_AREA_SQFT));

    let view = flow.editor().surface().view().unwrap();
    assert_eq!(view.center, property.geocoded.location);
    assert_eq!(view.map_type, MapType::Satellite);
    assert_eq!(view.zoom, 20);
}

#[test]
fn full_session_produces_lead() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    submit(&mut flow, MAIN_STREET).unwrap();

    let property = flow.property().unwrap();
    assert_eq!(property.footprint.id, "way/2");
    let area = flow.roof_area_square_feet().unwrap();
    assert!((area - 200.0 * 10.7639).abs() / area < 0.01, "area = {area}");

    // nudge one corner outwards and save
    let handle = flow.editor().handle().unwrap();
    let corner = flow.editor().current_path().unwrap()[2];
    flow.editor_mut().start_editing().unwrap();
    flow.editor_mut().surface_mut().move_vertex(handle, 2, corner.offset(0.00002, 0.00002)).unwrap();
    let edited = flow.roof_area_square_feet().unwrap();
    assert!(edited > area);
    flow.editor_mut().save_changes().unwrap();

    flow.select_pitch(Pitch::Medium).unwrap();
    assert_eq!(flow.confirm_property().unwrap(), Step::Estimate);

    flow.select_tier(TierKey::Better).unwrap();
    flow.set_add_ons(true, true);
    let quote = flow.quote().unwrap();
    assert_eq!(quote, estimate(edited, Pitch::Medium, &PricingConfig::default().better));
    let cards = flow.tier_cards();
    assert_eq!(cards.len(), 3);
    assert!(cards[1].selected && cards[1].popular);

    assert_eq!(flow.proceed_to_contact().unwrap(), Step::ContactCapture);
    let contact = ContactDetails { phone: Some("555-0100".into()), ..ContactDetails::new("Marge", "Simpson", "marge@example.com") };
    let lead = flow.submit_contact(contact).unwrap().clone();

    assert_eq!(flow.step(), Step::Complete);
    assert_eq!(lead.footprint_id, "way/2");
    assert_eq!(lead.entered_address, MAIN_STREET);
    assert_eq!(lead.roof_area_square_feet, edited);
    assert_eq!(lead.roof_squares, edited / 100.0);
    assert_eq!(lead.tier, TierKey::Better);
    assert_eq!(lead.price_per_square_foot, 8.75);
    assert_eq!(lead.total_price, quote.total_price);
    assert_eq!(lead.breakdown.permit, 350.0);
    assert_eq!(lead.breakdown.grand_total, quote.total_price + lead.breakdown.removal + 350.0);
    assert_eq!(lead.roof_polygon.points(), flow.editor().current_path().unwrap().as_slice());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lead.json");
    write_json_atomic(&path, &lead, false).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(serde_json::from_str::<LeadBundle>(&text).unwrap(), lead);
}

#[test]
fn lookup_failure_is_an_error_not_a_fallback() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    footprints.fail.set(true);

    let err = submit(&mut flow, MAIN_STREET).unwrap_err();
    assert!(matches!(err, FlowError::FootprintLookup(FootprintLookupError::Request(_))));
    assert_eq!(flow.step(), Step::AddressEntry);
    assert_eq!(flow.lookup_status().error(), Some(&err));
    assert!(flow.property().is_none());
    assert!(!flow.editor().has_polygon());

    // resubmitting retries
    footprints.fail.set(false);
    flow.submit_address().unwrap();
    assert_eq!(flow.property().unwrap().footprint.id, "way/2");
    assert_eq!(geocoder.calls.get(), 2);
}

#[test]
fn unknown_address_surfaces_geocode_error() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);

    let err = submit(&mut flow, "1 Nowhere Lane, Atlantis").unwrap_err();
    assert!(matches!(err, FlowError::Geocode(GeocodeError::NotFound(_))));
    assert_eq!(flow.step(), Step::AddressEntry);
}

#[test]
fn short_address_is_rejected_before_lookup() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    flow.set_address(AddressForm::from_line("1 Main")).unwrap();

    assert!(!flow.can_submit());
    assert_eq!(flow.submit_address().unwrap_err(), FlowError::AddressTooShort(6));
    assert_eq!(geocoder.calls.get(), 0);
}

#[test]
fn loading_blocks_progress() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    assert_eq!(flow.complete_lookup().unwrap_err(), FlowError::NoLookupPending);

    flow.set_address(AddressForm::from_line(MAIN_STREET)).unwrap();
    assert_eq!(flow.start_lookup().unwrap(), MAIN_STREET);
    assert!(flow.lookup_status().is_loading());
    assert_eq!(flow.start_lookup().unwrap_err(), FlowError::LookupInProgress);
    assert_eq!(flow.set_address(AddressForm::default()).unwrap_err(), FlowError::LookupInProgress);
    assert!(!flow.can_submit());

    flow.complete_lookup().unwrap();
    assert_eq!(flow.step(), Step::PropertyConfirmation);
}

#[test]
fn estimate_requires_saved_outline_and_pitch() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    submit(&mut flow, MAIN_STREET).unwrap();

    assert_eq!(flow.confirm_property().unwrap_err(), FlowError::PitchNotSelected);
    flow.select_pitch(Pitch::Steep).unwrap();

    flow.editor_mut().start_editing().unwrap();
    assert_eq!(flow.confirm_property().unwrap_err(), FlowError::PolygonNotFinalized);
    flow.editor_mut().cancel_changes().unwrap();
    flow.confirm_property().unwrap();

    assert!(matches!(flow.submit_contact(ContactDetails::default()), Err(FlowError::WrongStep { .. })));
    assert_eq!(flow.proceed_to_contact().unwrap_err(), FlowError::TierNotSelected);
}

#[test]
fn back_is_linear_and_new_address_replaces_overlay() {
    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    assert_eq!(flow.back(), Step::AddressEntry);

    submit(&mut flow, MAIN_STREET).unwrap();
    flow.select_pitch(Pitch::Flat).unwrap();
    flow.confirm_property().unwrap();
    assert_eq!(flow.back(), Step::PropertyConfirmation);
    assert_eq!(flow.back(), Step::AddressEntry);
    assert_eq!(flow.lookup_status(), &LookupStatus::Idle);

    submit(&mut flow, AMPHITHEATRE).unwrap();
    let surface = flow.editor().surface();
    assert_eq!(surface.overlay_count(), 1);
    assert_eq!(surface.listener_count(), 1);
    assert!(flow.pitch().is_none());
    assert!(flow.property().unwrap().footprint.is_fallback());

    flow.restart();
    assert_eq!(flow.step(), Step::AddressEntry);
    assert_eq!(flow.editor().surface().overlay_count(), 0);
}

#[test]
fn contractor_config_is_snapshotted() {
    let mut pricing = PricingConfig::default();
    pricing.best.price_per_square_foot = 15.0;
    let branding = BrandingConfig { company_name: "Acme Roofing".into(), ..BrandingConfig::default() };
    let config = StaticConfig::new(pricing, branding).unwrap();

    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = WidgetFlow::new(&config, &Settings::default(), &geocoder, &footprints, HeadlessSurface::new());
    drop(config);

    submit(&mut flow, AMPHITHEATRE).unwrap();
    flow.select_pitch(Pitch::Flat).unwrap();
    flow.confirm_property().unwrap();
    flow.select_tier(TierKey::Best).unwrap();

    assert_eq!(flow.quote().unwrap().total_price, 1800.0 * 15.0);
    assert_eq!(flow.branding().company_name, "Acme Roofing");
}

#[test]
fn area_listener_tracks_edits() {
    use std::rc::Rc;

    let (geocoder, footprints) = (FakeGeocoder::new(), FakeFootprints::new());
    let mut flow = flow(&geocoder, &footprints);
    let last = Rc::new(Cell::new(0.0));
    let sink = Rc::clone(&last);
    flow.on_area_change(move |area| sink.set(area));

    submit(&mut flow, AMPHITHEATRE).unwrap();
    assert_eq!(last.get(), FALLBACK_ROOF_AREA_SQFT);

    let handle = flow.editor().handle().unwrap();
    flow.editor_mut().start_editing().unwrap();
    flow.editor_mut().surface_mut().remove_vertex(handle, 3).unwrap();
    assert!(last.get() > 0.0 && last.get() != FALLBACK_ROOF_AREA_SQFT);
    assert_eq!(flow.roof_area_square_feet(), Some(last.get()));
}
