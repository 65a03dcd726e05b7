use geo::{Area, ChamberlainDuquetteArea};
use serde::{Deserialize, Serialize};

use super::coord::{to_geo_polygon, Coordinate};

/// Approximate length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Square feet in one square meter.
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.7639;

/// Square feet in one roofing "square".
pub const SQUARE_FEET_PER_ROOF_SQUARE: f64 = 100.0;

/// Which area computation backs a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaModel {
    /// Local tangent-plane projection around the mean latitude, then shoelace.
    #[default]
    Planar,
    /// Area on a sphere of the WGS84 equatorial radius, used when a map runtime is available.
    Spherical,
}

/// Signed planar area in m² (positive for counter-clockwise in lng/lat axes).
///
/// Vertices are projected to meters relative to their mean position, using
/// `111320 m` per degree of latitude and `111320 * cos(mean_lat)` per degree
/// of longitude. Fewer than three vertices yields `0.0`.
pub fn signed_area_square_meters(points: &[Coordinate]) -> f64 {
    if points.len() < 3 { return 0.0 }

    let n = points.len() as f64;
    let mean_lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
    let mean_lng = points.iter().map(|p| p.longitude).sum::<f64>() / n;

    let lat_to_m = METERS_PER_DEGREE_LAT;
    let lng_to_m = METERS_PER_DEGREE_LAT * mean_lat.to_radians().cos().abs();

    let local: Vec<geo::Coord<f64>> = points.iter()
        .map(|p| geo::Coord {
            x: (p.longitude - mean_lng) * lng_to_m,
            y: (p.latitude - mean_lat) * lat_to_m,
        })
        .collect();

    geo::Polygon::new(geo::LineString(local), vec![]).signed_area()
}

/// Planar area magnitude in m². Never negative; `0.0` for degenerate input.
#[inline]
pub fn polygon_area_square_meters(points: &[Coordinate]) -> f64 {
    signed_area_square_meters(points).abs()
}

/// Spherical area magnitude in m². `0.0` for degenerate input.
pub fn spherical_area_square_meters(points: &[Coordinate]) -> f64 {
    if points.len() < 3 { return 0.0 }
    to_geo_polygon(points).chamberlain_duquette_unsigned_area()
}

/// Area in m² using the requested model.
#[inline]
pub fn area_square_meters(points: &[Coordinate], model: AreaModel) -> f64 {
    match model {
        AreaModel::Planar => polygon_area_square_meters(points),
        AreaModel::Spherical => spherical_area_square_meters(points),
    }
}

/// Convert m² to ft².
#[inline] pub fn square_meters_to_square_feet(x: f64) -> f64 { x * SQUARE_FEET_PER_SQUARE_METER }

/// Convert ft² to roofing squares (100 ft² each).
#[inline] pub fn roof_squares(square_feet: f64) -> f64 { square_feet / SQUARE_FEET_PER_ROOF_SQUARE }
