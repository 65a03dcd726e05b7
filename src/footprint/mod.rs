mod osm;
#[cfg(feature = "network")]
mod overpass;
mod select;

use serde::{Deserialize, Serialize};

use crate::geom::{square_meters_to_square_feet, vertex_centroid, Coordinate, Polygon, SQUARE_FEET_PER_SQUARE_METER};

pub use osm::{build_overpass_query, parse_osm_response};
#[cfg(feature = "network")]
pub use overpass::OverpassClient;
pub use select::{closest_building, find_closest_building};

/// Roof area reported for the synthetic fallback footprint, in ft².
pub const FALLBACK_ROOF_AREA_SQFT: f64 = 1800.0;

/// Half the side length of the synthetic fallback square, in degrees.
pub const FALLBACK_HALF_SIDE_DEG: f64 = 0.0001;

/// Identifier given to the synthetic fallback footprint.
pub const FALLBACK_FOOTPRINT_ID: &str = "fallback";

/// A building outline from open map data. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingFootprint {
    /// Stable source identifier, e.g. `way/123456`.
    pub id: String,
    pub polygon: Polygon,
    pub area_square_meters: f64,
}

impl BuildingFootprint {
    #[inline] pub fn area_square_feet(&self) -> f64 { square_meters_to_square_feet(self.area_square_meters) }

    /// Vertex-mean centroid.
    pub fn centroid(&self) -> Coordinate {
        // a Polygon always has vertices
        vertex_centroid(self.polygon.points()).unwrap_or(self.polygon.points()[0])
    }

    /// Whether this is the synthetic stand-in used when no building was found.
    #[inline] pub fn is_fallback(&self) -> bool { self.id == FALLBACK_FOOTPRINT_ID }
}

/// A square stand-in centered on `center`, reporting [`FALLBACK_ROOF_AREA_SQFT`].
///
/// The reported area is a fixed constant, not the square's geometric area.
/// Near a pole or the antimeridian the square is shifted inward so that all
/// corners stay valid coordinates.
pub fn fallback_footprint(center: Coordinate) -> BuildingFootprint {
    let d = FALLBACK_HALF_SIDE_DEG;
    // keep every corner inside the valid lat/lng range near the poles and the antimeridian
    let center = Coordinate {
        latitude: center.latitude.clamp(-90.0 + d, 90.0 - d),
        longitude: center.longitude.clamp(-180.0 + d, 180.0 - d),
    };
    let corners = vec![
        center.offset(-d, -d),
        center.offset(-d, d),
        center.offset(d, d),
        center.offset(d, -d),
    ];
    let corners: Vec<Coordinate> = corners.into_iter()
        .map(|c| Coordinate { latitude: c.latitude.clamp(-90.0, 90.0), longitude: c.longitude.clamp(-180.0, 180.0) })
        .collect();
    BuildingFootprint {
        id: FALLBACK_FOOTPRINT_ID.to_string(),
        polygon: Polygon::from_ring(corners),
        area_square_meters: FALLBACK_ROOF_AREA_SQFT / SQUARE_FEET_PER_SQUARE_METER,
    }
}

/// The footprint service failed; distinct from "no building found".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FootprintLookupError {
    #[error("footprint service request failed: {0}")]
    Request(String),

    #[error("invalid footprint service response: {0}")]
    InvalidResponse(String),
}

/// A source of building outlines near a point.
pub trait FootprintSource {
    /// All buildings with at least three resolvable vertices within `radius_m` of `center`.
    fn fetch_buildings(&self, center: Coordinate, radius_m: f64) -> Result<Vec<BuildingFootprint>, FootprintLookupError>;
}

impl<S: FootprintSource + ?Sized> FootprintSource for &S {
    fn fetch_buildings(&self, center: Coordinate, radius_m: f64) -> Result<Vec<BuildingFootprint>, FootprintLookupError> {
        (**self).fetch_buildings(center, radius_m)
    }
}

impl<S: FootprintSource + ?Sized> FootprintSource for Box<S> {
    fn fetch_buildings(&self, center: Coordinate, radius_m: f64) -> Result<Vec<BuildingFootprint>, FootprintLookupError> {
        (**self).fetch_buildings(center, radius_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::polygon_area_square_meters;

    #[test]
    fn fallback_is_square_around_center_with_fixed_area() {
        let center = Coordinate::new(37.4224764, -122.0842499).unwrap();
        let fallback = fallback_footprint(center);

        assert!(fallback.is_fallback());
        assert_eq!(fallback.polygon.len(), 4);
        assert!(fallback.centroid().degree_distance(&center) < 1e-12);
        assert!((fallback.area_square_feet() - FALLBACK_ROOF_AREA_SQFT).abs() < 1e-9);

        // the constant is deliberately not the square's own area
        let geometric = square_meters_to_square_feet(polygon_area_square_meters(fallback.polygon.points()));
        assert!((geometric - FALLBACK_ROOF_AREA_SQFT).abs() > 1.0);
    }

    #[test]
    fn fallback_corners_stay_in_range_at_edges() {
        for (lat, lng) in [(89.99995, 179.99995), (-90.0, -180.0), (0.0, 180.0), (-89.99999, 12.5)] {
            let fallback = fallback_footprint(Coordinate::new(lat, lng).unwrap());
            assert_eq!(fallback.polygon.len(), 4);
            for p in fallback.polygon.points() {
                assert!(Coordinate::new(p.latitude, p.longitude).is_ok(), "({lat}, {lng}) -> {p:?}");
            }
            assert!((fallback.area_square_feet() - FALLBACK_ROOF_AREA_SQFT).abs() < 1e-9);
        }
    }
}
