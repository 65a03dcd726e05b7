use tracing::{debug, info};

use super::{BuildingFootprint, FootprintLookupError, FootprintSource};
use crate::geom::Coordinate;

/// Pick the building whose vertex centroid is nearest `center` in raw degree space.
///
/// Ties keep the earliest candidate. Returns `None` for an empty list.
pub fn closest_building<I>(buildings: I, center: Coordinate) -> Option<BuildingFootprint>
where I: IntoIterator<Item = BuildingFootprint> {
    buildings.into_iter()
        .map(|b| (b.centroid().degree_distance(&center), b))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, b)| b)
}

/// Query `source` and return the closest building, or `None` if there are none.
///
/// Lookup failures are returned as errors, never folded into `None`.
pub fn find_closest_building<S>(source: &S, center: Coordinate, radius_m: f64)
    -> Result<Option<BuildingFootprint>, FootprintLookupError>
where S: FootprintSource + ?Sized {
    let buildings = source.fetch_buildings(center, radius_m)?;
    debug!("[footprint] {} candidates within {radius_m} m", buildings.len());

    let closest = closest_building(buildings, center);
    match &closest {
        Some(b) => info!("[footprint] closest {} ({:.1} m²)", b.id, b.area_square_meters),
        None => info!("[footprint] no building within {radius_m} m"),
    }
    Ok(closest)
}
