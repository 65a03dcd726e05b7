use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Deserialize;
use tracing::debug;

use super::{BuildingFootprint, FootprintLookupError};
use crate::geom::{polygon_area_square_meters, Coordinate, Polygon};

/// Overpass QL selecting building ways and relations around a point,
/// followed by the nodes they reference.
pub fn build_overpass_query(center: Coordinate, radius_m: f64) -> String {
    let (lat, lon) = (center.latitude, center.longitude);
    format!(
        "[out:json][timeout:25];\n\
         (\n  \
           way[\"building\"](around:{radius_m},{lat},{lon});\n  \
           relation[\"building\"](around:{radius_m},{lat},{lon});\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;"
    )
}

#[derive(Debug, Deserialize)]
struct OsmResponseDto {
    #[serde(default)]
    elements: Vec<OsmElementDto>,
}

#[derive(Debug, Deserialize)]
struct OsmElementDto {
    #[serde(rename = "type")]
    element_type: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    nodes: Vec<i64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

/// Parse an Overpass JSON body into building footprints.
///
/// Nodes are indexed by id; each way tagged `building` is resolved through that index in
/// node order. Unknown node ids are skipped, and ways left with fewer than three distinct
/// vertices are dropped. Relations are not assembled into multipolygons.
pub fn parse_osm_response(body: &str) -> Result<Vec<BuildingFootprint>, FootprintLookupError> {
    let response: OsmResponseDto = serde_json::from_str(body)
        .map_err(|e| FootprintLookupError::InvalidResponse(e.to_string()))?;

    let nodes: AHashMap<i64, Coordinate> = response.elements.iter()
        .filter(|e| e.element_type == "node")
        .filter_map(|e| {
            let coord = Coordinate::new(e.lat?, e.lon?).ok()?;
            Some((e.id, coord))
        })
        .collect();

    let mut buildings = Vec::new();
    for way in response.elements.iter().filter(|e| e.element_type == "way" && e.tags.contains_key("building")) {
        let points: Vec<Coordinate> = way.nodes.iter()
            .filter_map(|id| nodes.get(id).copied())
            .collect();

        let polygon = match Polygon::new(points) {
            Ok(polygon) => polygon,
            Err(e) => {
                debug!("[footprint] skipping way/{}: {e}", way.id);
                continue;
            }
        };

        buildings.push(BuildingFootprint {
            id: format!("way/{}", way.id),
            area_square_meters: polygon_area_square_meters(polygon.points()),
            polygon,
        });
    }

    debug!("[footprint] parsed {} nodes, {} buildings", nodes.len(), buildings.len());
    Ok(buildings)
}
