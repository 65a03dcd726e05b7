use anyhow::Result;
use reqwest::{blocking::Client, header::CONTENT_TYPE};
use tracing::debug;

use super::{build_overpass_query, parse_osm_response, BuildingFootprint, FootprintLookupError, FootprintSource};
use crate::common::http_client;
use crate::config::Settings;
use crate::geom::Coordinate;

/// Footprint source backed by an Overpass API interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self { client: http_client(settings)?, endpoint: settings.overpass_url.clone() })
    }
}

impl FootprintSource for OverpassClient {
    fn fetch_buildings(&self, center: Coordinate, radius_m: f64) -> Result<Vec<BuildingFootprint>, FootprintLookupError> {
        let query = build_overpass_query(center, radius_m);
        debug!("[footprint] POST {} around {:.6},{:.6} r={radius_m}", self.endpoint, center.latitude, center.longitude);

        let body = self.client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| FootprintLookupError::Request(e.to_string()))?;

        parse_osm_response(&body)
    }
}
