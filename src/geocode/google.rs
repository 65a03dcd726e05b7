use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

use super::{parse_geocode_response, GeocodeError, GeocodedAddress, Geocoder};
use crate::common::http_client;
use crate::config::Settings;

/// Geocoder backed by the Google Geocoding web service.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Build a geocoder from settings. Fails if no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.google_maps_api_key.clone()
            .context("GOOGLE_MAPS_API_KEY is not configured")?;
        Ok(Self {
            client: http_client(settings)?,
            endpoint: settings.geocode_url.clone(),
            api_key,
        })
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> {
        debug!("[geocode] {address:?}");

        let body = self.client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| GeocodeError::ServiceUnavailable(e.without_url().to_string()))?;

        let geocoded = parse_geocode_response(&body, address)?;
        debug!(
            "[geocode] -> {:.6},{:.6} {:?}",
            geocoded.location.latitude, geocoded.location.longitude, geocoded.formatted_address
        );
        Ok(geocoded)
    }
}
