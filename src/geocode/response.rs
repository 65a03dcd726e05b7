use serde::Deserialize;

use super::{GeocodeError, GeocodedAddress};
use crate::geom::Coordinate;

#[derive(Debug, Deserialize)]
struct GeocodeResponseDto {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResultDto>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResultDto {
    formatted_address: String,
    geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
struct GeometryDto {
    location: LocationDto,
}

#[derive(Debug, Deserialize)]
struct LocationDto {
    lat: f64,
    lng: f64,
}

/// Interpret a Geocoding API JSON body, taking the first (best) result.
///
/// `ZERO_RESULTS`, or `OK` with an empty result list, means the address is unknown;
/// every other non-`OK` status is treated as the service being unavailable.
pub fn parse_geocode_response(body: &str, address: &str) -> Result<GeocodedAddress, GeocodeError> {
    let response: GeocodeResponseDto = serde_json::from_str(body)
        .map_err(|e| GeocodeError::ServiceUnavailable(format!("invalid geocoding response: {e}")))?;

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(GeocodeError::NotFound(address.to_string())),
        status => {
            let detail = response.error_message.map(|m| format!(": {m}")).unwrap_or_default();
            return Err(GeocodeError::ServiceUnavailable(format!("{status}{detail}")));
        }
    }

    let best = response.results.into_iter().next()
        .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;
    let LocationDto { lat, lng } = best.geometry.location;
    let location = Coordinate::new(lat, lng)
        .map_err(|e| GeocodeError::ServiceUnavailable(format!("provider returned {e}")))?;

    Ok(GeocodedAddress { location, formatted_address: best.formatted_address })
}
