#[cfg(feature = "network")]
mod google;
mod response;

use serde::{Deserialize, Serialize};

use crate::geom::Coordinate;

#[cfg(feature = "network")]
pub use google::GoogleGeocoder;
pub use response::parse_geocode_response;

/// A resolved address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    pub location: Coordinate,
    pub formatted_address: String,
}

/// Why an address could not be resolved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    /// The provider answered but knows no such address.
    #[error("address not found: {0:?}")]
    NotFound(String),

    /// The provider could not be reached or refused the request.
    #[error("geocoding service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Resolves free-text addresses to coordinates.
///
/// Callers are expected to reject addresses shorter than the flow's minimum
/// length before calling; implementations do not re-validate.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> { (**self).geocode(address) }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<GeocodedAddress, GeocodeError> { (**self).geocode(address) }
}
