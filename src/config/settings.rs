use std::str::FromStr;
use std::time::Duration;

/// Default Google Geocoding JSON endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default static map imagery endpoint.
pub const DEFAULT_STATIC_MAPS_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Runtime settings for the network clients and map runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// API key for geocoding and map imagery; `None` disables both.
    pub google_maps_api_key: Option<String>,
    pub geocode_url: String,
    pub overpass_url: String,
    pub static_maps_url: String,
    /// Radius around the geocoded point searched for buildings, in meters.
    pub search_radius_m: f64,
    /// Per-request timeout; `None` waits indefinitely.
    pub http_timeout: Option<Duration>,
    pub user_agent: String,
    /// Zoom level used when centering the map on a property.
    pub map_zoom: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google_maps_api_key: None,
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            static_maps_url: DEFAULT_STATIC_MAPS_URL.to_string(),
            search_radius_m: 50.0,
            http_timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("roofquote/", env!("CARGO_PKG_VERSION")).to_string(),
            map_zoom: 20,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self where F: Fn(&str) -> Option<String> {
        let defaults = Self::default();
        let text = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let parse = |name: &str| text(name).and_then(|v| parse_value::<f64>(&v));

        let http_timeout = match parse("ROOFQUOTE_HTTP_TIMEOUT_S") {
            Some(secs) if secs <= 0.0 => None,
            Some(secs) => Duration::try_from_secs_f64(secs).ok().or(defaults.http_timeout),
            None => defaults.http_timeout,
        };

        Self {
            google_maps_api_key: text("GOOGLE_MAPS_API_KEY"),
            geocode_url: text("ROOFQUOTE_GEOCODE_URL").unwrap_or(defaults.geocode_url),
            overpass_url: text("ROOFQUOTE_OVERPASS_URL").unwrap_or(defaults.overpass_url),
            static_maps_url: text("ROOFQUOTE_STATIC_MAPS_URL").unwrap_or(defaults.static_maps_url),
            search_radius_m: parse("ROOFQUOTE_SEARCH_RADIUS_M")
                .filter(|r| *r > 0.0)
                .unwrap_or(defaults.search_radius_m),
            http_timeout,
            user_agent: text("ROOFQUOTE_USER_AGENT").unwrap_or(defaults.user_agent),
            map_zoom: text("ROOFQUOTE_MAP_ZOOM")
                .and_then(|v| parse_value::<u8>(&v))
                .map(|z| z.clamp(1, 21))
                .unwrap_or(defaults.map_zoom),
        }
    }
}

fn parse_value<T: FromStr>(value: &str) -> Option<T> {
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("[settings] ignoring unparsable value {value:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", " abc123 "),
            ("ROOFQUOTE_OVERPASS_URL", "http://localhost:12345/api/interpreter"),
            ("ROOFQUOTE_SEARCH_RADIUS_M", "75"),
            ("ROOFQUOTE_HTTP_TIMEOUT_S", "0"),
            ("ROOFQUOTE_MAP_ZOOM", "40"),
        ]));
        assert_eq!(settings.google_maps_api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.overpass_url, "http://localhost:12345/api/interpreter");
        assert_eq!(settings.search_radius_m, 75.0);
        assert_eq!(settings.http_timeout, None);
        assert_eq!(settings.map_zoom, 21);
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("ROOFQUOTE_SEARCH_RADIUS_M", "-3"),
            ("ROOFQUOTE_HTTP_TIMEOUT_S", "soon"),
            ("GOOGLE_MAPS_API_KEY", "   "),
        ]));
        assert_eq!(settings.search_radius_m, 50.0);
        assert_eq!(settings.http_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.google_maps_api_key, None);
    }
}
