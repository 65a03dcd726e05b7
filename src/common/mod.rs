mod fs;
#[cfg(feature = "network")]
mod http;

pub use fs::write_json_atomic;
#[cfg(feature = "network")]
pub(crate) use http::http_client;
