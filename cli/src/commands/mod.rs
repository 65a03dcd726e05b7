pub mod area;
pub mod footprint;
pub mod quote;
pub mod tiers;

use anyhow::{Context, Result};
use roofquote::{Coordinate, StaticConfig};

use crate::cli::Cli;

/// Parse `"lat,lng"` into a range-checked coordinate.
pub fn parse_coordinate(text: &str) -> Result<Coordinate> {
    let (lat, lng) = text.split_once(',')
        .with_context(|| format!("expected \"lat,lng\", got {text:?}"))?;
    let lat: f64 = lat.trim().parse().with_context(|| format!("bad latitude in {text:?}"))?;
    let lng: f64 = lng.trim().parse().with_context(|| format!("bad longitude in {text:?}"))?;
    Ok(Coordinate::new(lat, lng)?)
}

/// Contractor config from `--config`, or the built-in defaults.
pub fn load_config(cli: &Cli) -> Result<StaticConfig> {
    match &cli.config {
        Some(path) => StaticConfig::from_json_file(path),
        None => Ok(StaticConfig::default()),
    }
}
