use std::path::PathBuf;

use roofquote::{Pitch, TierKey};

/// Roof measurement and instant quotes from building footprints
#[derive(clap::Parser, Debug)]
#[command(name = "roofquote", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Contractor pricing/branding JSON, defaults to built-in tiers
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the full quote flow for an address
    Quote(QuoteArgs),

    /// List buildings near a coordinate
    Footprint(FootprintArgs),

    /// Measure a polygon given as lat,lng vertices
    Area(AreaArgs),

    /// Print the tier cards for a roof area
    Tiers(TiersArgs),
}

#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// Street address, e.g. "1600 Amphitheatre Parkway, Mountain View, CA"
    pub address: Option<String>,

    /// Skip geocoding and use this "lat,lng" directly
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<String>,

    /// Roof pitch: flat, shallow, medium or steep
    #[arg(short, long, default_value = "medium")]
    pub pitch: Pitch,

    /// Pricing tier: good, better or best
    #[arg(short, long, default_value = "better")]
    pub tier: TierKey,

    /// Include tear-off of the existing roof
    #[arg(long)]
    pub removal: bool,

    /// Include the permit fee
    #[arg(long)]
    pub permit: bool,

    /// Homeowner first name (with --last-name and --email, produces a lead)
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Output lead file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct FootprintArgs {
    /// Query point as "lat,lng"
    #[arg(allow_hyphen_values = true)]
    pub at: String,

    /// Search radius in meters, defaults to ROOFQUOTE_SEARCH_RADIUS_M or 50
    #[arg(short, long)]
    pub radius: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct AreaArgs {
    /// Vertices as "lat,lng", at least three, in drawing order
    #[arg(required = true, num_args = 3.., allow_hyphen_values = true)]
    pub points: Vec<String>,

    /// Use the spherical model instead of the local planar approximation
    #[arg(long)]
    pub spherical: bool,
}

#[derive(clap::Args, Debug)]
pub struct TiersArgs {
    /// Roof area in square feet
    pub area: f64,

    /// Roof pitch: flat, shallow, medium or steep
    #[arg(short, long, default_value = "medium")]
    pub pitch: Pitch,

    /// Highlight a tier as selected
    #[arg(short, long)]
    pub selected: Option<TierKey>,
}
