mod branding;
mod pricing;
mod provider;
mod settings;

pub use branding::BrandingConfig;
pub use pricing::{AddOnPricing, PricingConfig, PricingTier, TierKey};
pub use provider::{ConfigProvider, StaticConfig};
pub use settings::{Settings, DEFAULT_GEOCODE_URL, DEFAULT_OVERPASS_URL, DEFAULT_STATIC_MAPS_URL};
