use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{BrandingConfig, PricingConfig};

/// Source of contractor configuration.
///
/// Each call returns an owned snapshot; a widget session reads it once when it starts
/// and later changes do not affect that session.
pub trait ConfigProvider {
    fn pricing(&self) -> PricingConfig;
    fn branding(&self) -> BrandingConfig;
}

/// Fixed in-memory configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticConfig {
    pricing: PricingConfig,
    branding: BrandingConfig,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pricing: Option<PricingConfig>,
    #[serde(default)]
    branding: Option<BrandingConfig>,
}

impl StaticConfig {
    pub fn new(pricing: PricingConfig, branding: BrandingConfig) -> Result<Self> {
        pricing.validate()?;
        Ok(Self { pricing, branding })
    }

    /// Parse `{ "pricing": {...}, "branding": {...} }`; missing sections use defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(text).context("parse contractor config")?;
        Self::new(file.pricing.unwrap_or_default(), file.branding.unwrap_or_default())
    }

    /// Load a contractor config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("load {}", path.display()))
    }
}

impl ConfigProvider for StaticConfig {
    fn pricing(&self) -> PricingConfig { self.pricing.clone() }
    fn branding(&self) -> BrandingConfig { self.branding.clone() }
}
