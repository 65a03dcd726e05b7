use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One of the three contractor-defined packages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKey { Good, Better, Best }

impl TierKey {
    /// All tiers in display order.
    pub const ALL: [TierKey; 3] = [TierKey::Good, TierKey::Better, TierKey::Best];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierKey::Good => "good",
            TierKey::Better => "better",
            TierKey::Best => "best",
        }
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl std::str::FromStr for TierKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(TierKey::Good),
            "better" => Ok(TierKey::Better),
            "best" => Ok(TierKey::Best),
            other => bail!("unknown tier {other:?} (expected good, better or best)"),
        }
    }
}

/// A priced material package, as configured by the contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub key: TierKey,
    pub price_per_square_foot: f64,
    pub warranty_label: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Optional line items quoted next to the roof itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnPricing {
    /// Tear-off of the existing roof, per ft² of roof area.
    pub removal_per_square_foot: f64,
    /// Flat permit fee.
    pub permit_fee: f64,
}

impl Default for AddOnPricing {
    fn default() -> Self { Self { removal_per_square_foot: 1.50, permit_fee: 350.0 } }
}

/// The full pricing sheet: exactly one tier per `TierKey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub good: PricingTier,
    pub better: PricingTier,
    pub best: PricingTier,
    #[serde(default)]
    pub add_ons: AddOnPricing,
    /// Tier highlighted as the most popular choice.
    #[serde(default = "default_popular")]
    pub popular: TierKey,
}

fn default_popular() -> TierKey { TierKey::Better }

fn strings(items: &[&str]) -> Vec<String> { items.iter().map(|s| s.to_string()).collect() }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            good: PricingTier {
                key: TierKey::Good,
                price_per_square_foot: 6.50,
                warranty_label: "25-year".into(),
                display_name: "3-Tab Shingles".into(),
                description: "GAF Timberline NS".into(),
                features: strings(&["Standard shingles", "Basic underlayment", "Standard ventilation"]),
            },
            better: PricingTier {
                key: TierKey::Better,
                price_per_square_foot: 8.75,
                warranty_label: "30-year".into(),
                display_name: "Architectural Shingles".into(),
                description: "GAF Timberline HDZ".into(),
                features: strings(&["Architectural shingles", "Synthetic underlayment", "Ridge vent system", "Ice & water shield"]),
            },
            best: PricingTier {
                key: TierKey::Best,
                price_per_square_foot: 12.00,
                warranty_label: "Lifetime".into(),
                display_name: "Designer Shingles".into(),
                description: "GAF Timberline UHDZ".into(),
                features: strings(&["Designer shingles", "Premium underlayment", "Advanced ventilation", "Full ice & water shield", "Lifetime warranty"]),
            },
            add_ons: AddOnPricing::default(),
            popular: TierKey::Better,
        }
    }
}

impl PricingConfig {
    /// Get the tier for a key.
    pub fn tier(&self, key: TierKey) -> &PricingTier {
        match key {
            TierKey::Good => &self.good,
            TierKey::Better => &self.better,
            TierKey::Best => &self.best,
        }
    }

    /// Iterate over tiers in display order.
    pub fn tiers(&self) -> impl Iterator<Item = &PricingTier> + '_ {
        TierKey::ALL.into_iter().map(move |key| self.tier(key))
    }

    /// Check that each slot holds the matching tier and every price is positive and finite.
    pub fn validate(&self) -> Result<()> {
        for key in TierKey::ALL {
            let tier = self.tier(key);
            if tier.key != key {
                bail!("[pricing] tier in slot {key} is labelled {}", tier.key);
            }
            if !(tier.price_per_square_foot.is_finite() && tier.price_per_square_foot > 0.0) {
                bail!("[pricing] tier {key} has non-positive price {}", tier.price_per_square_foot);
            }
        }
        let add_ons = &self.add_ons;
        if !(add_ons.removal_per_square_foot >= 0.0 && add_ons.permit_fee >= 0.0) {
            bail!("[pricing] add-on prices must be non-negative");
        }
        Ok(())
    }
}
