mod display;

use std::fmt;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::config::{AddOnPricing, PricingTier};
use crate::geom::roof_squares;

pub use display::{format_currency, tier_displays, TierDisplay};

/// Roof steepness; scales footprint area up to actual roof surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pitch {
    Flat,
    Shallow,
    #[default]
    Medium,
    Steep,
}

impl Pitch {
    pub const ALL: [Pitch; 4] = [Pitch::Flat, Pitch::Shallow, Pitch::Medium, Pitch::Steep];

    #[inline]
    pub fn multiplier(&self) -> f64 {
        match self {
            Pitch::Flat => 1.0,
            Pitch::Shallow => 1.15,
            Pitch::Medium => 1.3,
            Pitch::Steep => 1.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pitch::Flat => "flat",
            Pitch::Shallow => "shallow",
            Pitch::Medium => "medium",
            Pitch::Steep => "steep",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl std::str::FromStr for Pitch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Pitch::Flat),
            "shallow" | "low" => Ok(Pitch::Shallow),
            "medium" => Ok(Pitch::Medium),
            "steep" => Ok(Pitch::Steep),
            other => bail!("unknown pitch {other:?} (expected flat, shallow, medium or steep)"),
        }
    }
}

/// Price of a roof for one tier and pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEstimate {
    pub roof_area_square_feet: f64,
    pub pitch: Pitch,
    pub tier: PricingTier,
    /// Rounded to the nearest whole currency unit.
    pub total_price: f64,
}

impl QuoteEstimate {
    #[inline] pub fn roof_squares(&self) -> f64 { roof_squares(self.roof_area_square_feet) }

    /// Itemize this estimate together with optional add-ons.
    pub fn itemize(&self, add_ons: &AddOnPricing, include_removal: bool, include_permit: bool) -> QuoteBreakdown {
        let removal = if include_removal {
            (self.roof_area_square_feet * add_ons.removal_per_square_foot).round()
        } else { 0.0 };
        let permit = if include_permit { add_ons.permit_fee.round() } else { 0.0 };
        QuoteBreakdown {
            roofing: self.total_price,
            removal,
            permit,
            grand_total: self.total_price + removal + permit,
        }
    }
}

/// Price a roof: `round(area × price per ft² × pitch multiplier)`.
///
/// Negative or non-finite areas are treated as zero.
pub fn estimate(roof_area_square_feet: f64, pitch: Pitch, tier: &PricingTier) -> QuoteEstimate {
    let area = if roof_area_square_feet.is_finite() { roof_area_square_feet.max(0.0) } else { 0.0 };
    let total_price = (area * tier.price_per_square_foot * pitch.multiplier()).round();
    QuoteEstimate { roof_area_square_feet: area, pitch, tier: tier.clone(), total_price }
}

/// Roofing price plus optional add-on line items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub roofing: f64,
    pub removal: f64,
    pub permit: f64,
    pub grand_total: f64,
}
