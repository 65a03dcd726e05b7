use serde::Serialize;

use super::{estimate, Pitch};
use crate::config::{PricingConfig, TierKey};

/// A tier card as shown next to the estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierDisplay {
    pub key: TierKey,
    pub display_name: String,
    pub description: String,
    pub warranty_label: String,
    pub features: Vec<String>,
    pub price_per_square_foot: f64,
    pub total_price: f64,
    /// `total_price` as e.g. `$22,750`.
    pub formatted_price: String,
    pub popular: bool,
    pub selected: bool,
}

/// Cards for every tier, in display order.
pub fn tier_displays(pricing: &PricingConfig, area_square_feet: f64, pitch: Pitch, selected: Option<TierKey>) -> Vec<TierDisplay> {
    pricing.tiers()
        .map(|tier| {
            let quote = estimate(area_square_feet, pitch, tier);
            TierDisplay {
                key: tier.key,
                display_name: tier.display_name.clone(),
                description: tier.description.clone(),
                warranty_label: tier.warranty_label.clone(),
                features: tier.features.clone(),
                price_per_square_foot: tier.price_per_square_foot,
                total_price: quote.total_price,
                formatted_price: format_currency(quote.total_price),
                popular: tier.key == pricing.popular,
                selected: selected == Some(tier.key),
            }
        })
        .collect()
}

/// Format a whole-dollar amount with thousands separators.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if rounded < 0.0 { out.push('-'); }
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(','); }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(22750.0), "$22,750");
        assert_eq!(format_currency(1234567.4), "$1,234,567");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn cards_mark_popular_and_selected() {
        let pricing = PricingConfig::default();
        let cards = tier_displays(&pricing, 2000.0, Pitch::Medium, Some(TierKey::Best));

        assert_eq!(cards.len(), 3);
        assert_eq!(cards.iter().filter(|c| c.popular).map(|c| c.key).collect::<Vec<_>>(), vec![TierKey::Better]);
        assert_eq!(cards.iter().filter(|c| c.selected).map(|c| c.key).collect::<Vec<_>>(), vec![TierKey::Best]);
        assert_eq!(cards[1].formatted_price, "$22,750");
        assert_eq!(cards[0].warranty_label, "25-year");
    }
}
