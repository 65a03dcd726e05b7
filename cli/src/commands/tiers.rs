use anyhow::{ensure, Result};
use roofquote::estimate::tier_displays;
use roofquote::ConfigProvider;

use super::load_config;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::TiersArgs) -> Result<()> {
    ensure!(args.area.is_finite() && args.area >= 0.0, "area must be a non-negative number");
    let pricing = load_config(cli)?.pricing();

    for card in tier_displays(&pricing, args.area, args.pitch, args.selected) {
        let marker = if card.selected { ">" } else { " " };
        let badge = if card.popular { "  [Most Popular]" } else { "" };
        println!("{marker} {:<24} {:>10}  ${:.2}/ft²  {} warranty{badge}",
            card.display_name, card.formatted_price, card.price_per_square_foot, card.warranty_label);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
        for feature in &card.features {
            println!("    - {feature}");
        }
    }
    Ok(())
}
