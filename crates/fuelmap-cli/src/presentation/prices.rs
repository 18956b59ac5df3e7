//! Price listings as shown in popups and the nearest-station panel.

use fuelmap_core::{FuelType, PriceMap};
use thiserror::Error;

/// Shown in place of a listing when a station has no prices.
pub const PRICES_UNAVAILABLE: &str = "Prices unavailable";

const ENTRY_SEPARATOR: &str = " | ";
const AMOUNT_SEPARATOR: &str = ": $";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceTextError {
    #[error("price entry '{0}' is not of the form 'Label: $amount'")]
    MissingSeparator(String),

    #[error("price entry '{0}' has a non-numeric amount")]
    InvalidAmount(String),
}

/// Render a price map as `Regular: $22.50 | Diesel: $24.10`.
///
/// Entries follow [`FuelType`] order with two decimals each.
#[must_use]
pub fn format_prices(prices: &PriceMap) -> String {
    if prices.is_empty() {
        return PRICES_UNAVAILABLE.to_string();
    }

    prices
        .iter()
        .map(|(fuel, amount)| format!("{}{AMOUNT_SEPARATOR}{amount:.2}", label(fuel)))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Read back a listing produced by [`format_prices`].
///
/// # Errors
///
/// Returns [`PriceTextError`] when an entry lacks the `: $` separator or
/// its amount does not parse.
pub fn parse_prices(text: &str) -> Result<PriceMap, PriceTextError> {
    let text = text.trim();
    let mut prices = PriceMap::new();
    if text.is_empty() || text == PRICES_UNAVAILABLE {
        return Ok(prices);
    }

    for entry in text.split(ENTRY_SEPARATOR) {
        let (name, amount) = entry
            .split_once(AMOUNT_SEPARATOR)
            .ok_or_else(|| PriceTextError::MissingSeparator(entry.to_string()))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| PriceTextError::InvalidAmount(entry.to_string()))?;
        prices.insert(FuelType::from_label(name), amount);
    }

    Ok(prices)
}

/// `regular` -> `Regular`, `gas lp` -> `Gas lp`.
fn label(fuel: &FuelType) -> String {
    let name = fuel.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
