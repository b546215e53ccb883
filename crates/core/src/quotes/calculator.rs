//! Deterministic pricing resolution.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::catalog::{display_name, PricingCatalog};
use crate::errors::QuoteError;

use super::quote_model::PricedQuote;

/// The implicit fee option: never user-selectable, no group, added to every
/// quote whose model prices it non-zero for the currency.
pub const DESTINATION_FEE: &str = "destinationfee";

/// Resolve a model/variant/option selection into a priced quote.
///
/// `variant` may be empty, in which case the model's default variant
/// applies. Option names are matched case-insensitively and in request
/// order; unknown options and options without a price in `currency` are
/// ignored. At most one option per group is applied - the first one
/// encountered. A grouped option consumes its group even when it prices to
/// zero for the currency. Ungrouped options carry no exclusivity and a
/// duplicate therefore counts twice toward the total.
///
/// # Errors
///
/// - [`QuoteError::SpotPriceUnavailable`] when `spot_price` is the zero
///   sentinel; checked first, so it wins over catalog errors
/// - [`QuoteError::ModelNotFound`] / [`QuoteError::VariantNotFound`] /
///   [`QuoteError::CurrencyUnavailable`] for missing catalog entries
pub fn compute_quote(
    catalog: &PricingCatalog,
    model: &str,
    variant: &str,
    currency: &str,
    options: &[String],
    spot_price: Decimal,
) -> Result<PricedQuote, QuoteError> {
    if spot_price.is_zero() {
        return Err(QuoteError::SpotPriceUnavailable);
    }

    let currency_key = currency.to_lowercase();
    let entry = catalog.model(model).ok_or(QuoteError::ModelNotFound)?;

    let variant = if variant.is_empty() {
        entry.default_variant.clone()
    } else {
        variant.to_lowercase()
    };
    let prices = entry
        .variants
        .get(&variant)
        .ok_or(QuoteError::VariantNotFound)?;
    let base_price = *prices
        .get(&currency_key)
        .ok_or(QuoteError::CurrencyUnavailable)?;

    let mut total = base_price;
    let mut applied: HashMap<String, i64> = HashMap::new();
    let mut used_groups: HashSet<i64> = HashSet::new();

    for name in options {
        let name = name.trim().to_lowercase();
        if name.is_empty() || name == DESTINATION_FEE {
            continue;
        }
        let Some(option) = entry.options.get(&name) else {
            continue;
        };
        if let Some(group) = option.group {
            if !used_groups.insert(group) {
                // An option from this group was already applied.
                continue;
            }
        }
        let price = option.prices.get(&currency_key).copied().unwrap_or(0);
        if price != 0 {
            total += price;
            applied.insert(display_name(&name), price);
        }
    }

    if let Some(fee) = entry.options.get(DESTINATION_FEE) {
        let price = fee.prices.get(&currency_key).copied().unwrap_or(0);
        if price != 0 {
            total += price;
            applied.insert(display_name(DESTINATION_FEE), price);
        }
    }

    Ok(PricedQuote {
        model: display_name(model),
        variant: display_name(&variant),
        currency: currency.to_uppercase(),
        base_price,
        options: applied,
        total,
        spot_price,
        total_btc: Decimal::from(total) / spot_price,
        timestamp: Utc::now(),
    })
}
