//! Quote data model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Output of the quote calculator.
///
/// Carries everything derived from the catalog, the selection and the spot
/// price; the service layer attaches the request-independent fields before
/// the record leaves the process.
#[derive(Debug, Clone)]
pub struct PricedQuote {
    /// Display name of the model.
    pub model: String,
    /// Display name of the resolved variant.
    pub variant: String,
    /// Uppercased currency code.
    pub currency: String,
    /// Variant base price in minor currency units.
    pub base_price: i64,
    /// Applied options by display name, including the destination fee.
    pub options: HashMap<String, i64>,
    /// Base price plus all applied options, minor currency units.
    pub total: i64,
    /// Spot price used for the conversion.
    pub spot_price: Decimal,
    /// Total expressed in BTC.
    pub total_btc: Decimal,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}

/// Externally visible quote record.
///
/// Field names and order match the wire contract; decimals serialize as
/// JSON strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quote {
    pub model: String,
    pub base_price: i64,
    pub variant: String,
    pub options: HashMap<String, i64>,
    #[serde(rename = "BTCSpotPrice")]
    pub btc_spot_price: Decimal,
    pub currency: String,
    pub total: i64,
    #[serde(rename = "TotalBTC")]
    pub total_btc: Decimal,
    #[serde(rename = "ReferralURL")]
    pub referral_url: String,
    #[serde(rename = "GeneratedByURL")]
    pub generated_by_url: String,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Assemble the external record from a priced quote.
    pub fn from_priced(
        priced: PricedQuote,
        referral_url: String,
        generated_by_url: String,
    ) -> Self {
        Self {
            model: priced.model,
            base_price: priced.base_price,
            variant: priced.variant,
            options: priced.options,
            btc_spot_price: priced.spot_price,
            currency: priced.currency,
            total: priced.total,
            total_btc: priced.total_btc,
            referral_url,
            generated_by_url,
            timestamp: priced.timestamp,
        }
    }
}
