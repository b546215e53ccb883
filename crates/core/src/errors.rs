//! Core error types for quote resolution.

use thiserror::Error;

/// Type alias for Result using our QuoteError type.
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Classified failures produced while resolving a quote.
///
/// Every variant is recoverable per-request; the server maps each to an
/// HTTP status and a structured error body. The display strings are the
/// externally visible error messages.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// The requested model is not in the catalog.
    #[error("Model not found")]
    ModelNotFound,

    /// The model exists but the requested (or default) variant does not.
    #[error("Variant not found")]
    VariantNotFound,

    /// The variant exists but carries no price for the requested currency.
    #[error("Currency not available for this model/variant")]
    CurrencyUnavailable,

    /// The spot-price cache holds the zero sentinel for the currency.
    #[error("Unable to get BTC exchange rate")]
    SpotPriceUnavailable,
}
