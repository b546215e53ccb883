//! Error types for spot-price fetching.

use thiserror::Error;

/// Errors that can occur while fetching a spot price from an upstream
/// provider.
///
/// The cache layer maps every one of these to the zero sentinel; the enum
/// exists so providers can log and report *why* a fetch failed.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered with a non-success status or an otherwise
    /// unusable response.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a price that could not be parsed as a decimal.
    #[error("Malformed price from {provider}: {message}")]
    MalformedPrice {
        /// The provider that returned the price
        provider: String,
        /// Description of the parse failure
        message: String,
    },

    /// The order book for the requested currency pair had no bids.
    #[error("No bids for {pair}")]
    EmptyBook {
        /// The currency pair that was queried
        pair: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
