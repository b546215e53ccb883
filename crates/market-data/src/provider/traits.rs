//! Spot-price provider trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;

/// Trait for upstream spot-price sources.
///
/// Implement this trait to add support for a new price source. The cache
/// spawns one refresher per currency and calls [`best_bid`](Self::best_bid)
/// whenever it needs a fresh rate.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINBASE". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the current best bid for the BTC/`currency` pair.
    ///
    /// # Arguments
    ///
    /// * `currency` - Fiat currency code, any case (e.g. "USD", "eur")
    ///
    /// # Returns
    ///
    /// The best bid as a decimal on success, or a `MarketDataError` on
    /// failure. Implementations must never return zero as a price; zero is
    /// reserved by the cache as the "unavailable" sentinel.
    async fn best_bid(&self, currency: &str) -> Result<Decimal, MarketDataError>;
}
