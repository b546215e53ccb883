//! Coinbase Exchange spot-price provider.
//!
//! Fetches the level-1 order book for a BTC/fiat product and reports the
//! best bid as the current exchange rate.

mod models;

use async_trait::async_trait;
use reqwest::header;
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::provider::SpotPriceProvider;

use models::OrderBookResponse;

const PROVIDER_ID: &str = "COINBASE";

/// Default public API endpoint for the Coinbase Exchange order book.
pub const DEFAULT_ENDPOINT: &str = "https://api.exchange.coinbase.com";

/// Coinbase Exchange spot-price provider.
///
/// Uses the public (unauthenticated) order-book endpoint; no API key is
/// required for read-only book data.
pub struct CoinbaseProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl CoinbaseProvider {
    /// Create a provider against the public Coinbase Exchange API.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a provider against a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for CoinbaseProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotPriceProvider for CoinbaseProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn best_bid(&self, currency: &str) -> Result<Decimal, MarketDataError> {
        let pair = format!("BTC-{}", currency.to_uppercase());
        let url = format!("{}/products/{}/book?level=1", self.endpoint, pair);

        // Coinbase rejects requests without a User-Agent.
        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, "cryptomotor")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("{} returned {}", pair, response.status()),
            });
        }

        let book: OrderBookResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("failed to decode order book for {}: {}", pair, e),
                })?;

        let best = book
            .bids
            .first()
            .ok_or(MarketDataError::EmptyBook { pair: pair.clone() })?;

        let price: Decimal =
            best.price()
                .parse()
                .map_err(|e| MarketDataError::MalformedPrice {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("{}: {}", best.price(), e),
                })?;

        debug!("new BTC price for {}: {}", currency.to_uppercase(), price);
        Ok(price)
    }
}
