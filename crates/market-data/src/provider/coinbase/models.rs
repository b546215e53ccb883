//! Response models for the Coinbase Exchange order-book endpoint.

use serde::Deserialize;

/// Level-1 order book: best bid and best ask only.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderBookResponse {
    #[serde(default)]
    pub bids: Vec<BookLevel>,
}

/// One book level: `[price, size, num_orders]`, price and size as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct BookLevel(String, #[allow(dead_code)] String, #[allow(dead_code)] u64);

impl BookLevel {
    pub fn price(&self) -> &str {
        &self.0
    }
}
