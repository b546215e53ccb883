//! Cryptomotor Market Data Crate
//!
//! This crate provides the live BTC exchange-rate side of cryptomotor:
//! fetching the best bid for a BTC/fiat pair from an upstream price source
//! and caching it per currency.
//!
//! # Overview
//!
//! - [`SpotPriceProvider`] - trait implemented by upstream price sources
//! - [`CoinbaseProvider`] - the Coinbase Exchange order-book implementation
//! - [`SpotPriceCache`] - one background refresher per currency, serving the
//!   last known rate through a request/response handoff
//! - [`SpotRateSource`] - the consumer-facing trait the cache implements
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  QuoteService    | --> |  SpotPriceCache  | --> |    Provider      |
//! |  (consumer)      |     |  (per-currency   |     |  (Coinbase, ...) |
//! |                  |     |   refreshers)    |     |                  |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! A rate of exactly zero is the sentinel for "unavailable" and must never
//! be treated as a real price.

pub mod cache;
pub mod errors;
pub mod provider;

pub use cache::{SpotPriceCache, SpotRateSource};
pub use errors::MarketDataError;
pub use provider::{CoinbaseProvider, SpotPriceProvider};
