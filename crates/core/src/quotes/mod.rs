//! Quotes module - calculator, orchestration service and usage reporting.

mod calculator;
mod quote_model;
mod quote_service;
mod quotes_traits;

#[cfg(test)]
mod quote_service_tests;

// Re-export the public interface
pub use calculator::{compute_quote, DESTINATION_FEE};
pub use quote_model::{PricedQuote, Quote};
pub use quote_service::QuoteService;
pub use quotes_traits::{NoOpUsageSink, QuoteUsageSink};
