//! Tests for QuoteService contracts and edge cases.
//!
//! The mocks implement the crate traits directly: a fixed-rate spot source
//! and a recording usage sink.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cryptomotor_market_data::SpotRateSource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::{Model, OptionPricing, PricingCatalog};
use crate::errors::QuoteError;
use crate::quotes::{QuoteService, QuoteUsageSink};

// =========================================================================
// Mock SpotRateSource
// =========================================================================

struct FixedRateSource(Decimal);

#[async_trait]
impl SpotRateSource for FixedRateSource {
    async fn get_spot(&self, _currency: &str) -> Decimal {
        self.0
    }
}

// =========================================================================
// Mock QuoteUsageSink
// =========================================================================

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl QuoteUsageSink for RecordingSink {
    fn record_model(&self, model: &str) {
        self.push(format!("model:{model}"));
    }
    fn record_variant(&self, model: &str, variant: &str) {
        self.push(format!("variant:{model}/{variant}"));
    }
    fn record_option(&self, model: &str, variant: &str, option: &str) {
        self.push(format!("option:{model}/{variant}/{option}"));
    }
    fn record_option_set(&self, model: &str, variant: &str, options: &str) {
        self.push(format!("set:{model}/{variant}/{options}"));
    }
}

// =========================================================================
// Fixtures
// =========================================================================

fn usd(price: i64) -> HashMap<String, i64> {
    HashMap::from([("usd".to_string(), price)])
}

fn test_catalog() -> Arc<PricingCatalog> {
    let model = Model {
        default_variant: "longrange".to_string(),
        options: HashMap::from([
            (
                "red".to_string(),
                OptionPricing {
                    group: Some(0),
                    prices: usd(2500),
                },
            ),
            (
                "blue".to_string(),
                OptionPricing {
                    group: Some(0),
                    prices: usd(1800),
                },
            ),
            (
                "destinationfee".to_string(),
                OptionPricing {
                    group: None,
                    prices: usd(1200),
                },
            ),
        ]),
        variants: HashMap::from([("longrange".to_string(), usd(79990))]),
    };
    Arc::new(PricingCatalog::new(HashMap::from([(
        "s".to_string(),
        model,
    )])))
}

fn service(spot: Decimal, sink: Arc<RecordingSink>) -> QuoteService {
    QuoteService::new(
        test_catalog(),
        Arc::new(FixedRateSource(spot)),
        "https://ts.la/ref".to_string(),
        "https://api.cryptomotor.dev".to_string(),
    )
    .with_usage_sink(sink)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn assembles_the_external_record() {
    let service = service(dec!(40000.00), Arc::default());
    let quote = service
        .get_quote(" s ", "LongRange", "usd", "Red")
        .await
        .unwrap();

    assert_eq!(quote.model, "S");
    assert_eq!(quote.variant, "LongRange");
    assert_eq!(quote.currency, "USD");
    assert_eq!(quote.base_price, 79990);
    assert_eq!(quote.total, 83690);
    assert_eq!(quote.total_btc, dec!(2.09225));
    assert_eq!(quote.btc_spot_price, dec!(40000.00));
    assert_eq!(quote.referral_url, "https://ts.la/ref");
    assert_eq!(quote.generated_by_url, "https://api.cryptomotor.dev");
}

#[tokio::test]
async fn splits_and_normalizes_the_option_list() {
    let service = service(dec!(40000), Arc::default());
    let quote = service
        .get_quote("s", "", "USD", " Red , blue ,, ")
        .await
        .unwrap();

    // Group exclusivity applies after normalization: Red wins.
    assert_eq!(
        quote.options,
        HashMap::from([
            ("Red".to_string(), 2500),
            ("DestinationFee".to_string(), 1200),
        ])
    );
}

#[tokio::test]
async fn zero_rate_surfaces_as_spot_price_unavailable() {
    let service = service(Decimal::ZERO, Arc::default());
    let err = service.get_quote("s", "", "USD", "").await.unwrap_err();
    assert_eq!(err, QuoteError::SpotPriceUnavailable);
}

#[tokio::test]
async fn reports_usage_on_success() {
    let sink = Arc::new(RecordingSink::default());
    let service = service(dec!(40000), sink.clone());
    service.get_quote("s", "", "usd", "red").await.unwrap();

    assert_eq!(
        sink.events(),
        vec![
            "model:S".to_string(),
            "variant:S/LongRange".to_string(),
            "option:S/LongRange/DestinationFee".to_string(),
            "option:S/LongRange/Red".to_string(),
            "set:S/LongRange/Red".to_string(),
        ]
    );
}

#[tokio::test]
async fn reports_nothing_on_failure() {
    let sink = Arc::new(RecordingSink::default());
    let service = service(dec!(40000), sink.clone());
    service.get_quote("cybertruck", "", "usd", "").await.unwrap_err();

    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn lists_available_models() {
    let service = service(dec!(40000), Arc::default());
    let summaries = service.available();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "S");
    assert_eq!(summaries[0].options.len(), 3);
    assert_eq!(summaries[0].variants, vec!["LongRange".to_string()]);
}
