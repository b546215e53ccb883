use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use cryptomotor_core::catalog::{Model, OptionPricing};
use cryptomotor_market_data::SpotRateSource;
use cryptomotor_server::api::app_router;
use cryptomotor_server::build_state_with_spot_source;
use cryptomotor_server::config::Config;

struct FixedRate(Decimal);

#[async_trait]
impl SpotRateSource for FixedRate {
    async fn get_spot(&self, _currency: &str) -> Decimal {
        self.0
    }
}

fn usd(price: i64) -> HashMap<String, i64> {
    HashMap::from([("usd".to_string(), price)])
}

fn test_config() -> Config {
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

    Config {
        referral_url: "https://ts.la/ref".to_string(),
        models: HashMap::from([("s".to_string(), model)]),
        ..Config::default()
    }
}

fn test_router(spot: Decimal) -> axum::Router {
    let config = test_config();
    let state = build_state_with_spot_source(&config, Arc::new(FixedRate(spot)), None);
    app_router(state, &config)
}

async fn get_json(router: axum::Router, uri: &str) -> (u16, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn quote_round_trip() {
    let router = test_router(dec!(40000.00));
    let (status, json) =
        get_json(router, "/model/s/longrange?currency=USD&options=Red").await;

    assert_eq!(status, 200);
    assert_eq!(json["Model"], "S");
    assert_eq!(json["BasePrice"], 79990);
    assert_eq!(json["Variant"], "LongRange");
    assert_eq!(json["Options"]["Red"], 2500);
    assert_eq!(json["Options"]["DestinationFee"], 1200);
    assert_eq!(json["BTCSpotPrice"], "40000.00");
    assert_eq!(json["Currency"], "USD");
    assert_eq!(json["Total"], 83690);
    let total_btc: Decimal = json["TotalBTC"].as_str().unwrap().parse().unwrap();
    assert_eq!(total_btc, dec!(2.09225));
    assert_eq!(json["ReferralURL"], "https://ts.la/ref");
    assert_eq!(json["GeneratedByURL"], "https://api.cryptomotor.dev");
    assert!(json["Timestamp"].is_string());
}

#[tokio::test]
async fn variant_defaults_when_omitted() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/model/s").await;

    assert_eq!(status, 200);
    assert_eq!(json["Variant"], "LongRange");
    // currency defaults to USD
    assert_eq!(json["Currency"], "USD");
}

#[tokio::test]
async fn group_exclusivity_applies_through_the_http_surface() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/model/s?options=red,blue").await;

    assert_eq!(status, 200);
    assert_eq!(json["Options"]["Red"], 2500);
    assert!(json["Options"].get("Blue").is_none());
    assert_eq!(json["Total"], 79990 + 2500 + 1200);
}

#[tokio::test]
async fn unknown_model_is_a_404() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/model/cybertruck").await;

    assert_eq!(status, 404);
    assert_eq!(json["Status"], "404");
    assert_eq!(json["Error"], "Model not found");
}

#[tokio::test]
async fn unknown_variant_and_currency_are_404s() {
    let (status, json) = get_json(test_router(dec!(40000)), "/model/s/plaid").await;
    assert_eq!(status, 404);
    assert_eq!(json["Error"], "Variant not found");

    let (status, json) = get_json(test_router(dec!(40000)), "/model/s?currency=EUR").await;
    assert_eq!(status, 404);
    assert_eq!(json["Error"], "Currency not available for this model/variant");
}

#[tokio::test]
async fn zero_spot_price_is_a_503_even_for_valid_requests() {
    let router = test_router(Decimal::ZERO);
    let (status, json) = get_json(router, "/model/s/longrange?currency=USD").await;

    assert_eq!(status, 503);
    assert_eq!(json["Status"], "503");
    assert_eq!(json["Error"], "Unable to get BTC exchange rate");
    assert!(json.get("Total").is_none());
}

#[tokio::test]
async fn available_lists_the_catalog() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/available").await;

    assert_eq!(status, 200);
    let models = json["Models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["Name"], "S");
    assert_eq!(models[0]["Options"].as_array().unwrap().len(), 3);
    assert_eq!(models[0]["Variants"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn help_payload_at_the_base_path() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/").await;

    assert_eq!(status, 200);
    assert_eq!(json["Status"], "200");
    assert!(json["Message"].as_str().unwrap().contains("documentation"));
}

#[tokio::test]
async fn unmatched_paths_are_404s() {
    let router = test_router(dec!(40000));
    let (status, json) = get_json(router, "/nope").await;

    assert_eq!(status, 404);
    assert_eq!(json["Status"], "404");
    assert!(json["Error"].as_str().unwrap().starts_with("Path not found"));
}

#[tokio::test]
async fn routes_nest_under_a_configured_base_path() {
    let mut config = test_config();
    config.base_path = "/tsla/".to_string();
    let state = build_state_with_spot_source(&config, Arc::new(FixedRate(dec!(40000))), None);
    let router = app_router(state, &config);

    let (status, json) = get_json(router.clone(), "/tsla/model/s").await;
    assert_eq!(status, 200);
    assert_eq!(json["Model"], "S");

    // The old root no longer serves quotes.
    let (status, _) = get_json(router, "/model/s").await;
    assert_eq!(status, 404);
}
