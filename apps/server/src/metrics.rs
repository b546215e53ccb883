//! Prometheus metrics registration and the usage-counter sink.

use metrics::{describe_counter, increment_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use cryptomotor_core::quotes::QuoteUsageSink;

/// Install the global Prometheus recorder and describe the counters.
///
/// Call once at startup; the returned handle renders the exposition text
/// for the `/metrics` route.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "http_requests_total",
        "Total number of HTTP requests processed by HTTP status code and method."
    );
    describe_counter!(
        "quote_model_total",
        "Total number of successful requests by vehicle model."
    );
    describe_counter!(
        "quote_model_variant_total",
        "Total number of successful requests by vehicle model and variant."
    );
    describe_counter!(
        "quote_model_variant_option_total",
        "Total number of successful requests by vehicle model, variant and option."
    );
    describe_counter!(
        "quote_model_variant_options_total",
        "Total number of successful requests by vehicle model, variant and all valid options."
    );

    Ok(handle)
}

/// Usage sink backed by the Prometheus counters.
pub struct MetricsUsageSink;

impl QuoteUsageSink for MetricsUsageSink {
    fn record_model(&self, model: &str) {
        increment_counter!("quote_model_total", "model" => model.to_string());
    }

    fn record_variant(&self, model: &str, variant: &str) {
        increment_counter!(
            "quote_model_variant_total",
            "model" => model.to_string(),
            "variant" => variant.to_string()
        );
    }

    fn record_option(&self, model: &str, variant: &str, option: &str) {
        increment_counter!(
            "quote_model_variant_option_total",
            "model" => model.to_string(),
            "variant" => variant.to_string(),
            "option" => option.to_string()
        );
    }

    fn record_option_set(&self, model: &str, variant: &str, options: &str) {
        increment_counter!(
            "quote_model_variant_options_total",
            "model" => model.to_string(),
            "variant" => variant.to_string(),
            "options" => options.to_string()
        );
    }
}
