//! Application state wiring and tracing setup.

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cryptomotor_core::catalog::PricingCatalog;
use cryptomotor_core::quotes::QuoteService;
use cryptomotor_market_data::{CoinbaseProvider, SpotPriceCache, SpotRateSource};

use crate::config::Config;
use crate::metrics::MetricsUsageSink;

pub struct AppState {
    pub quote_service: Arc<QuoteService>,
    /// Header carrying the real client address, if configured.
    pub client_ip_header: Option<String>,
    /// Render handle for the Prometheus exposition; `None` when no recorder
    /// is installed (tests).
    pub metrics: Option<PrometheusHandle>,
}

pub fn init_tracing(debug: bool) {
    let log_format = std::env::var("CRYPTOMOTOR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

/// Build the application state against the live Coinbase price source.
///
/// Spawns one spot-price refresher per catalog currency; must be called
/// from within a tokio runtime.
pub fn build_state(config: &Config, metrics: Option<PrometheusHandle>) -> Arc<AppState> {
    let catalog = Arc::new(PricingCatalog::new(config.models.clone()));
    let provider = Arc::new(CoinbaseProvider::new());
    let cache = SpotPriceCache::start(
        provider,
        catalog.currencies(),
        Duration::from_secs(config.spot_refresh_seconds),
    );
    build_with_catalog(config, catalog, Arc::new(cache), metrics)
}

/// Build the application state with an explicit spot-rate source.
///
/// Used by the integration tests to avoid live upstream calls.
pub fn build_state_with_spot_source(
    config: &Config,
    spot_rates: Arc<dyn SpotRateSource>,
    metrics: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let catalog = Arc::new(PricingCatalog::new(config.models.clone()));
    build_with_catalog(config, catalog, spot_rates, metrics)
}

fn build_with_catalog(
    config: &Config,
    catalog: Arc<PricingCatalog>,
    spot_rates: Arc<dyn SpotRateSource>,
    metrics: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let quote_service = Arc::new(
        QuoteService::new(
            catalog,
            spot_rates,
            config.referral_url.clone(),
            config.generated_by_url.clone(),
        )
        .with_usage_sink(Arc::new(MetricsUsageSink)),
    );

    let client_ip_header = match config.client_ip_header.trim() {
        "" => None,
        header => Some(header.to_string()),
    };

    Arc::new(AppState {
        quote_service,
        client_ip_header,
        metrics,
    })
}
