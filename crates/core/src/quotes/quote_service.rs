//! Quote orchestration: request normalization, spot lookup, assembly and
//! usage reporting.

use std::sync::Arc;

use cryptomotor_market_data::SpotRateSource;
use log::debug;

use crate::catalog::{ModelSummary, PricingCatalog};
use crate::errors::QuoteError;

use super::calculator::{compute_quote, DESTINATION_FEE};
use super::quote_model::{PricedQuote, Quote};
use super::quotes_traits::{NoOpUsageSink, QuoteUsageSink};

/// Glue between raw request parameters, the spot-price cache and the quote
/// calculator.
pub struct QuoteService {
    catalog: Arc<PricingCatalog>,
    spot_rates: Arc<dyn SpotRateSource>,
    usage_sink: Arc<dyn QuoteUsageSink>,
    referral_url: String,
    generated_by_url: String,
}

impl QuoteService {
    pub fn new(
        catalog: Arc<PricingCatalog>,
        spot_rates: Arc<dyn SpotRateSource>,
        referral_url: String,
        generated_by_url: String,
    ) -> Self {
        Self {
            catalog,
            spot_rates,
            usage_sink: Arc::new(NoOpUsageSink),
            referral_url,
            generated_by_url,
        }
    }

    /// Sets the usage sink for this service.
    pub fn with_usage_sink(mut self, usage_sink: Arc<dyn QuoteUsageSink>) -> Self {
        self.usage_sink = usage_sink;
        self
    }

    /// Model summaries for the catalog listing.
    pub fn available(&self) -> Vec<ModelSummary> {
        self.catalog.summaries()
    }

    /// Resolve one quote request from raw caller-provided strings.
    ///
    /// `variant` may be empty (the model's default variant applies);
    /// `options` is the raw comma-separated list from the request. Blocks on
    /// the spot-price cache for the requested currency.
    pub async fn get_quote(
        &self,
        model: &str,
        variant: &str,
        currency: &str,
        options: &str,
    ) -> Result<Quote, QuoteError> {
        let model = model.trim();
        let variant = variant.trim();
        let currency = currency.trim().to_uppercase();
        let options: Vec<String> = options
            .split(',')
            .map(|option| option.trim().to_lowercase())
            .filter(|option| !option.is_empty())
            .collect();

        let spot_price = self.spot_rates.get_spot(&currency).await;
        debug!("spot price for {}: {}", currency, spot_price);

        let priced = compute_quote(
            self.catalog.as_ref(),
            model,
            variant,
            &currency,
            &options,
            spot_price,
        )?;
        self.record_usage(&priced);

        Ok(Quote::from_priced(
            priced,
            self.referral_url.clone(),
            self.generated_by_url.clone(),
        ))
    }

    fn record_usage(&self, priced: &PricedQuote) {
        let model = priced.model.to_uppercase();
        self.usage_sink.record_model(&model);
        self.usage_sink.record_variant(&model, &priced.variant);

        let mut applied: Vec<&str> = priced.options.keys().map(String::as_str).collect();
        applied.sort_unstable();
        for option in &applied {
            self.usage_sink.record_option(&model, &priced.variant, option);
        }

        // The option-set key excludes the implicit fee.
        let fee_display = crate::catalog::display_name(DESTINATION_FEE);
        let set: Vec<&str> = applied
            .iter()
            .copied()
            .filter(|option| *option != fee_display)
            .collect();
        self.usage_sink
            .record_option_set(&model, &priced.variant, &set.join(","));
    }
}
