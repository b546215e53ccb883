//! Traits for quote orchestration collaborators.

/// Receives usage reports for successfully served quotes.
///
/// The server backs this with Prometheus counters; implementations are
/// expected to be cheap and must not block.
pub trait QuoteUsageSink: Send + Sync {
    /// A quote for `model` was served.
    fn record_model(&self, model: &str);

    /// A quote for `model`/`variant` was served.
    fn record_variant(&self, model: &str, variant: &str);

    /// `option` was applied to a served quote (destination fee included).
    fn record_option(&self, model: &str, variant: &str, option: &str);

    /// The full applied option set of a served quote, sorted and
    /// comma-joined, destination fee excluded.
    fn record_option_set(&self, model: &str, variant: &str, options: &str);
}

/// Sink that drops all usage reports.
pub struct NoOpUsageSink;

impl QuoteUsageSink for NoOpUsageSink {
    fn record_model(&self, _model: &str) {}
    fn record_variant(&self, _model: &str, _variant: &str) {}
    fn record_option(&self, _model: &str, _variant: &str, _option: &str) {}
    fn record_option_set(&self, _model: &str, _variant: &str, _options: &str) {}
}
