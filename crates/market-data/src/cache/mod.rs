//! Per-currency spot-price cache.
//!
//! One refresher task runs per currency. Each task owns the last fetched
//! rate and hands it out through a request/response channel: serving a
//! caller immediately triggers the next upstream fetch, so a consumed value
//! is always replaced ("serve-then-refresh"). When no caller arrives within
//! the idle interval the task fetches anyway, which bounds staleness by the
//! idle interval without fetching once per request.
//!
//! Failure policy: any failed fetch leaves the zero sentinel in the cell.
//! If the *first* fetch for a currency fails, that currency's periodic
//! refresh is permanently disabled (treated as unsupported at boot, no
//! retry storm against a dead pair, no self-heal) - but a caller-triggered
//! refresh still runs, so a pair that comes back upstream is picked up on
//! the next consumption.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::provider::SpotPriceProvider;

/// Consumer-facing view of the cache.
///
/// `get_spot` blocks until the currency's refresher replies. The returned
/// rate is zero when the exchange rate is unavailable; callers must treat
/// zero as "no rate", never as a price.
#[async_trait]
pub trait SpotRateSource: Send + Sync {
    async fn get_spot(&self, currency: &str) -> Decimal;
}

struct RateRequest {
    reply: oneshot::Sender<Decimal>,
}

/// Spot-price cache with one background refresher per currency.
pub struct SpotPriceCache {
    refreshers: HashMap<String, mpsc::Sender<RateRequest>>,
}

impl SpotPriceCache {
    /// Spawn one refresher task per currency.
    ///
    /// # Arguments
    ///
    /// * `provider` - Upstream price source shared by all refreshers
    /// * `currencies` - Distinct currencies to track, any case
    /// * `idle_interval` - Upper bound on staleness when no caller arrives
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        provider: Arc<dyn SpotPriceProvider>,
        currencies: impl IntoIterator<Item = String>,
        idle_interval: Duration,
    ) -> Self {
        let mut refreshers = HashMap::new();
        for currency in currencies {
            let currency = currency.to_uppercase();
            let (tx, rx) = mpsc::channel(1);
            tokio::spawn(refresh_loop(
                provider.clone(),
                currency.clone(),
                idle_interval,
                rx,
            ));
            refreshers.insert(currency, tx);
        }
        Self { refreshers }
    }

    /// Currencies this cache tracks, uppercased.
    pub fn currencies(&self) -> Vec<String> {
        self.refreshers.keys().cloned().collect()
    }
}

#[async_trait]
impl SpotRateSource for SpotPriceCache {
    async fn get_spot(&self, currency: &str) -> Decimal {
        let Some(requests) = self.refreshers.get(&currency.to_uppercase()) else {
            // No refresher means the currency is priced nowhere in the
            // catalog; surface the unavailable sentinel instead of hanging.
            return Decimal::ZERO;
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        if requests.send(RateRequest { reply: reply_tx }).await.is_err() {
            return Decimal::ZERO;
        }
        reply_rx.await.unwrap_or(Decimal::ZERO)
    }
}

/// Fetch one rate, mapping any failure to the zero sentinel.
async fn fetch(provider: &dyn SpotPriceProvider, currency: &str) -> Decimal {
    match provider.best_bid(currency).await {
        Ok(price) => price,
        Err(e) => {
            warn!(
                "unable to get the BTC exchange rate for {} from {}: {}",
                currency,
                provider.id(),
                e
            );
            Decimal::ZERO
        }
    }
}

async fn refresh_loop(
    provider: Arc<dyn SpotPriceProvider>,
    currency: String,
    idle_interval: Duration,
    mut requests: mpsc::Receiver<RateRequest>,
) {
    let mut last = fetch(provider.as_ref(), &currency).await;

    // A failed first fetch marks the pair unsupported: the periodic branch
    // stays off for the lifetime of the process.
    let periodic_enabled = !last.is_zero();
    if !periodic_enabled {
        warn!("periodic refresh disabled for {}", currency);
    }

    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else { break };
                let _ = request.reply.send(last);
                last = fetch(provider.as_ref(), &currency).await;
            }
            _ = tokio::time::sleep(idle_interval) => {
                if periodic_enabled {
                    debug!("idle refresh for {}", currency);
                    last = fetch(provider.as_ref(), &currency).await;
                }
            }
        }
    }
}
