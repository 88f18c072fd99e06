//! The poll loop and per-tick decision process.

use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use shelfwatch_notify::{AlertGate, Notifier};
use shelfwatch_state::{WatchState, WatchStatus};
use shelfwatch_upstream::{FetchOutcome, InventorySource};

use crate::transition::{StockTransition, classify};

/// What to watch and how often.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Display name of the tracked product.
    pub product_name: String,
    /// Attribute-value id identifying the tracked variant.
    pub target_attr_id: i64,
    /// Fixed poll period; no backoff, no jitter.
    pub interval: Duration,
}

/// Runs the poll loop: one fetch + classification + notification per tick.
///
/// Single writer of the shared [`WatchState`]; error notifications go
/// through the [`AlertGate`] so a persistent fault alerts at most once
/// per silence window.
pub struct StockMonitor<S, N> {
    config: MonitorConfig,
    source: S,
    notifier: N,
    state: WatchState,
    gate: AlertGate,
}

impl<S: InventorySource, N: Notifier> StockMonitor<S, N> {
    pub fn new(config: MonitorConfig, source: S, notifier: N, state: WatchState) -> Self {
        Self {
            config,
            source,
            notifier,
            state,
            gate: AlertGate::new(),
        }
    }

    /// Run until the shutdown signal flips.
    ///
    /// The signal is checked both before each fetch and during the
    /// inter-tick sleep, so shutdown latency is bounded by the fetch
    /// timeout rather than the poll interval.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            target = %self.config.product_name,
            attr_id = self.config.target_attr_id,
            interval_secs = self.config.interval.as_secs(),
            "stock monitor started"
        );
        self.announce().await;

        loop {
            if *shutdown.borrow() {
                break;
            }
            self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.changed() => {
                    info!("stock monitor shutting down");
                    break;
                }
            }
        }
    }

    /// One poll: fetch, locate the tracked variant, classify, act.
    pub async fn tick(&mut self) {
        self.state.begin_tick(Local::now()).await;

        match self.source.fetch().await {
            FetchOutcome::Snapshot(snapshot) => {
                let matches: Vec<_> = snapshot.matches(self.config.target_attr_id).collect();
                if matches.is_empty() {
                    // Absence is a transient lookup failure, not zero
                    // stock; the remembered count stays put.
                    self.report_error(format!(
                        "target sku attr id {} not found in snapshot",
                        self.config.target_attr_id
                    ))
                    .await;
                    return;
                }

                // More than one matching record is unexpected but allowed:
                // each is classified independently in payload order, so
                // the last match's count wins.
                let observations: Vec<(u32, f64)> =
                    matches.iter().map(|sku| (sku.count, sku.price)).collect();
                for (count, price) in observations {
                    self.observe(count, price).await;
                }
            }
            FetchOutcome::FetchFailed(detail) => {
                self.report_error(format!("fetch failed: {detail}")).await;
            }
            FetchOutcome::BusinessRejected(detail) => {
                self.report_error(format!("upstream rejected request: {detail}"))
                    .await;
            }
        }
    }

    /// Classify one observed count against the remembered one and apply
    /// the outcome: status, remembered count, event line, notification.
    ///
    /// The non-notifying states (Holding, OutOfStock) log their line
    /// only when the label changes, so identical ticks leave the log
    /// alone.
    async fn observe(&mut self, current: u32, price: f64) {
        let before = self.state.snapshot().await;
        let prev = before.last_stock_count;

        let (status, event, notification) = match classify(prev, current) {
            StockTransition::Restocked => (
                WatchStatus::Restocked(current),
                Some(format!("restock detected: {current}")),
                Some(format!(
                    "back in stock!\nproduct: {}\nstock: {current}\nprice: {price}",
                    self.config.product_name
                )),
            ),
            StockTransition::Increased { diff } => (
                WatchStatus::Increased(current),
                Some(format!("stock increased: {prev} -> {current}")),
                Some(format!(
                    "stock increased (+{diff})\ncurrent: {current}\nprevious: {prev}"
                )),
            ),
            StockTransition::Decreased { diff } => (
                WatchStatus::Decreased(current),
                Some(format!("stock decreased: {prev} -> {current}")),
                Some(format!(
                    "stock decreased (-{diff})\nsomeone is buying, move fast\ncurrent: {current}"
                )),
            ),
            StockTransition::Unchanged => {
                let status = WatchStatus::Holding(current);
                // Heartbeat line only when the label actually changed,
                // to keep the log from filling with duplicates.
                let event = (before.status != status).then(|| format!("holding at {current}"));
                (status, event, None)
            }
            StockTransition::SoldOut => (
                WatchStatus::SoldOut,
                Some("sold out".to_string()),
                Some("sold out, stock back to zero".to_string()),
            ),
            StockTransition::StillEmpty => {
                // Same change-only rule as Holding: the out-of-stock
                // line appears once, not once per tick.
                let event = (before.status != WatchStatus::OutOfStock)
                    .then(|| "still out of stock".to_string());
                (WatchStatus::OutOfStock, event, None)
            }
        };

        if let Some(event) = &event {
            info!(%event, prev, current, "stock observation");
        } else {
            debug!(prev, current, "stock unchanged");
        }
        self.state
            .apply_transition(status, current, event.as_deref())
            .await;

        if let Some(text) = notification {
            self.notifier.send(&text).await;
        }
    }

    /// Log an error tick and forward it to the channel if the gate allows.
    async fn report_error(&mut self, message: String) {
        warn!(%message, "tick failed");
        self.state.push_event(&format!("error: {message}")).await;

        if self.gate.check(Instant::now()) {
            let text = format!(
                "watch alert\nreason: {message}\n(repeat alerts are silenced for 30 minutes)"
            );
            self.notifier.send(&text).await;
        }
    }

    /// One-time startup announcement, sent before the first tick.
    async fn announce(&self) {
        self.state
            .push_event(&format!(
                "watching {} (attr id: {})",
                self.config.product_name, self.config.target_attr_id
            ))
            .await;
        let text = format!(
            "stock watch deployed\ntarget: {}\npolicy: notify on every stock change",
            self.config.product_name
        );
        self.notifier.send(&text).await;
    }
}
