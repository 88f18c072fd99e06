//! Shared handle over the tracked state.
//!
//! `WatchState` is `Clone` + `Send` + `Sync` (backed by `Arc<RwLock<…>>`)
//! and can be shared between the monitor task and web handlers. Each
//! mutator takes the write lock exactly once and applies all related
//! fields together, so a concurrent reader never sees a status label
//! from one tick paired with a stock count from another.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;

use crate::types::{TrackedState, WatchStatus};

/// Cloneable handle to the shared [`TrackedState`].
#[derive(Debug, Clone, Default)]
pub struct WatchState {
    inner: Arc<RwLock<TrackedState>>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state, taken under a single read lock.
    pub async fn snapshot(&self) -> TrackedState {
        self.inner.read().await.clone()
    }

    /// Record the start of a poll attempt.
    pub async fn begin_tick(&self, now: DateTime<Local>) {
        self.inner.write().await.last_check = Some(now);
    }

    /// Append an event without touching status or count.
    pub async fn push_event(&self, message: &str) {
        self.inner.write().await.events.push(message);
    }

    /// Apply one classified observation: status, remembered count, and an
    /// optional event line, all under one write lock.
    pub async fn apply_transition(&self, status: WatchStatus, count: u32, event: Option<&str>) {
        let mut state = self.inner.write().await;
        state.status = status;
        state.last_stock_count = count;
        if let Some(message) = event {
            state.events.push(message);
        }
    }
}
