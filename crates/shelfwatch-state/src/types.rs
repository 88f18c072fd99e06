//! Domain types for the watch state.

use chrono::{DateTime, Local};
use std::fmt;

use crate::log::EventLog;

/// Human-facing status of the tracked variant, as of the last
/// successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchStatus {
    /// No successful observation yet.
    Starting,
    /// Went from zero to `count`.
    Restocked(u32),
    /// Seller added stock; now at `count`.
    Increased(u32),
    /// Stock is being bought down; now at `count`.
    Decreased(u32),
    /// Stock unchanged at `count`.
    Holding(u32),
    /// Went from some stock to zero.
    SoldOut,
    /// Still at zero.
    OutOfStock,
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchStatus::Starting => write!(f, "starting up"),
            WatchStatus::Restocked(count) => write!(f, "restocked (stock: {count})"),
            WatchStatus::Increased(count) => write!(f, "stock added (stock: {count})"),
            WatchStatus::Decreased(count) => write!(f, "selling down (stock: {count})"),
            WatchStatus::Holding(count) => write!(f, "holding (stock: {count})"),
            WatchStatus::SoldOut => write!(f, "sold out"),
            WatchStatus::OutOfStock => write!(f, "out of stock"),
        }
    }
}

/// Everything the monitor remembers between ticks.
///
/// `last_stock_count` always reflects the count from the most recent
/// successful classification that found the tracked variant. Error ticks
/// (fetch failure, upstream rejection, variant absent) never touch it.
#[derive(Debug, Clone)]
pub struct TrackedState {
    /// Last known stock count for the tracked variant.
    pub last_stock_count: u32,
    /// Current status label.
    pub status: WatchStatus,
    /// When the last poll attempt started (success or not).
    pub last_check: Option<DateTime<Local>>,
    /// Recent events, newest first.
    pub events: EventLog,
}

impl Default for TrackedState {
    fn default() -> Self {
        Self {
            last_stock_count: 0,
            status: WatchStatus::Starting,
            last_check: None,
            events: EventLog::default(),
        }
    }
}
