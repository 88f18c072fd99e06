//! shelfwatch-monitor — the stock-change detection engine.
//!
//! Drives the poll loop: each tick fetches one inventory snapshot,
//! locates the tracked variant, classifies the transition against the
//! remembered count, and notifies — directly for stock changes, through
//! the [`AlertGate`](shelfwatch_notify::AlertGate) for errors.
//!
//! The loop is the outermost recovery boundary: every failure mode is
//! classified and handled inside the tick, and the next tick runs on
//! schedule regardless.

pub mod monitor;
pub mod transition;

pub use monitor::{MonitorConfig, StockMonitor};
pub use transition::{StockTransition, classify};
