//! shelfwatch-state — shared watch state for the stock monitor.
//!
//! Holds the process-wide record of what the monitor last observed:
//! the remembered stock count, a human-readable status, the time of the
//! last check, and a bounded log of recent events.
//!
//! The monitor is the single writer; web handlers read concurrently via
//! [`WatchState::snapshot`], which clones the whole record under one lock
//! acquisition so readers always see a consistent point-in-time view.

pub mod handle;
pub mod log;
pub mod types;

pub use handle::WatchState;
pub use log::EventLog;
pub use types::{TrackedState, WatchStatus};
