//! shelfwatch-notify — outbound alerting.
//!
//! Two pieces: the [`WebhookNotifier`], a fire-and-forget WeCom-style
//! text webhook with a short bounded timeout, and the [`AlertGate`],
//! the debounce policy that keeps a persistent fault from flooding the
//! channel. Delivery failures degrade alerting silently; they are never
//! escalated.

pub mod gate;
pub mod webhook;

pub use gate::AlertGate;
pub use webhook::{Delivery, Notifier, NotifyError, WebhookNotifier};
