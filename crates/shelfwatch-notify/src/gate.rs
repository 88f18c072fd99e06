//! Error-alert debouncing.
//!
//! One shared silence window for every error kind: after an error
//! notification is forwarded, all further error notifications are
//! suppressed until the window has fully elapsed. An HTTP failure
//! followed minutes later by a target-not-found will not re-notify;
//! the timer is shared, not per-category.

use std::time::{Duration, Instant};

/// Silence window applied after a forwarded error notification.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1800);

/// Decides whether an error notification may go out, given the time of
/// the last one that did.
#[derive(Debug)]
pub struct AlertGate {
    window: Duration,
    last_sent: Option<Instant>,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_sent: None,
        }
    }

    /// Whether an error notification at `now` should be forwarded.
    ///
    /// Forwards iff no error has ever been forwarded, or strictly more
    /// than the window has passed since the last forwarded one. On
    /// forwarding, `now` becomes the new window anchor.
    pub fn check(&mut self, now: Instant) -> bool {
        let allow = match self.last_sent {
            None => true,
            Some(last) => now.duration_since(last) > self.window,
        };
        if allow {
            self.last_sent = Some(now);
        }
        allow
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_always_forwards() {
        let mut gate = AlertGate::new();
        let t0 = Instant::now();
        assert!(gate.check(t0));
        // The forward was recorded: an immediate repeat is suppressed.
        assert!(!gate.check(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn suppresses_within_window() {
        let mut gate = AlertGate::new();
        let t0 = Instant::now();

        assert!(gate.check(t0));
        assert!(!gate.check(t0 + Duration::from_secs(1000)));
        assert!(gate.check(t0 + Duration::from_secs(1900)));
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let mut gate = AlertGate::new();
        let t0 = Instant::now();

        assert!(gate.check(t0));
        // Exactly the window is still suppressed; strictly more forwards.
        assert!(!gate.check(t0 + Duration::from_secs(1800)));
        assert!(gate.check(t0 + Duration::from_secs(1801)));
    }

    #[test]
    fn forwarding_resets_the_anchor() {
        let mut gate = AlertGate::with_window(Duration::from_secs(100));
        let t0 = Instant::now();

        assert!(gate.check(t0));
        assert!(gate.check(t0 + Duration::from_secs(101)));
        // The anchor moved to t0+101; t0+150 is inside the new window.
        assert!(!gate.check(t0 + Duration::from_secs(150)));
        assert!(gate.check(t0 + Duration::from_secs(202)));
    }

    #[test]
    fn suppressed_call_does_not_move_anchor() {
        let mut gate = AlertGate::with_window(Duration::from_secs(100));
        let t0 = Instant::now();

        assert!(gate.check(t0));
        assert!(!gate.check(t0 + Duration::from_secs(50)));
        // Were the anchor moved by the suppressed call, t0+101 would
        // still be inside the window.
        assert!(gate.check(t0 + Duration::from_secs(101)));
    }
}
