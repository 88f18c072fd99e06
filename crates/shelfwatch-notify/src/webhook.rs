//! WeCom-style webhook channel.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Delivery is fire-and-forget; this timeout caps the wait.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors constructing the notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// What happened to one outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the webhook endpoint.
    Sent,
    /// No webhook configured; notifications are disabled.
    Ignored,
    /// The channel call failed. Logged locally, never escalated.
    Failed,
}

/// An outbound notification channel. The monitor only sees this trait,
/// so tests can record messages instead of sending them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, content: &str) -> Delivery;
}

#[derive(Serialize)]
struct TextMessage<'a> {
    msgtype: &'static str,
    text: TextBody<'a>,
}

#[derive(Serialize)]
struct TextBody<'a> {
    content: &'a str,
    mentioned_list: [&'static str; 1],
}

/// Webhook-backed notifier. An absent URL silently disables sending.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self { http, url })
    }

    /// Whether a webhook destination is configured.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, content: &str) -> Delivery {
        let Some(url) = &self.url else {
            debug!("no webhook configured, dropping notification");
            return Delivery::Ignored;
        };

        let message = TextMessage {
            msgtype: "text",
            text: TextBody {
                content,
                mentioned_list: ["@all"],
            },
        };

        match self.http.post(url).json(&message).send().await {
            Ok(response) if response.status().is_success() => Delivery::Sent,
            Ok(response) => {
                warn!(status = %response.status(), "webhook rejected notification");
                Delivery::Failed
            }
            Err(e) => {
                warn!(error = %e, "webhook delivery failed");
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wire_shape() {
        let message = TextMessage {
            msgtype: "text",
            text: TextBody {
                content: "back in stock!",
                mentioned_list: ["@all"],
            },
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "msgtype": "text",
                "text": { "content": "back in stock!", "mentioned_list": ["@all"] }
            })
        );
    }

    #[tokio::test]
    async fn unconfigured_notifier_ignores_sends() {
        let notifier = WebhookNotifier::new(None).unwrap();
        assert!(!notifier.is_configured());
        assert_eq!(notifier.send("hello").await, Delivery::Ignored);
    }

    #[tokio::test]
    async fn unreachable_webhook_fails_without_error() {
        let notifier = WebhookNotifier::new(Some("http://127.0.0.1:1/hook".to_string())).unwrap();
        assert!(notifier.is_configured());
        assert_eq!(notifier.send("hello").await, Delivery::Failed);
    }
}
