//! Notification gateway clients
//!
//! Delivery is fire-and-forget: outcomes are logged and never reach the
//! request that triggered them.

use crate::notifications::Notification;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// External collaborator that delivers messages
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message, returning whether delivery succeeded
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> bool;
}

/// Writes messages to the log instead of delivering them
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> bool {
        info!(recipient, subject, "Notification:\n{}", body);
        true
    }
}

/// Payload posted to the mail relay webhook
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    recipient: &'a str,
    subject: &'a str,
    body: &'a str,
    html_body: String,
}

/// Posts messages as JSON to a mail relay
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    http_client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> bool {
        let html_body = Notification {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
        .html_body();

        let payload = WebhookPayload {
            recipient,
            subject,
            body,
            html_body,
        };

        match self.http_client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "Notification webhook returned {} for {}",
                    response.status(),
                    recipient
                );
                false
            }
            Err(e) => {
                warn!("Failed to reach notification webhook for {}: {}", recipient, e);
                false
            }
        }
    }
}

/// Send a notification in the background
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        let delivered = notifier
            .send(
                &notification.recipient,
                &notification.subject,
                &notification.body,
            )
            .await;

        if delivered {
            info!(
                "Notification '{}' sent to {}",
                notification.subject, notification.recipient
            );
        } else {
            warn!(
                "Notification '{}' to {} was not delivered",
                notification.subject, notification.recipient
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier;
        assert!(notifier.send("a@b.kz", "Subject", "Body").await);
    }

    #[tokio::test]
    async fn test_webhook_notifier_reports_unreachable_relay() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/notify");
        assert!(!notifier.send("a@b.kz", "Subject", "Body").await);
    }
}
