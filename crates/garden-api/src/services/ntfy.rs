//! ntfy.sh push delivery.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Client;
use tracing::{debug, warn};

use garden_core::{defaults, Error, Notifier, PushMessage, Result};

/// Publishes push messages to an ntfy server.
///
/// Each message is a `POST {base_url}/{topic}` with the body as plain text
/// and the title, priority and tags in the `Title`, `Priority` and `Tags`
/// headers.
pub struct NtfyNotifier {
    client: Client,
    base_url: String,
}

impl NtfyNotifier {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::NOTIFY_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// ntfy topic names: 1-64 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && topic.len() <= 64
        && topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// UTF-8 header values (titles with accents) are sent as raw bytes; ntfy
// reads them as UTF-8.
fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|_| Error::Notification(format!("invalid {} header", name)))
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn send(&self, topic: &str, message: &PushMessage) -> Result<()> {
        let topic = topic.trim();
        if !is_valid_topic(topic) {
            return Err(Error::InvalidInput(format!("invalid ntfy topic: {}", topic)));
        }

        let start = Instant::now();
        let url = format!("{}/{}", self.base_url, topic);

        let response = self
            .client
            .post(&url)
            .header("Title", header_value("Title", &message.title)?)
            .header("Priority", message.priority.as_str())
            .header("Tags", header_value("Tags", &message.tags)?)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(message.body.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(subsystem = "notify", component = "ntfy", error = %e, "Push request failed");
                Error::Notification(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                subsystem = "notify",
                component = "ntfy",
                status_code = status.as_u16(),
                "Push rejected"
            );
            return Err(Error::Notification(format!("HTTP {}", status.as_u16())));
        }

        debug!(
            subsystem = "notify",
            component = "ntfy",
            op = "send",
            topic,
            duration_ms = start.elapsed().as_millis() as u64,
            "Push delivered"
        );
        Ok(())
    }
}
