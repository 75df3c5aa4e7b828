//! Watering alert formatting and dispatch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::defaults;
use crate::error::Error;
use crate::models::{NotificationResult, NotifyPriority, PushMessage, WateringRecommendation};
use crate::traits::Notifier;

/// Reason reported when no push topic is configured.
pub const REASON_NO_TOPIC: &str = "NTFY_TOPIC não configurado";

/// Reason reported when every plant is within its target.
pub const REASON_NOTHING_TO_WATER: &str = "Nenhuma planta precisa de água";

/// Build the alert for the plants that need water, if any.
///
/// Returns the message and the number of plants it lists.
pub fn build_alert(recommendations: &[WateringRecommendation]) -> Option<(PushMessage, usize)> {
    let actionable: Vec<&WateringRecommendation> = recommendations
        .iter()
        .filter(|r| r.status.is_actionable())
        .collect();
    if actionable.is_empty() {
        return None;
    }

    let lines: Vec<String> = actionable
        .iter()
        .map(|r| {
            format!(
                "• {} ({}º andar): {} spray(s)",
                r.plant_name, r.floor, r.sprays_needed
            )
        })
        .collect();
    let total_sprays: u32 = actionable.iter().map(|r| r.sprays_needed).sum();
    let body = format!(
        "🌱 Rega Necessária\n\n{}\n\nTotal: {} spray(s) em {} planta(s)",
        lines.join("\n"),
        total_sprays,
        actionable.len()
    );

    let priority = if actionable
        .iter()
        .any(|r| r.deficit_pct > defaults::HIGH_PRIORITY_DEFICIT)
    {
        NotifyPriority::High
    } else {
        NotifyPriority::Default
    };

    Some((
        PushMessage {
            title: defaults::ALERT_TITLE.to_string(),
            body,
            priority,
            tags: defaults::ALERT_TAGS.to_string(),
        },
        actionable.len(),
    ))
}

/// Sends watering alerts through an optional notifier.
///
/// Dispatch never fails: delivery problems come back as
/// `NotificationResult { sent: false, reason }`.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    topic: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, topic: Option<String>) -> Self {
        let topic = topic.filter(|t| !t.trim().is_empty());
        Self { notifier, topic }
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub async fn dispatch(&self, recommendations: &[WateringRecommendation]) -> NotificationResult {
        let Some(topic) = self.topic.as_deref() else {
            return NotificationResult::skipped(REASON_NO_TOPIC);
        };

        let Some((message, count)) = build_alert(recommendations) else {
            return NotificationResult::skipped(REASON_NOTHING_TO_WATER);
        };

        match self.notifier.send(topic, &message).await {
            Ok(()) => {
                info!(
                    subsystem = "notify",
                    op = "dispatch",
                    plants_needing_water = count,
                    priority = message.priority.as_str(),
                    "Watering alert sent"
                );
                NotificationResult::sent(count)
            }
            Err(e) => {
                let reason = match e {
                    Error::Notification(msg) => msg,
                    other => other.to_string(),
                };
                warn!(
                    subsystem = "notify",
                    op = "dispatch",
                    error = %reason,
                    "Watering alert not delivered"
                );
                NotificationResult::skipped(reason)
            }
        }
    }
}

/// Suppresses repeated automatic alerts inside a time window.
#[derive(Debug)]
pub struct AlertCooldown {
    window: Duration,
    last_sent: Mutex<Option<Instant>>,
}

impl Default for AlertCooldown {
    fn default() -> Self {
        Self::new(Duration::from_secs(defaults::ALERT_COOLDOWN_SECS))
    }
}

impl AlertCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time left before another alert may go out. Zero when ready.
    pub async fn remaining(&self) -> Duration {
        match *self.last_sent.lock().await {
            Some(at) => self.window.saturating_sub(at.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.remaining().await.is_zero()
    }

    /// Reserve the window for an alert about to go out.
    ///
    /// The check and the stamp happen under one lock, so of two concurrent
    /// callers only one gets the claim. `Err` carries the time left.
    pub async fn try_claim(&self) -> std::result::Result<CooldownClaim, Duration> {
        let mut last_sent = self.last_sent.lock().await;
        if let Some(at) = *last_sent {
            let remaining = self.window.saturating_sub(at.elapsed());
            if !remaining.is_zero() {
                return Err(remaining);
            }
        }

        let stamped = Instant::now();
        let previous = last_sent.replace(stamped);
        Ok(CooldownClaim { stamped, previous })
    }

    /// Give the window back after a failed delivery.
    ///
    /// A no-op when a later claim has already replaced this one.
    pub async fn release(&self, claim: CooldownClaim) {
        let mut last_sent = self.last_sent.lock().await;
        if *last_sent == Some(claim.stamped) {
            *last_sent = claim.previous;
        }
    }
}

/// A reserved cooldown window; see [`AlertCooldown::try_claim`].
#[derive(Debug)]
#[must_use = "release the claim when the alert is not delivered"]
pub struct CooldownClaim {
    stamped: Instant,
    previous: Option<Instant>,
}
