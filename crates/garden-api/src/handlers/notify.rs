//! Manual push notifications.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use garden_core::{defaults, NotifyPriority, PushMessage};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::services::is_valid_topic;
use crate::state::AppState;

/// ntfy priority given by name (`"high"`) or level (`4`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriorityInput {
    Level(u8),
    Name(String),
}

impl PriorityInput {
    fn resolve(&self) -> Result<NotifyPriority, ApiError> {
        let parsed: garden_core::Result<NotifyPriority> = match self {
            PriorityInput::Level(n) => n.to_string().parse(),
            PriorityInput::Name(s) => s.parse(),
        };
        parsed.map_err(ApiError::from)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NotifyRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "high")]
    pub priority: Option<PriorityInput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyResponse {
    pub success: bool,
    pub message: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[utoipa::path(post, path = "/api/v1/notify", tag = "Notifications",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Notification delivered", body = NotifyResponse),
        (status = 400, description = "Missing or invalid topic"),
        (status = 500, description = "Delivery failed"),
    ))]
pub async fn send_notification(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NotifyRequest>,
) -> Result<Json<NotifyResponse>, ApiError> {
    let topic = non_blank(req.topic)
        .ok_or_else(|| ApiError::BadRequest("topic is required".to_string()))?;
    let topic = topic.trim();
    if !is_valid_topic(topic) {
        return Err(ApiError::BadRequest(format!("invalid ntfy topic: {}", topic)));
    }

    let priority = match &req.priority {
        Some(p) => p.resolve()?,
        None => NotifyPriority::Default,
    };

    let message = PushMessage {
        title: non_blank(req.title).unwrap_or_else(|| defaults::MANUAL_NOTIFY_TITLE.to_string()),
        body: non_blank(req.message).unwrap_or_else(|| defaults::MANUAL_NOTIFY_BODY.to_string()),
        priority,
        tags: defaults::ALERT_TAGS.to_string(),
    };

    state.dispatcher.notifier().send(topic, &message).await?;

    info!(
        subsystem = "api",
        op = "notify",
        topic,
        priority = priority.as_str(),
        "Manual notification sent"
    );

    Ok(Json(NotifyResponse {
        success: true,
        message: "Notificação enviada!".to_string(),
    }))
}
