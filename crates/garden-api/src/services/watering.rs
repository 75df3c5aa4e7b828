//! Watering calculation shared by the HTTP endpoints and the scheduler.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use garden_core::notify::REASON_NOTHING_TO_WATER;
use garden_core::{
    summarize, Error, NotificationResult, Result, SensorSource, WateringRecommendation,
    WateringSummary,
};

use crate::state::AppState;

/// Message returned when the store holds no plants.
pub const NO_PLANTS_MESSAGE: &str = "Nenhuma planta registada";

/// Result of a watering calculation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WateringReport {
    pub recommendations: Vec<WateringRecommendation>,
    pub summary: WateringSummary,
    /// `null` when notification was not requested.
    pub notification: Option<NotificationResult>,
    pub sensor_source: SensorSource,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WateringReport {
    fn empty(sensor_source: SensorSource) -> Self {
        Self {
            recommendations: Vec::new(),
            summary: WateringSummary::default(),
            notification: None,
            sensor_source,
            timestamp: Utc::now(),
            message: Some(NO_PLANTS_MESSAGE.to_string()),
        }
    }
}

async fn assess(
    state: &AppState,
    floor: Option<i32>,
) -> Result<(Vec<WateringRecommendation>, SensorSource)> {
    let mut plants = state.plants.list().await?;
    if let Some(floor) = floor {
        plants.retain(|p| p.floor == floor);
    }

    let snapshot = state.sensors.read().await?;
    let recommendations = state
        .planner
        .plan(&plants, &snapshot.humidity_by_floor());
    Ok((recommendations, snapshot.source))
}

/// Recommendations for every plant (or one floor), optionally alerting.
///
/// Manual calculations are never throttled by the alert cooldown.
pub async fn calculate(state: &AppState, floor: Option<i32>, notify: bool) -> Result<WateringReport> {
    if let Some(f) = floor {
        if f < 1 {
            return Err(Error::InvalidInput(format!(
                "floor must be at least 1, got {}",
                f
            )));
        }
    }

    let start = Instant::now();
    let (recommendations, sensor_source) = assess(state, floor).await?;
    if recommendations.is_empty() {
        return Ok(WateringReport::empty(sensor_source));
    }

    let summary = summarize(&recommendations);
    let notification = if notify {
        Some(state.dispatcher.dispatch(&recommendations).await)
    } else {
        None
    };

    info!(
        subsystem = "watering",
        op = "calculate",
        floor = ?floor,
        result_count = recommendations.len(),
        plants_needing_water = summary.needs_water + summary.light_water,
        source = sensor_source.as_str(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Watering calculated"
    );

    Ok(WateringReport {
        recommendations,
        summary,
        notification,
        sensor_source,
        timestamp: Utc::now(),
        message: None,
    })
}

/// Whole-garden check that alerts at most once per cooldown window.
pub async fn scheduled_check(state: &AppState) -> Result<WateringReport> {
    let start = Instant::now();
    let (recommendations, sensor_source) = assess(state, None).await?;
    if recommendations.is_empty() {
        return Ok(WateringReport::empty(sensor_source));
    }

    let summary = summarize(&recommendations);
    let actionable = recommendations.iter().any(|r| r.status.is_actionable());

    let notification = if !actionable {
        NotificationResult::skipped(REASON_NOTHING_TO_WATER)
    } else {
        match state.cooldown.try_claim().await {
            Ok(claim) => {
                let result = state.dispatcher.dispatch(&recommendations).await;
                if !result.sent {
                    state.cooldown.release(claim).await;
                }
                result
            }
            Err(remaining) => {
                debug!(
                    subsystem = "watering",
                    op = "check",
                    remaining_secs = remaining.as_secs(),
                    "Alert suppressed by cooldown"
                );
                NotificationResult::skipped(cooldown_reason(remaining))
            }
        }
    };

    info!(
        subsystem = "watering",
        op = "check",
        result_count = recommendations.len(),
        plants_needing_water = summary.needs_water + summary.light_water,
        sent = notification.sent,
        duration_ms = start.elapsed().as_millis() as u64,
        "Watering check completed"
    );

    Ok(WateringReport {
        recommendations,
        summary,
        notification: Some(notification),
        sensor_source,
        timestamp: Utc::now(),
        message: None,
    })
}

fn cooldown_reason(remaining: Duration) -> String {
    let minutes = remaining.as_secs().div_ceil(60).max(1);
    format!("Alerta enviado recentemente; próximo em {} min", minutes)
}

/// Run [`scheduled_check`] every `every` until the task is dropped.
///
/// The first check happens one full period after start.
pub async fn run_scheduled_checks(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    interval.tick().await;

    info!(
        subsystem = "watering",
        interval_secs = every.as_secs(),
        "Scheduled watering checks started"
    );

    loop {
        interval.tick().await;
        if let Err(e) = scheduled_check(&state).await {
            warn!(subsystem = "watering", op = "check", error = %e, "Scheduled watering check failed");
        }
    }
}
