//! Server configuration from the environment.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use garden_core::defaults;

/// Server-level settings.
///
/// AI and eWeLink settings are read by their own crates
/// (`OpenAIConfig::from_env`, `EwelinkConfig::from_env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` keeps plants in memory.
    pub database_url: Option<String>,
    /// Comma-separated origin list; `None` or `*` allows any origin.
    pub allowed_origins: Option<String>,
    pub ntfy_base_url: String,
    /// Topic for automatic watering alerts; alerts are skipped without one.
    pub ntfy_topic: Option<String>,
    pub notify_cooldown: Duration,
    /// Period of the background watering check; `None` disables it.
    pub watering_check_interval: Option<Duration>,
    pub floor_count: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            database_url: None,
            allowed_origins: None,
            ntfy_base_url: defaults::NTFY_BASE_URL.to_string(),
            ntfy_topic: None,
            notify_cooldown: Duration::from_secs(defaults::ALERT_COOLDOWN_SECS),
            watering_check_interval: None,
            floor_count: defaults::FLOOR_COUNT,
        }
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    var(key).and_then(|v| match v.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %v, "Ignoring unparsable setting");
            None
        }
    })
}

impl AppConfig {
    /// Read the configuration from the environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | HOST | 0.0.0.0 |
    /// | PORT | 3000 |
    /// | DATABASE_URL | (in-memory store) |
    /// | ALLOWED_ORIGINS | any origin |
    /// | NTFY_BASE_URL | https://ntfy.sh |
    /// | NTFY_TOPIC | (alerts disabled) |
    /// | NOTIFY_COOLDOWN_SECS | 3600 |
    /// | WATERING_CHECK_INTERVAL_SECS | 0 (disabled) |
    /// | FLOOR_COUNT | 3 |
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            host: var("HOST").unwrap_or(base.host),
            port: parsed("PORT").unwrap_or(base.port),
            database_url: var("DATABASE_URL"),
            allowed_origins: var("ALLOWED_ORIGINS"),
            ntfy_base_url: var("NTFY_BASE_URL").unwrap_or(base.ntfy_base_url),
            ntfy_topic: var("NTFY_TOPIC"),
            notify_cooldown: parsed("NOTIFY_COOLDOWN_SECS")
                .map(Duration::from_secs)
                .unwrap_or(base.notify_cooldown),
            watering_check_interval: parsed::<u64>("WATERING_CHECK_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            floor_count: parsed::<i32>("FLOOR_COUNT")
                .filter(|n| *n > 0)
                .unwrap_or(base.floor_count),
        }
    }
}

/// Parse a comma-separated origin list, dropping blank and invalid entries.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// CORS policy for the configured origins.
pub fn cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    match allowed_origins.map(str::trim) {
        None | Some("*") | Some("") => layer.allow_origin(Any),
        Some(list) => layer.allow_origin(AllowOrigin::list(parse_allowed_origins(list))),
    }
}
