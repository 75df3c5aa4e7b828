//! eWeLink configuration.

use std::fmt;

use garden_core::{defaults, FloorDeviceIds};

/// Account credentials for the eWeLink open API.
#[derive(Clone, PartialEq, Eq)]
pub struct EwelinkCredentials {
    pub email: String,
    pub password: String,
    pub app_id: String,
    pub app_secret: String,
}

impl fmt::Debug for EwelinkCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EwelinkCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the eWeLink cloud.
#[derive(Debug, Clone)]
pub struct EwelinkConfig {
    /// `None` when any of the four credential variables is missing.
    pub credentials: Option<EwelinkCredentials>,
    /// Regional API base URL.
    pub api_url: String,
    pub country_code: String,
    /// Explicit device id per floor; takes precedence over name/tag matching.
    pub floor_devices: FloorDeviceIds,
    pub floor_count: i32,
    pub timeout_seconds: u64,
}

impl Default for EwelinkConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_url: defaults::EWELINK_API_URL.to_string(),
            country_code: defaults::EWELINK_COUNTRY_CODE.to_string(),
            floor_devices: FloorDeviceIds::new(),
            floor_count: defaults::FLOOR_COUNT,
            timeout_seconds: defaults::SENSOR_TIMEOUT_SECS,
        }
    }
}

fn non_blank(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EwelinkConfig {
    /// Read the configuration from the environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | EWELINK_EMAIL, EWELINK_PASSWORD, EWELINK_APP_ID, EWELINK_APP_SECRET | (none) |
    /// | EWELINK_API_URL | https://eu-apia.coolkit.cc |
    /// | EWELINK_COUNTRY_CODE | +351 |
    /// | EWELINK_DEVICE_FLOOR_1 .. EWELINK_DEVICE_FLOOR_{floor_count} | (none) |
    pub fn from_env(floor_count: i32) -> Self {
        let credentials = match (
            non_blank("EWELINK_EMAIL"),
            non_blank("EWELINK_PASSWORD"),
            non_blank("EWELINK_APP_ID"),
            non_blank("EWELINK_APP_SECRET"),
        ) {
            (Some(email), Some(password), Some(app_id), Some(app_secret)) => {
                Some(EwelinkCredentials {
                    email,
                    password,
                    app_id,
                    app_secret,
                })
            }
            _ => None,
        };

        let floor_devices = (1..=floor_count)
            .filter_map(|n| non_blank(&format!("EWELINK_DEVICE_FLOOR_{}", n)).map(|id| (n, id)))
            .collect();

        Self {
            credentials,
            api_url: non_blank("EWELINK_API_URL")
                .unwrap_or_else(|| defaults::EWELINK_API_URL.to_string()),
            country_code: non_blank("EWELINK_COUNTRY_CODE")
                .unwrap_or_else(|| defaults::EWELINK_COUNTRY_CODE.to_string()),
            floor_devices,
            floor_count,
            timeout_seconds: defaults::SENSOR_TIMEOUT_SECS,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}
