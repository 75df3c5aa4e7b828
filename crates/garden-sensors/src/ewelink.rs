//! eWeLink (CoolKit) open API v2 client.
//!
//! Every response is wrapped in `{"error": <code>, "msg": ..., "data": ...}`;
//! anything but `error == 0` is a failure regardless of the HTTP status.

use std::time::{Duration, Instant};

use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;
use tracing::{debug, warn};
use utoipa::ToSchema;

use garden_core::{DeviceDescriptor, Error, Result};

use crate::config::{EwelinkConfig, EwelinkCredentials};

type HmacSha256 = Hmac<Sha256>;

/// Sign a login request: base64 of HMAC-SHA256 over `"{app_id}_{ts}"`.
pub fn sign(app_secret: &str, app_id: &str, timestamp: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| Error::Config(format!("invalid eWeLink app secret: {}", e)))?;
    mac.update(format!("{}_{}", app_id, timestamp).as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// The nonce header is the last eight characters of the timestamp.
pub fn nonce(timestamp: &str) -> &str {
    let start = timestamp.len().saturating_sub(8);
    timestamp.get(start..).unwrap_or(timestamp)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    error: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    country_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    at: String,
}

#[derive(Debug, Deserialize)]
struct ThingListData {
    #[serde(default, rename = "thingList")]
    thing_list: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    #[serde(default, rename = "itemData")]
    item_data: Option<ItemData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemData {
    deviceid: String,
    name: String,
    #[serde(rename = "brandName")]
    brand_name: String,
    #[serde(rename = "productModel")]
    product_model: String,
    online: bool,
    tags: Value,
}

#[derive(Debug, Default, Deserialize)]
struct StatusData {
    #[serde(default)]
    params: Map<String, Value>,
}

// =============================================================================
// PUBLIC TYPES
// =============================================================================

/// A device registered on the eWeLink account.
#[derive(Debug, Clone, PartialEq)]
pub struct EwelinkDevice {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub online: bool,
    pub tags: Value,
}

impl EwelinkDevice {
    pub fn descriptor(&self) -> DeviceDescriptor {
        DeviceDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl From<ItemData> for EwelinkDevice {
    fn from(item: ItemData) -> Self {
        Self {
            id: item.deviceid,
            name: item.name,
            brand: item.brand_name,
            model: item.product_model,
            online: item.online,
            tags: item.tags,
        }
    }
}

/// One row of the device discovery listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceSummary {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub online: bool,
    /// Current telemetry, empty when the status call failed.
    #[schema(value_type = Object)]
    pub params: Map<String, Value>,
    /// Env line that pins this device to a floor.
    pub config_example: String,
}

/// Device discovery result, used to fill in `EWELINK_DEVICE_FLOOR_N`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceListing {
    pub devices: Vec<DeviceSummary>,
    pub total: usize,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for the eWeLink cloud.
pub struct EwelinkClient {
    client: Client,
    config: EwelinkConfig,
}

impl EwelinkClient {
    pub fn new(config: EwelinkConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Sensor(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EwelinkConfig {
        &self.config
    }

    fn credentials(&self) -> Result<&EwelinkCredentials> {
        self.config.credentials.as_ref().ok_or_else(|| {
            Error::Config("eWeLink credentials are not configured".to_string())
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        op: &str,
    ) -> Result<Option<T>> {
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| Error::Sensor(format!("{}: unreadable response: {}", op, e)))?;
        if envelope.error != 0 {
            return Err(Error::Sensor(format!(
                "{}: eWeLink error {}: {}",
                op, envelope.error, envelope.msg
            )));
        }
        Ok(envelope.data)
    }

    /// Sign in and return the access token.
    ///
    /// Missing credentials yield `Error::Config`; a rejected login yields
    /// `Error::Unauthorized`.
    pub async fn login(&self) -> Result<String> {
        let creds = self.credentials()?;
        let ts = chrono::Utc::now().timestamp_millis().to_string();
        let signature = sign(&creds.app_secret, &creds.app_id, &ts)?;
        let start = Instant::now();

        let response = self
            .client
            .post(self.url("/v2/user/login"))
            .header("Content-Type", "application/json")
            .header("X-CK-Appid", &creds.app_id)
            .header("X-CK-Nonce", nonce(&ts))
            .header("Authorization", format!("Sign {}", signature))
            .json(&LoginRequest {
                email: &creds.email,
                password: &creds.password,
                country_code: &self.config.country_code,
            })
            .send()
            .await
            .map_err(|e| Error::Sensor(format!("login request failed: {}", e)))?;

        let data: Option<LoginData> = Self::unwrap_envelope(response, "login")
            .await
            .map_err(|e| match e {
                Error::Sensor(msg) => Error::Unauthorized(msg),
                other => other,
            })?;

        let token = data
            .map(|d| d.at)
            .filter(|at| !at.is_empty())
            .ok_or_else(|| Error::Unauthorized("login returned no access token".to_string()))?;

        debug!(
            subsystem = "sensors",
            component = "ewelink",
            op = "login",
            duration_ms = start.elapsed().as_millis() as u64,
            "eWeLink login succeeded"
        );
        Ok(token)
    }

    fn authorized(&self, req: reqwest::RequestBuilder, token: &str) -> Result<reqwest::RequestBuilder> {
        let creds = self.credentials()?;
        Ok(req
            .header("Content-Type", "application/json")
            .header("X-CK-Appid", &creds.app_id)
            .header("Authorization", format!("Bearer {}", token)))
    }

    /// All devices on the account.
    pub async fn list_devices(&self, token: &str) -> Result<Vec<EwelinkDevice>> {
        let response = self
            .authorized(self.client.get(self.url("/v2/device/thing")), token)?
            .send()
            .await
            .map_err(|e| Error::Sensor(format!("device list request failed: {}", e)))?;

        let data: Option<ThingListData> = Self::unwrap_envelope(response, "device list").await?;
        let devices: Vec<EwelinkDevice> = data
            .map(|d| d.thing_list)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.item_data)
            .filter(|item| !item.deviceid.is_empty())
            .map(EwelinkDevice::from)
            .collect();

        debug!(
            subsystem = "sensors",
            component = "ewelink",
            op = "list_devices",
            result_count = devices.len(),
            "eWeLink devices listed"
        );
        Ok(devices)
    }

    /// Current telemetry parameters of one device.
    pub async fn device_status(&self, token: &str, device_id: &str) -> Result<Map<String, Value>> {
        let response = self
            .authorized(self.client.get(self.url("/v2/device/thing/status")), token)?
            .query(&[("type", "1"), ("id", device_id)])
            .send()
            .await
            .map_err(|e| Error::Sensor(format!("device status request failed: {}", e)))?;

        let data: Option<StatusData> = Self::unwrap_envelope(response, "device status").await?;
        Ok(data.map(|d| d.params).unwrap_or_default())
    }

    /// Sign in and describe every device with its current telemetry.
    ///
    /// Any login failure is reported as `Error::Unauthorized` (or
    /// `Error::Config` when credentials are missing).
    pub async fn describe_devices(&self) -> Result<DeviceListing> {
        let token = self.login().await.map_err(|e| match e {
            Error::Config(_) | Error::Unauthorized(_) => e,
            other => Error::Unauthorized(other.to_string()),
        })?;
        let devices = self.list_devices(&token).await?;

        let statuses = futures::future::join_all(
            devices.iter().map(|d| self.device_status(&token, &d.id)),
        )
        .await;

        let summaries: Vec<DeviceSummary> = devices
            .into_iter()
            .zip(statuses)
            .map(|(device, status)| {
                let params = status.unwrap_or_else(|e| {
                    warn!(
                        subsystem = "sensors",
                        component = "ewelink",
                        device_id = %device.id,
                        error = %e,
                        "Device status unavailable"
                    );
                    Map::new()
                });
                DeviceSummary {
                    config_example: format!("EWELINK_DEVICE_FLOOR_X={}", device.id),
                    name: if device.name.is_empty() {
                        "Sem nome".to_string()
                    } else {
                        device.name
                    },
                    id: device.id,
                    brand: device.brand,
                    model: device.model,
                    online: device.online,
                    params,
                }
            })
            .collect();

        let message = summaries
            .is_empty()
            .then(|| "Nenhum dispositivo encontrado na conta".to_string());
        let instructions = format!(
            "Copia o ID do dispositivo para o .env no campo EWELINK_DEVICE_FLOOR_1 a EWELINK_DEVICE_FLOOR_{}",
            self.config.floor_count
        );

        Ok(DeviceListing {
            total: summaries.len(),
            devices: summaries,
            instructions,
            message,
        })
    }
}
