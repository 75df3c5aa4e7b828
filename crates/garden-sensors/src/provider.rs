//! Sensor reading providers.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use garden_core::floors::reading_from_params;
use garden_core::{
    resolve_floor, Result, SensorReadingProvider, SensorSnapshot, SensorSource,
};

use crate::ewelink::EwelinkClient;
use crate::mock::MockSensorProvider;

/// Note attached to snapshots served by the simulator.
pub const MOCK_NOTE: &str = "Dados simulados. Configure EWELINK_* env vars para dados reais.";

/// Live readings from the eWeLink cloud.
pub struct EwelinkSensorProvider {
    client: Arc<EwelinkClient>,
}

impl EwelinkSensorProvider {
    pub fn new(client: Arc<EwelinkClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SensorReadingProvider for EwelinkSensorProvider {
    async fn read(&self) -> Result<SensorSnapshot> {
        let start = Instant::now();
        let config = self.client.config();

        let token = self.client.login().await?;
        let devices = self.client.list_devices(&token).await?;

        let placed: Vec<_> = devices
            .iter()
            .filter_map(|d| {
                let descriptor = d.descriptor();
                resolve_floor(&descriptor, &config.floor_devices, config.floor_count)
                    .map(|floor| (floor, descriptor))
            })
            .collect();

        let statuses = futures::future::join_all(
            placed
                .iter()
                .map(|(_, d)| self.client.device_status(&token, &d.id)),
        )
        .await;

        let mut snapshot = SensorSnapshot::new(SensorSource::Ewelink);
        for ((floor, descriptor), status) in placed.iter().zip(statuses) {
            let params = match status {
                Ok(params) => params,
                Err(e) => {
                    warn!(
                        subsystem = "sensors",
                        component = "ewelink",
                        device_id = %descriptor.id,
                        floor = *floor,
                        error = %e,
                        "Skipping device without status"
                    );
                    continue;
                }
            };
            if let Some(reading) = reading_from_params(*floor, descriptor, &params) {
                snapshot.readings.insert(*floor, reading);
            }
        }

        debug!(
            subsystem = "sensors",
            component = "ewelink",
            op = "read",
            result_count = snapshot.readings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "eWeLink snapshot assembled"
        );
        Ok(snapshot)
    }
}

/// Tries the live provider first and falls back to the simulator.
///
/// Never fails: an error or an empty snapshot from the primary is logged
/// and replaced by simulated readings carrying [`MOCK_NOTE`].
pub struct FallbackSensorProvider {
    primary: Option<Arc<dyn SensorReadingProvider>>,
    mock: MockSensorProvider,
}

impl FallbackSensorProvider {
    pub fn new(primary: Option<Arc<dyn SensorReadingProvider>>, mock: MockSensorProvider) -> Self {
        Self { primary, mock }
    }

    /// Simulated readings only.
    pub fn mock_only(mock: MockSensorProvider) -> Self {
        Self::new(None, mock)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}

#[async_trait]
impl SensorReadingProvider for FallbackSensorProvider {
    async fn read(&self) -> Result<SensorSnapshot> {
        if let Some(primary) = &self.primary {
            match primary.read().await {
                Ok(snapshot) if !snapshot.readings.is_empty() => return Ok(snapshot),
                Ok(_) => info!(
                    subsystem = "sensors",
                    component = "fallback",
                    "Live sensors returned no readings, using simulated data"
                ),
                Err(e) => warn!(
                    subsystem = "sensors",
                    component = "fallback",
                    error = %e,
                    "Live sensors unavailable, using simulated data"
                ),
            }
        }

        let mut snapshot = self.mock.read().await?;
        snapshot.note = Some(MOCK_NOTE.to_string());
        Ok(snapshot)
    }
}
