//! Simulated floor sensors for development and demos.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use garden_core::{defaults, Result, SensorReading, SensorReadingProvider, SensorSnapshot, SensorSource};

/// Baseline for one simulated floor.
struct FloorProfile {
    humidity: i64,
    /// Slow drift: `(t + drift_offset) % drift_modulo` is added to the humidity.
    drift_offset: i64,
    drift_modulo: i64,
    temperature: f64,
    light: i64,
    light_jitter: i64,
}

const PROFILES: [FloorProfile; 3] = [
    FloorProfile {
        humidity: 55,
        drift_offset: 0,
        drift_modulo: 10,
        temperature: 23.0,
        light: 800,
        light_jitter: 100,
    },
    FloorProfile {
        humidity: 62,
        drift_offset: 3,
        drift_modulo: 8,
        temperature: 22.0,
        light: 720,
        light_jitter: 80,
    },
    FloorProfile {
        humidity: 58,
        drift_offset: 5,
        drift_modulo: 12,
        temperature: 24.0,
        light: 650,
        light_jitter: 50,
    },
];

/// Plausible random readings with a slow time-based drift.
///
/// Floors past the third reuse the profiles in rotation.
pub struct MockSensorProvider {
    rng: Mutex<StdRng>,
    floor_count: i32,
}

impl Default for MockSensorProvider {
    fn default() -> Self {
        Self::new(defaults::FLOOR_COUNT)
    }
}

impl MockSensorProvider {
    pub fn new(floor_count: i32) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            floor_count,
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(floor_count: i32, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            floor_count,
        }
    }

    /// Readings for every floor as of `unix_secs`.
    pub fn snapshot_at(&self, unix_secs: i64) -> SensorSnapshot {
        let mut snapshot = SensorSnapshot::new(SensorSource::Mock);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        for floor in 1..=self.floor_count.max(0) {
            let profile = &PROFILES[((floor - 1) as usize) % PROFILES.len()];
            let drift = (unix_secs + profile.drift_offset).rem_euclid(profile.drift_modulo);
            let humidity = profile.humidity + rng.gen_range(-5..=5) + drift;
            let temperature = profile.temperature + rng.gen_range(-1.0..=1.0);
            let light = profile.light + rng.gen_range(-profile.light_jitter..=profile.light_jitter);

            snapshot.readings.insert(
                floor,
                SensorReading {
                    floor,
                    humidity_pct: humidity as f64,
                    temperature_c: (temperature * 10.0).round() / 10.0,
                    light_lux: Some(light as f64),
                    device_id: None,
                    device_name: None,
                },
            );
        }

        snapshot
    }
}

#[async_trait]
impl SensorReadingProvider for MockSensorProvider {
    async fn read(&self) -> Result<SensorSnapshot> {
        Ok(self.snapshot_at(chrono::Utc::now().timestamp()))
    }
}
