//! Core traits for GardenGes abstractions.
//!
//! These traits define the seams where storage, AI, sensor clouds and push
//! delivery plug into the domain logic, enabling pluggable backends and
//! testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// PLANT REPOSITORY
// =============================================================================

/// Storage for plant records.
///
/// Implementations must keep `(floor, slot_index)` unique: `insert` and
/// `update` fail with `Error::Conflict` instead of overwriting an occupied
/// slot.
#[async_trait]
pub trait PlantRepository: Send + Sync {
    /// All plants ordered by floor, then slot.
    async fn list(&self) -> Result<Vec<PlantRecord>>;

    /// Fetch one plant. `Error::NotFound` when the id is unknown.
    async fn get(&self, id: &str) -> Result<PlantRecord>;

    /// Store a new plant and return it with its assigned id.
    async fn insert(&self, plant: NewPlant) -> Result<PlantRecord>;

    /// Merge the present fields of `changes` into an existing plant.
    async fn update(&self, id: &str, changes: UpdatePlantRequest) -> Result<PlantRecord>;

    /// Remove a plant. `Error::NotFound` when the id is unknown.
    async fn delete(&self, id: &str) -> Result<()>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Sampling parameters for a single generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Backend for chat-style text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text with system context.
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// CARE DATA
// =============================================================================

/// One stage of the care-data fallback chain.
///
/// A miss (`None`) passes the lookup on to the next stage. Sources swallow
/// their own upstream failures and report them as misses.
#[async_trait]
pub trait CareSource: Send + Sync {
    /// Label reported to clients for profiles from this source.
    fn kind(&self) -> CareSourceKind;

    async fn lookup(&self, plant_name: &str) -> Option<PlantCareProfile>;
}

// =============================================================================
// SENSORS
// =============================================================================

/// Yields the current humidity/temperature of each garden floor.
#[async_trait]
pub trait SensorReadingProvider: Send + Sync {
    async fn read(&self) -> Result<SensorSnapshot>;
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Delivers a push message to a topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `message` to `topic`. Errors carry a short reason such as `HTTP 500`.
    async fn send(&self, topic: &str, message: &PushMessage) -> Result<()>;
}
