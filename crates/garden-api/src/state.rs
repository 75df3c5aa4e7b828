//! Shared handler state.

use std::sync::Arc;

use garden_core::{
    AlertCooldown, CareDataResolver, GenerationBackend, NotificationDispatcher, PlantRepository,
    SensorReadingProvider, WateringPlanner,
};
use garden_sensors::EwelinkClient;

/// Everything the handlers and the background watering check need.
///
/// Cheap to clone; every component is either `Copy` or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub plants: Arc<dyn PlantRepository>,
    pub resolver: CareDataResolver,
    /// Backend for detailed care guides; guides fall back to the generic
    /// template without one.
    pub guide_backend: Option<Arc<dyn GenerationBackend>>,
    pub sensors: Arc<dyn SensorReadingProvider>,
    /// Direct cloud access for device discovery.
    pub ewelink: Arc<EwelinkClient>,
    pub planner: WateringPlanner,
    pub dispatcher: NotificationDispatcher,
    /// Throttles the automatic watering check.
    pub cooldown: Arc<AlertCooldown>,
}
