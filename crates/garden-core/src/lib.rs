//! # garden-core
//!
//! Core types, traits, and domain logic for the GardenGes garden monitor.
//!
//! This crate holds everything that does not talk to the outside world:
//! the plant-care catalog, the care-data fallback chain, the watering
//! planner, sensor-to-floor resolution and alert formatting. The other
//! crates plug storage, AI, sensors and push delivery in through the
//! traits defined here.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod floors;
pub mod logging;
pub mod models;
pub mod notify;
pub mod resolver;
pub mod traits;
pub mod watering;

// Re-export commonly used types at crate root
pub use catalog::PlantCatalog;
pub use error::{Error, Result};
pub use floors::{resolve_floor, DeviceDescriptor, FloorDeviceIds};
pub use models::*;
pub use notify::{AlertCooldown, CooldownClaim, NotificationDispatcher};
pub use resolver::{CareDataResolver, CatalogSource, ResolvedCare};
pub use traits::*;
pub use watering::{compute_recommendation, summarize, DosingRates, WateringPlanner};
