//! Services used by the HTTP handlers and the background scheduler.

pub mod ntfy;
pub mod watering;

pub use ntfy::{is_valid_topic, NtfyNotifier};
pub use watering::{calculate, run_scheduled_checks, scheduled_check, WateringReport};
