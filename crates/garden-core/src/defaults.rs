//! Centralized default constants for GardenGes.
//!
//! Every crate references these constants instead of defining its own magic
//! numbers. Organized by domain area.

// =============================================================================
// WATERING
// =============================================================================

/// Millilitres of water needed per percentage point of humidity deficit.
pub const ML_PER_PERCENT: f64 = 2.0;

/// Volume of one dropper squeeze, in millilitres.
pub const DROPPER_ML: f64 = 0.55;

/// Volume of one spray, in millilitres.
pub const SPRAY_ML: f64 = 0.55;

/// Deficits up to and including this many points are a light watering.
pub const LIGHT_WATER_THRESHOLD: f64 = 5.0;

/// Deficits above this many points raise the alert priority to high.
pub const HIGH_PRIORITY_DEFICIT: f64 = 10.0;

/// Humidity assumed for a floor without a sensor reading.
pub const FALLBACK_HUMIDITY_PCT: f64 = 50.0;

/// Target humidity assumed for a plant record without one.
pub const FALLBACK_TARGET_HUMIDITY_PCT: i32 = 65;

// =============================================================================
// CARE PROFILE
// =============================================================================

/// Cycle length of the generic care profile.
pub const DEFAULT_CYCLE_DAYS: u32 = 60;

/// Target humidity of the generic care profile.
pub const DEFAULT_TARGET_HUMIDITY_PCT: u8 = 65;

/// Ideal temperature range of the generic care profile.
pub const DEFAULT_TEMPERATURE_RANGE: &str = "18-25°C";

/// Light requirement of the generic care profile.
pub const DEFAULT_LIGHT_REQUIREMENT: &str = "Sol parcial a pleno";

// =============================================================================
// GARDEN LAYOUT
// =============================================================================

/// Number of floors in the garden structure.
pub const FLOOR_COUNT: i32 = 3;

// =============================================================================
// INFERENCE
// =============================================================================

/// OpenAI-compatible endpoint used for care lookups (Groq).
pub const AI_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat model used for care lookups.
pub const AI_MODEL: &str = "llama-3.3-70b-versatile";

/// Request timeout for AI calls.
pub const AI_TIMEOUT_SECS: u64 = 15;

/// Sampling temperature for the compact care profile.
pub const AI_PROFILE_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for the detailed care guide.
pub const AI_GUIDE_TEMPERATURE: f32 = 0.4;

/// Token cap for the detailed care guide.
pub const AI_GUIDE_MAX_TOKENS: u32 = 2000;

// =============================================================================
// SENSORS
// =============================================================================

/// eWeLink EU region API base.
pub const EWELINK_API_URL: &str = "https://eu-apia.coolkit.cc";

/// Country code sent with the eWeLink login.
pub const EWELINK_COUNTRY_CODE: &str = "+351";

/// Request timeout for sensor cloud calls.
pub const SENSOR_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Public ntfy server.
pub const NTFY_BASE_URL: &str = "https://ntfy.sh";

/// Request timeout for push delivery.
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Title of automatic watering alerts.
pub const ALERT_TITLE: &str = "GardenGes - Alerta de Rega";

/// Tags of automatic watering alerts.
pub const ALERT_TAGS: &str = "seedling,droplet";

/// Title used by the manual notify endpoint when none is given.
pub const MANUAL_NOTIFY_TITLE: &str = "myGarden";

/// Body used by the manual notify endpoint when none is given.
pub const MANUAL_NOTIFY_BODY: &str = "Notificação do myGarden";

/// Minimum time between two automatic alerts.
pub const ALERT_COOLDOWN_SECS: u64 = 3600;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body size.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE
// =============================================================================

/// Maximum connections in the database pool.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Minimum idle connections kept open.
pub const DB_MIN_CONNECTIONS: u32 = 1;

/// Seconds to wait when acquiring a pooled connection.
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;
