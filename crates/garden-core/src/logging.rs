//! Structured logging schema and field name constants for GardenGes.
//!
//! All crates use these constants for consistent structured logging fields,
//! so a JSON log sink can be queried by the same names everywhere.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (per-device telemetry, per-plant dosing) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across the request.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "inference", "sensors", "watering", "notify"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "catalog", "resolver", "ewelink", "ntfy", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "lookup", "login", "plan", "dispatch"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Plant record id being operated on.
pub const PLANT_ID: &str = "plant_id";

/// Plant name as typed by the user.
pub const PLANT_NAME: &str = "plant_name";

/// Garden floor number.
pub const FLOOR: &str = "floor";

/// Sensor device id in the vendor cloud.
pub const DEVICE_ID: &str = "device_id";

/// Which stage or provider produced a value ("database", "ai", "default", "ewelink", "mock").
pub const SOURCE: &str = "source";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of plants that need water.
pub const PLANTS_NEEDING_WATER: &str = "plants_needing_water";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Upstream HTTP status code.
pub const STATUS_CODE: &str = "status_code";
