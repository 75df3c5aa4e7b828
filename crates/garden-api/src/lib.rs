//! # garden-api
//!
//! HTTP surface of GardenGes: plant records, care lookups, sensor readings,
//! watering recommendations and push notifications.
//!
//! [`build_router`] assembles the routes and middleware around an
//! [`AppState`]; `main.rs` wires the state from the environment.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use garden_core::defaults;

pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;

/// Request ID generator using UUIDv7 for time-ordered, unique request IDs.
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(subsystem = "api", panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal server error" })),
    )
        .into_response()
}

/// Bare `OPTIONS` answers 200 and unrouted verbs 405 on every path.
fn with_defaults(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed)
}

/// All routes and middleware, ready to serve.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    use handlers::{care, health, notify, plants, sensors, watering};

    Router::new()
        .route("/health", with_defaults(get(health::health_check)))
        .route(
            "/api/v1/plants",
            with_defaults(get(plants::list_plants).post(plants::create_plant)),
        )
        .route(
            "/api/v1/plants/:id",
            with_defaults(
                get(plants::get_plant)
                    .put(plants::update_plant)
                    .delete(plants::delete_plant),
            ),
        )
        .route("/api/v1/care/lookup", with_defaults(post(care::lookup_care)))
        .route("/api/v1/care/guide", with_defaults(post(care::care_guide)))
        .route("/api/v1/sensors", with_defaults(get(sensors::get_sensors)))
        .route(
            "/api/v1/sensors/devices",
            with_defaults(get(sensors::list_devices)),
        )
        .route(
            "/api/v1/watering/calculate",
            with_defaults(post(watering::calculate_watering)),
        )
        .route(
            "/api/v1/watering/check",
            with_defaults(get(watering::check_watering).post(watering::check_watering)),
        )
        .route("/api/v1/notify", with_defaults(post(notify::send_notification)))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_BYTES))
        .with_state(state)
}
