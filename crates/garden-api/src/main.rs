//! GardenGes API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use garden_api::config::cors_layer;
use garden_api::services::{run_scheduled_checks, NtfyNotifier};
use garden_api::{build_router, AppConfig, AppState};
use garden_core::{
    AlertCooldown, CareDataResolver, CareSource, GenerationBackend, NotificationDispatcher,
    PlantRepository, SensorReadingProvider, WateringPlanner,
};
use garden_db::{Database, InMemoryPlantRepository};
use garden_inference::{AiCareSource, OpenAIBackend};
use garden_sensors::{
    EwelinkClient, EwelinkConfig, EwelinkSensorProvider, FallbackSensorProvider,
    MockSensorProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "garden_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "garden_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("garden-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = AppConfig::from_env();

    // Plant store
    let plants: Arc<dyn PlantRepository> = match &config.database_url {
        Some(url) => {
            let db = Database::connect(url).await?;
            db.migrate().await?;
            info!(subsystem = "db", "Connected to PostgreSQL, migrations applied");
            Arc::new(db.plants)
        }
        None => {
            warn!(subsystem = "db", "DATABASE_URL not set, plants are kept in memory");
            Arc::new(InMemoryPlantRepository::new())
        }
    };

    // AI care lookups
    let ai_backend: Option<Arc<dyn GenerationBackend>> = match OpenAIBackend::from_env()? {
        Some(backend) => {
            info!(
                subsystem = "inference",
                model = backend.config().model.as_str(),
                "AI care lookups enabled"
            );
            Some(Arc::new(backend))
        }
        None => {
            info!(subsystem = "inference", "GROQ_API_KEY not set, AI care lookups disabled");
            None
        }
    };
    let ai_source = ai_backend
        .clone()
        .map(|b| Arc::new(AiCareSource::new(b)) as Arc<dyn CareSource>);
    let resolver = CareDataResolver::standard(ai_source);

    // Sensors
    let ewelink = Arc::new(EwelinkClient::new(EwelinkConfig::from_env(
        config.floor_count,
    ))?);
    let primary = if ewelink.config().is_configured() {
        info!(subsystem = "sensors", "eWeLink credentials found, reading live sensors");
        Some(Arc::new(EwelinkSensorProvider::new(ewelink.clone())) as Arc<dyn SensorReadingProvider>)
    } else {
        warn!(subsystem = "sensors", "eWeLink not configured, serving simulated readings");
        None
    };
    let sensors: Arc<dyn SensorReadingProvider> = Arc::new(FallbackSensorProvider::new(
        primary,
        MockSensorProvider::new(config.floor_count),
    ));

    // Notifications
    let notifier = Arc::new(NtfyNotifier::new(config.ntfy_base_url.clone())?);
    let dispatcher = NotificationDispatcher::new(notifier, config.ntfy_topic.clone());
    if dispatcher.topic().is_none() {
        warn!(subsystem = "notify", "NTFY_TOPIC not set, watering alerts are disabled");
    }

    let state = AppState {
        plants,
        resolver,
        guide_backend: ai_backend,
        sensors,
        ewelink,
        planner: WateringPlanner::default(),
        dispatcher,
        cooldown: Arc::new(AlertCooldown::new(config.notify_cooldown)),
    };

    if let Some(every) = config.watering_check_interval {
        tokio::spawn(run_scheduled_checks(state.clone(), every));
    }

    let app = build_router(state, cors_layer(config.allowed_origins.as_deref()));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting GardenGes API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
