//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GardenGes API",
        description = "Vertical garden monitoring: plants, care data, sensors and watering alerts"
    ),
    paths(
        handlers::health::health_check,
        handlers::plants::list_plants,
        handlers::plants::create_plant,
        handlers::plants::get_plant,
        handlers::plants::update_plant,
        handlers::plants::delete_plant,
        handlers::care::lookup_care,
        handlers::care::care_guide,
        handlers::sensors::get_sensors,
        handlers::sensors::list_devices,
        handlers::watering::calculate_watering,
        handlers::watering::check_watering,
        handlers::notify::send_notification,
    ),
    components(schemas(
        handlers::MessageResponse,
        handlers::health::HealthResponse,
        handlers::plants::PlantListResponse,
        handlers::plants::PlantResponse,
        handlers::care::CareRequest,
        handlers::care::CareGuideResponse,
        handlers::sensors::SensorsResponse,
        handlers::sensors::AuthHelpResponse,
        handlers::watering::CalculateRequest,
        handlers::notify::NotifyRequest,
        handlers::notify::NotifyResponse,
        crate::services::WateringReport,
        garden_core::PlantRecord,
        garden_core::CreatePlantRequest,
        garden_core::UpdatePlantRequest,
        garden_core::PlantCareProfile,
        garden_core::PlantCareGuide,
        garden_core::CareInstructions,
        garden_core::WateringCare,
        garden_core::LightCare,
        garden_core::SoilCare,
        garden_core::TemperatureCare,
        garden_core::HumidityCare,
        garden_core::FertilizationCare,
        garden_core::PestEntry,
        garden_core::HarvestInfo,
        garden_core::ResolvedCare,
        garden_core::CareSourceKind,
        garden_core::SensorReading,
        garden_core::SensorSource,
        garden_core::WateringRecommendation,
        garden_core::WateringSummary,
        garden_core::WateringStatus,
        garden_core::NotificationResult,
        garden_sensors::DeviceListing,
        garden_sensors::DeviceSummary,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Plants", description = "Plant records"),
        (name = "Care", description = "Care profiles and guides"),
        (name = "Sensors", description = "Floor sensor readings"),
        (name = "Watering", description = "Watering recommendations"),
        (name = "Notifications", description = "Push notifications"),
    )
)]
pub struct ApiDoc;
