//! Router-level tests: in-memory plant store, fixed sensor readings and a
//! mocked ntfy server.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use garden_api::config::cors_layer;
use garden_api::services::NtfyNotifier;
use garden_api::{build_router, AppState};
use garden_core::{
    AlertCooldown, CareDataResolver, CareSource, GenerationBackend, NotificationDispatcher,
    Result, SensorReading, SensorReadingProvider, SensorSnapshot, SensorSource, WateringPlanner,
};
use garden_db::InMemoryPlantRepository;
use garden_inference::mock::MockGenerationBackend;
use garden_inference::AiCareSource;
use garden_sensors::{EwelinkClient, EwelinkConfig};

struct FixedSensors(BTreeMap<i32, f64>);

#[async_trait]
impl SensorReadingProvider for FixedSensors {
    async fn read(&self) -> Result<SensorSnapshot> {
        let mut snapshot = SensorSnapshot::new(SensorSource::Ewelink);
        for (floor, humidity) in &self.0 {
            snapshot.readings.insert(
                *floor,
                SensorReading {
                    floor: *floor,
                    humidity_pct: *humidity,
                    temperature_c: 22.0,
                    light_lux: None,
                    device_id: None,
                    device_name: None,
                },
            );
        }
        Ok(snapshot)
    }
}

struct TestApp {
    router: Router,
}

impl TestApp {
    fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

#[derive(Default)]
struct TestAppBuilder {
    ntfy_url: Option<String>,
    topic: Option<String>,
    humidity: BTreeMap<i32, f64>,
    ai: Option<Arc<dyn GenerationBackend>>,
}

impl TestAppBuilder {
    fn ntfy(mut self, server: &MockServer, topic: &str) -> Self {
        self.ntfy_url = Some(server.uri());
        self.topic = Some(topic.to_string());
        self
    }

    fn humidity(mut self, floor: i32, pct: f64) -> Self {
        self.humidity.insert(floor, pct);
        self
    }

    fn ai(mut self, backend: MockGenerationBackend) -> Self {
        self.ai = Some(Arc::new(backend));
        self
    }

    fn build(self) -> TestApp {
        let ntfy_url = self
            .ntfy_url
            .unwrap_or_else(|| "http://127.0.0.1:9".to_string());
        let notifier = Arc::new(NtfyNotifier::new(ntfy_url).unwrap());
        let ai_source = self
            .ai
            .clone()
            .map(|b| Arc::new(AiCareSource::new(b)) as Arc<dyn CareSource>);

        let state = AppState {
            plants: Arc::new(InMemoryPlantRepository::new()),
            resolver: CareDataResolver::standard(ai_source),
            guide_backend: self.ai,
            sensors: Arc::new(FixedSensors(self.humidity)),
            ewelink: Arc::new(EwelinkClient::new(EwelinkConfig::default()).unwrap()),
            planner: WateringPlanner::default(),
            dispatcher: NotificationDispatcher::new(notifier, self.topic),
            cooldown: Arc::new(AlertCooldown::new(Duration::from_secs(3600))),
        };

        TestApp {
            router: build_router(state, cors_layer(None)),
        }
    }
}

fn tomato(floor: i32, slot: i32) -> Value {
    json!({
        "name": "Tomate",
        "floor": floor,
        "slot_index": slot,
        "start_date": "2026-03-01",
        "cycle_days": 90,
        "target_humidity_pct": 70
    })
}

// =============================================================================
// SYSTEM
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::builder().build();
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unrouted_method_is_405() {
    let app = TestApp::builder().build();
    let (status, body) = app.send("PATCH", "/api/v1/plants", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method not allowed");

    let (status, _) = app.send("GET", "/api/v1/watering/calculate", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_options_is_200() {
    let app = TestApp::builder().build();
    let (status, _) = app.send("OPTIONS", "/api/v1/plants", None).await;
    assert_eq!(status, StatusCode::OK);

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/watering/calculate")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send_request(preflight).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::builder().build();
    let (status, body) = app.send("GET", "/api/v1/compost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = TestApp::builder().build();
    let (status, body) = app.send("GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/plants"].is_object());
}

// =============================================================================
// PLANTS
// =============================================================================

#[tokio::test]
async fn test_plant_lifecycle() {
    let app = TestApp::builder().build();

    let (status, body) = app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Planta adicionada com sucesso");
    let id = body["plant"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.send("GET", &format!("/api/v1/plants/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tomate");
    assert_eq!(body["target_humidity_pct"], 70);

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/v1/plants/{}", id),
            Some(json!({"name": "Tomate cherry", "cycle_days": 80})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planta atualizada");
    assert_eq!(body["plant"]["name"], "Tomate cherry");
    assert_eq!(body["plant"]["id"], id.as_str());
    assert_eq!(body["plant"]["floor"], 1);

    let (status, body) = app.send("GET", "/api/v1/plants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plants"].as_array().unwrap().len(), 1);

    let (status, body) = app.send("DELETE", &format!("/api/v1/plants/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Planta removida com sucesso");

    let (status, _) = app.send("GET", &format!("/api/v1/plants/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send("DELETE", &format!("/api/v1/plants/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_portuguese_field_names_accepted() {
    let app = TestApp::builder().build();
    let (status, body) = app
        .send(
            "POST",
            "/api/v1/plants",
            Some(json!({
                "nome": "Manjericão",
                "andar": 2,
                "slot_index": 3,
                "data_inicio": "2026-04-10",
                "ciclo_total": 60,
                "targets_humidade": 65
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["plant"]["floor"], 2);
    assert_eq!(body["plant"]["cycle_days"], 60);
}

#[tokio::test]
async fn test_occupied_slot_is_409() {
    let app = TestApp::builder().build();
    let (status, _) = app.send("POST", "/api/v1/plants", Some(tomato(1, 2))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.send("POST", "/api/v1/plants", Some(tomato(1, 2))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, body) = app.send("GET", "/api/v1/plants", None).await;
    assert_eq!(body["plants"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_move_onto_occupied_slot_is_409() {
    let app = TestApp::builder().build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;
    let (_, body) = app.send("POST", "/api/v1/plants", Some(tomato(1, 1))).await;
    let id = body["plant"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/v1/plants/{}", id),
            Some(json!({"slot_index": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_plant_bodies_are_400() {
    let app = TestApp::builder().build();

    let mut missing_name = tomato(1, 0);
    missing_name.as_object_mut().unwrap().remove("name");
    let (status, body) = app.send("POST", "/api/v1/plants", Some(missing_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let mut bad_humidity = tomato(1, 0);
    bad_humidity["target_humidity_pct"] = json!(140);
    let (status, _) = app.send("POST", "/api/v1/plants", Some(bad_humidity)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", "/api/v1/plants", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/v1/plants")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = app.send_request(malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));
}

#[tokio::test]
async fn test_oversized_streamed_body_is_413() {
    let app = TestApp::builder().build();
    let name = "a".repeat(70 * 1024);
    // No Content-Length header: the limit is hit while buffering.
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/care/lookup")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": name }).to_string()))
        .unwrap();

    let (status, body) = app.send_request(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_unknown_plant_is_404() {
    let app = TestApp::builder().build();
    let (status, _) = app
        .send("PUT", "/api/v1/plants/missing", Some(json!({"name": "Alface"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// CARE
// =============================================================================

#[tokio::test]
async fn test_care_lookup_from_catalog() {
    let app = TestApp::builder().build();
    let (status, body) = app
        .send("POST", "/api/v1/care/lookup", Some(json!({"name": "tomate"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "database");
    assert_eq!(body["plant_name"], "tomate");
    assert_eq!(body["cycle_days"], 90);
    assert_eq!(body["target_humidity_pct"], 70);
}

#[tokio::test]
async fn test_care_lookup_empty_name_is_400() {
    let app = TestApp::builder().build();
    let (status, _) = app
        .send("POST", "/api/v1/care/lookup", Some(json!({"name": "   "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("POST", "/api/v1/care/lookup", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_care_lookup_falls_back_to_ai_then_default() {
    let ai = MockGenerationBackend::new().with_response(
        r#"```json
{"ciclo_total": 120, "targets_humidade": 60, "temperatura_ideal": "22-30°C", "luz": "Sol pleno", "descricao": "Trepadeira africana."}
```"#,
    );
    let app = TestApp::builder().ai(ai).build();
    let (status, body) = app
        .send("POST", "/api/v1/care/lookup", Some(json!({"name": "Kiwano africano"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ai");
    assert_eq!(body["cycle_days"], 120);

    let offline = TestApp::builder()
        .ai(MockGenerationBackend::new().failing())
        .build();
    let (status, body) = offline
        .send("POST", "/api/v1/care/lookup", Some(json!({"name": "Kiwano africano"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "default");
    assert_eq!(body["cycle_days"], 60);
    assert_eq!(body["target_humidity_pct"], 65);
}

#[tokio::test]
async fn test_care_guide_without_ai_is_generic() {
    let app = TestApp::builder().build();
    let (status, body) = app
        .send("POST", "/api/v1/care/guide", Some(json!({"name": "Alface"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "default");
    assert_eq!(body["plant_name"], "Alface");
    assert!(body["description"].as_str().unwrap().contains("Alface"));
}

#[tokio::test]
async fn test_care_guide_from_ai() {
    let ai = MockGenerationBackend::new().with_response(
        r#"{"nome_cientifico": "Lactuca sativa", "familia": "Asteraceae", "beneficios": ["Hidratante"]}"#,
    );
    let app = TestApp::builder().ai(ai).build();
    let (status, body) = app
        .send("POST", "/api/v1/care/guide", Some(json!({"name": "Alface"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ai");
    assert_eq!(body["scientific_name"], "Lactuca sativa");
    assert_eq!(body["benefits"][0], "Hidratante");
}

// =============================================================================
// SENSORS
// =============================================================================

#[tokio::test]
async fn test_sensor_readings_by_floor() {
    let app = TestApp::builder().humidity(1, 55.0).humidity(2, 63.5).build();
    let (status, body) = app.send("GET", "/api/v1/sensors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ewelink");
    assert_eq!(body["sensors"]["1"]["humidity_pct"], 55.0);
    assert_eq!(body["sensors"]["2"]["humidity_pct"], 63.5);
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_device_listing_without_credentials_is_401() {
    let app = TestApp::builder().build();
    for uri in ["/api/v1/sensors/devices", "/api/v1/sensors?list=devices"] {
        let (status, body) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(body["help"].as_str().unwrap().contains("EWELINK_EMAIL"));
    }
}

// =============================================================================
// WATERING
// =============================================================================

#[tokio::test]
async fn test_calculate_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/horta-casa"))
        .and(header("Title", "GardenGes - Alerta de Rega"))
        .and(header("Priority", "high"))
        .and(body_string_contains("Tomate (1º andar): 55 spray(s)"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::builder()
        .ntfy(&server, "horta-casa")
        .humidity(1, 55.0)
        .build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    let (status, body) = app
        .send("POST", "/api/v1/watering/calculate", Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let rec = &body["recommendations"][0];
    assert_eq!(rec["deficit_pct"], 15.0);
    assert_eq!(rec["status"], "needs_water");
    assert_eq!(rec["ml_needed"], 30.0);
    assert_eq!(rec["sprays_needed"], 55);
    assert_eq!(body["summary"]["needs_water"], 1);
    assert_eq!(body["sensor_source"], "ewelink");
    assert_eq!(body["notification"]["sent"], true);
    assert_eq!(body["notification"]["plants_notified"], 1);
}

#[tokio::test]
async fn test_calculate_without_notify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = TestApp::builder()
        .ntfy(&server, "horta-casa")
        .humidity(1, 40.0)
        .build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/watering/calculate",
            Some(json!({"notify": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["notification"].is_null());
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_calculate_single_floor_and_missing_reading() {
    let app = TestApp::builder().humidity(1, 80.0).build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;
    app.send("POST", "/api/v1/plants", Some(tomato(2, 0))).await;

    let (_, body) = app
        .send(
            "POST",
            "/api/v1/watering/calculate",
            Some(json!({"floor": 2, "notify": false})),
        )
        .await;
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["floor"], 2);
    // No reading for floor 2: assumed 50%.
    assert_eq!(recs[0]["current_humidity_pct"], 50.0);
    assert_eq!(recs[0]["deficit_pct"], 20.0);

    let (status, _) = app
        .send("POST", "/api/v1/watering/calculate", Some(json!({"floor": 0})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calculate_without_plants() {
    let app = TestApp::builder().build();
    let (status, body) = app.send("POST", "/api/v1/watering/calculate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Nenhuma planta registada");
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_calculate_without_topic_reports_reason() {
    let app = TestApp::builder().humidity(1, 40.0).build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    let (_, body) = app.send("POST", "/api/v1/watering/calculate", None).await;
    assert_eq!(body["notification"]["sent"], false);
    assert_eq!(body["notification"]["reason"], "NTFY_TOPIC não configurado");
}

#[tokio::test]
async fn test_check_respects_cooldown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/horta-casa"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::builder()
        .ntfy(&server, "horta-casa")
        .humidity(1, 40.0)
        .build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    let (status, body) = app.send("POST", "/api/v1/watering/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["sent"], true);

    let (status, body) = app.send("GET", "/api/v1/watering/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notification"]["sent"], false);
    assert!(body["notification"]["reason"]
        .as_str()
        .unwrap()
        .contains("próximo em"));
}

#[tokio::test]
async fn test_overlapping_checks_send_one_alert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/horta-casa"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::builder()
        .ntfy(&server, "horta-casa")
        .humidity(1, 40.0)
        .build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    let ((_, a), (_, b)) = tokio::join!(
        app.send("POST", "/api/v1/watering/check", None),
        app.send("GET", "/api/v1/watering/check", None),
    );
    let sent: Vec<bool> = [&a, &b]
        .iter()
        .map(|body| body["notification"]["sent"].as_bool().unwrap())
        .collect();
    assert_eq!(sent.iter().filter(|s| **s).count(), 1, "{:?}", sent);
}

#[tokio::test]
async fn test_check_failed_delivery_does_not_start_cooldown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/horta-casa"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let app = TestApp::builder()
        .ntfy(&server, "horta-casa")
        .humidity(1, 40.0)
        .build();
    app.send("POST", "/api/v1/plants", Some(tomato(1, 0))).await;

    for _ in 0..2 {
        let (_, body) = app.send("POST", "/api/v1/watering/check", None).await;
        assert_eq!(body["notification"]["sent"], false);
        assert_eq!(body["notification"]["reason"], "HTTP 503");
    }
}

// =============================================================================
// NOTIFY
// =============================================================================

#[tokio::test]
async fn test_manual_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/avisos"))
        .and(header("Priority", "urgent"))
        .and(header("Tags", "seedling,droplet"))
        .and(body_string_contains("Colher os tomates"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::builder().ntfy(&server, "horta-casa").build();
    let (status, body) = app
        .send(
            "POST",
            "/api/v1/notify",
            Some(json!({"topic": "avisos", "message": "Colher os tomates", "priority": 5})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Notificação enviada!");
}

#[tokio::test]
async fn test_manual_notification_requires_topic() {
    let app = TestApp::builder().build();
    let (status, body) = app
        .send("POST", "/api/v1/notify", Some(json!({"message": "olá"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic is required");

    let (status, _) = app
        .send("POST", "/api/v1/notify", Some(json!({"topic": "a/b"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manual_notification_delivery_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = TestApp::builder().ntfy(&server, "horta-casa").build();
    let (status, body) = app
        .send("POST", "/api/v1/notify", Some(json!({"topic": "avisos"})))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("HTTP 500"));
}
