//! Integration tests for the chat backend against a mocked Groq endpoint.

use std::sync::Arc;

use garden_core::{CareSource, Error, GenerationBackend, GenerationParams};
use garden_inference::{generate_care_guide, AiCareSource, OpenAIBackend, OpenAIConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn backend_for(server: &MockServer) -> OpenAIBackend {
    OpenAIBackend::new(OpenAIConfig {
        base_url: server.uri(),
        api_key: Some("gsk-test".to_string()),
        model: "llama-3.3-70b-versatile".to_string(),
        timeout_seconds: 5,
    })
    .expect("Failed to create backend")
}

#[tokio::test]
async fn test_generation_sends_bearer_and_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer gsk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("olá")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let params = GenerationParams {
        temperature: Some(0.5),
        max_tokens: None,
    };
    let reply = backend
        .generate_with_system("sys", "Olá", params)
        .await
        .unwrap();

    assert_eq!(reply, "olá");
}

#[tokio::test]
async fn test_ai_source_parses_fenced_profile() {
    let server = MockServer::start().await;

    let content = "```json\n{\"ciclo_total\": 100, \"targets_humidade\": 75, \"temperatura_ideal\": \"20-28°C\", \"luz\": \"Sol pleno\", \"descricao\": \"Gosta de calor.\"}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
        .expect(1)
        .mount(&server)
        .await;

    let source = AiCareSource::new(Arc::new(backend_for(&server)));
    let profile = source.lookup("Quiabo").await.expect("AI hit");

    assert_eq!(profile.cycle_days, 100);
    assert_eq!(profile.target_humidity_pct, 75);
    assert_eq!(profile.ideal_temperature_range, "20-28°C");
}

#[tokio::test]
async fn test_server_error_is_a_miss() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {"message": "overloaded", "type": "server_error"}
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend
        .generate_with_system("sys", "x", GenerationParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Inference(_)));

    let source = AiCareSource::new(Arc::new(backend));
    assert!(source.lookup("Quiabo").await.is_none());
}

#[tokio::test]
async fn test_forbidden_maps_to_config_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"message": "Access denied in this region", "type": "permission_denied"}
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .generate_with_system("sys", "x", GenerationParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_care_guide_request_and_parse() {
    let server = MockServer::start().await;

    let content = r#"{"nome_cientifico": "Ocimum basilicum", "familia": "Lamiaceae", "colheita": {"tempo": "60 dias"}}"#;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({"max_tokens": 2000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let guide = generate_care_guide(&backend, "Manjericão")
        .await
        .expect("guide");

    assert_eq!(guide.scientific_name, "Ocimum basilicum");
    assert_eq!(guide.family, "Lamiaceae");
    assert_eq!(guide.harvest.time, "60 dias");
    assert!(guide.benefits.is_empty());
}
