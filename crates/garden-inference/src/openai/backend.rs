//! OpenAI-compatible inference backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use garden_core::{defaults, Error, GenerationBackend, GenerationParams, Result};

use super::error::status_error;
use super::types::{ApiErrorBody, ChatReply, ChatRequest};

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Chat model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::AI_BASE_URL.to_string(),
            api_key: None,
            model: defaults::AI_MODEL.to_string(),
            timeout_seconds: defaults::AI_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Read the configuration from the environment.
    ///
    /// Returns `None` when `GROQ_API_KEY` is unset or blank, which disables
    /// the AI lookups altogether.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | GROQ_API_KEY | (none) |
    /// | AI_BASE_URL | https://api.groq.com/openai/v1 |
    /// | AI_MODEL | llama-3.3-70b-versatile |
    /// | AI_TIMEOUT | 15 |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;

        Some(Self {
            base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| defaults::AI_BASE_URL.to_string()),
            api_key: Some(api_key),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| defaults::AI_MODEL.to_string()),
            timeout_seconds: std::env::var("AI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::AI_TIMEOUT_SECS),
        })
    }
}

/// OpenAI-compatible chat backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            model = %config.model,
            base_url = %config.base_url,
            "Initializing chat backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables; `None` when no API key is set.
    pub fn from_env() -> Result<Option<Self>> {
        OpenAIConfig::from_env().map(Self::new).transpose()
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String> {
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "openai",
            op = "generate",
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion"
        );

        let request = ChatRequest::new(&self.config.model, system, prompt, params);

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let content = response
            .json::<ChatReply>()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?
            .into_text();

        debug!(
            subsystem = "inference",
            component = "openai",
            op = "generate",
            response_len = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat completion received"
        );
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
