//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garden_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new()
//!     .with_response(r#"{"ciclo_total": 90, "targets_humidade": 70}"#);
//! assert!(backend.calls().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use garden_core::{Error, GenerationBackend, GenerationParams, Result};

/// Mock chat backend: canned replies, optional failure, and a call log.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    responses: HashMap<String, String>,
    fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "{}".to_string(),
            responses: HashMap::new(),
            fail: false,
        }
    }
}

/// One recorded generation call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
    pub params: GenerationParams,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` to every prompt without a specific mapping.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Reply with `output` when the user prompt equals `prompt`.
    pub fn with_response_mapping(
        mut self,
        prompt: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .insert(prompt.into(), output.into());
        self
    }

    /// Fail every call with an inference error.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        match self.call_log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn log_call(&self, system: &str, prompt: &str, params: GenerationParams) {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(MockCall {
                system: system.to_string(),
                prompt: prompt.to_string(),
                params,
            });
        }
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String> {
        self.log_call(system, prompt, params);

        if self.config.fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        Ok(self
            .config
            .responses
            .get(prompt)
            .unwrap_or(&self.config.default_response)
            .clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
