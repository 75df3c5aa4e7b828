//! OpenAI-compatible chat backend.
//!
//! Works with any endpoint that speaks the `/chat/completions` protocol:
//! Groq (the default), OpenAI, OpenRouter, or a local Ollama in OpenAI
//! compatibility mode.
//!
//! # Example
//!
//! ```rust,no_run
//! use garden_core::{GenerationBackend, GenerationParams};
//! use garden_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OpenAIConfig {
//!         api_key: Some("gsk_...".to_string()),
//!         ..Default::default()
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!     let reply = backend
//!         .generate_with_system("Responde em JSON.", "Dados de cultivo para: Tomate", GenerationParams::default())
//!         .await
//!         .unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use error::status_error;
pub use types::*;
