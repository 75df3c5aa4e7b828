//! # garden-inference
//!
//! AI-backed plant-care lookups for GardenGes.
//!
//! The [`openai::OpenAIBackend`] talks to any OpenAI-compatible chat
//! completion endpoint; by default Groq's hosted Llama model. On top of it,
//! [`care::AiCareSource`] is the AI stage of the care-data fallback chain and
//! [`care::generate_care_guide`] produces the detailed care guide.

pub mod care;
pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use care::{generate_care_guide, parse_care_profile, strip_code_fences, AiCareSource};
pub use openai::{OpenAIBackend, OpenAIConfig};
