//! The language-model completion boundary.
//!
//! The rest of the system treats the model as an opaque fallible function
//! `prompt -> free text`. This crate defines that contract and ships an
//! OpenAI-compatible implementation; tests substitute scripted fakes.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::{GatewayConfig, OpenAiGateway, DEFAULT_BASE_URL};

/// Completion failure classes. None of them abort the request: the
/// orchestrator answers with fallback observations instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to the model provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model provider returned no completion content")]
    EmptyCompletion,
}

/// Opaque completion service: prompt in, free text out. Object-safe so the
/// server can hold it as `Arc<dyn ModelGateway>`.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
