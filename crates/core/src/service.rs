//! Generative service contract.
//!
//! The model endpoint is an external collaborator: it accepts a model id,
//! text or image-plus-text contents and sampling configuration, and returns
//! generated text. Implementations are injected as
//! `Arc<dyn GenerativeService>` so tests can substitute a fake.

use async_trait::async_trait;
use serde::Serialize;

/// Base64 image part sent ahead of the text instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineData {
    pub data: String,
    pub mime_type: String,
}

/// Request contents: plain text, or an image followed by text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contents {
    Text { text: String },
    WithImage { image: InlineData, text: String },
}

impl Contents {
    /// The text instruction, regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Contents::Text { text } | Contents::WithImage { text, .. } => text,
        }
    }

    pub fn image(&self) -> Option<&InlineData> {
        match self {
            Contents::Text { .. } => None,
            Contents::WithImage { image, .. } => Some(image),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub system_instruction: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRequest {
    pub model: String,
    pub contents: Contents,
    pub config: SamplingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub text: String,
}

/// Transport or service failure reported by a [`GenerativeService`].
///
/// The display text is what the heuristic classifier inspects, so
/// implementations should keep status codes and upstream reason strings in
/// the message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The prompt or the reply was blocked by the service.
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// The service answered but produced no text.
    #[error("Empty response: {0}")]
    Empty(String),

    #[error("{0}")]
    Other(String),
}

/// A generative content endpoint.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Model identifier used when building requests.
    fn model(&self) -> &str;

    async fn generate(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError>;
}
