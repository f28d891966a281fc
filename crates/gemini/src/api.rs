//! REST client for the Generative Language `generateContent` endpoint.
//!
//! Wraps `POST {api_url}/models/{model}:generateContent` using [`reqwest`]
//! and adapts it to the core [`GenerativeService`] trait.

use std::time::Duration;

use async_trait::async_trait;
use svgsmith_core::service::{GenerativeService, ServiceError, ServiceRequest, ServiceResponse};

use crate::config::GeminiConfig;
use crate::messages::{GenerateContentRequest, GenerateContentResponse};

/// HTTP client for one API key / model pair.
pub struct GeminiApi {
    client: reqwest::Client,
    config: GeminiConfig,
}

/// Errors from the Generative Language REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The prompt or the candidate was blocked by safety filtering.
    #[error("Response blocked by the model: {0}")]
    Blocked(String),

    /// A successful response without any candidate text.
    #[error("Model returned no text (finish reason: {0})")]
    EmptyResponse(String),
}

impl From<GeminiApiError> for ServiceError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Request(e) => ServiceError::Transport(e.to_string()),
            GeminiApiError::ApiError { status, body } => ServiceError::Api { status, body },
            GeminiApiError::Blocked(reason) => ServiceError::Blocked(reason),
            GeminiApiError::EmptyResponse(reason) => ServiceError::Empty(reason),
        }
    }
}

impl GeminiApi {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Call `generateContent` for `model`.
    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_url, model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Call the API and pull the reply text out of the first candidate.
    pub async fn generate_text(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        let response = self.generate_content(model, body).await?;

        if let Some(reason) = response.block_reason() {
            return Err(GeminiApiError::Blocked(reason));
        }

        response.text().ok_or_else(|| {
            GeminiApiError::EmptyResponse(
                response.finish_reason().unwrap_or("unknown").to_string(),
            )
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeminiApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GenerativeService for GeminiApi {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        let body = GenerateContentRequest::from(&request);

        tracing::debug!(
            model = %request.model,
            temperature = request.config.temperature,
            has_image = request.contents.image().is_some(),
            "Sending generateContent request",
        );

        match self.generate_text(&request.model, &body).await {
            Ok(text) => {
                tracing::debug!(model = %request.model, reply_len = text.len(), "Model replied");
                Ok(ServiceResponse { text })
            }
            Err(e) => {
                tracing::warn!(model = %request.model, error = %e, "generateContent failed");
                Err(e.into())
            }
        }
    }
}
