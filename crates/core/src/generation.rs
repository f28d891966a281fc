//! Single-attempt generation pipeline.
//!
//! compose -> call the injected service -> interpret -> mint an artifact.
//! Service failures are classified; interpreter failures are already
//! classified and pass through unchanged. Nothing is retried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::{classify, ErrorCategory, Failure, GenerationError};
use crate::composer::{compose, ComposedPrompt};
use crate::error::CoreError;
use crate::image::ImageAttachment;
use crate::interpreter::interpret;
use crate::service::{Contents, GenerativeService, InlineData, SamplingConfig, ServiceRequest};
use crate::settings::TraceSettings;
use crate::style::Style;
use crate::types::{ArtifactId, Timestamp};

/// Default nucleus sampling cutoff.
pub const DEFAULT_TOP_P: f32 = 0.95;
/// Default top-k sampling cutoff.
pub const DEFAULT_TOP_K: u32 = 40;

// ---------------------------------------------------------------------------
// Request / artifact
// ---------------------------------------------------------------------------

/// One ephemeral generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
    pub style: Style,
    pub settings: Option<TraceSettings>,
}

impl GenerationRequest {
    /// A request needs a non-blank prompt or an attached image.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.prompt.trim().is_empty() && self.image.is_none() {
            return Err(CoreError::Validation(
                "A prompt or an image is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// The result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedArtifact {
    pub id: ArtifactId,
    pub svg: String,
    pub prompt: String,
    pub created_at: Timestamp,
}

impl GeneratedArtifact {
    pub fn new(svg: String, prompt: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            svg,
            prompt,
            created_at: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Runs generation requests against an injected [`GenerativeService`].
#[derive(Clone)]
pub struct Generator {
    service: Arc<dyn GenerativeService>,
    top_p: f32,
    top_k: u32,
}

impl Generator {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self {
            service,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the sampling cutoffs sent with every request.
    pub fn with_sampling(mut self, top_p: f32, top_k: u32) -> Self {
        self.top_p = top_p;
        self.top_k = top_k;
        self
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }

    /// Build the service request for a composed prompt.
    pub fn build_request(
        &self,
        request: &GenerationRequest,
        composed: ComposedPrompt,
    ) -> ServiceRequest {
        let contents = match &request.image {
            Some(image) => Contents::WithImage {
                image: InlineData {
                    data: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                },
                text: composed.user_instruction,
            },
            None => Contents::Text {
                text: composed.user_instruction,
            },
        };

        ServiceRequest {
            model: self.service.model().to_string(),
            contents,
            config: SamplingConfig {
                system_instruction: composed.system_instruction,
                temperature: composed.temperature,
                top_p: self.top_p,
                top_k: self.top_k,
            },
        }
    }

    /// Run one generation attempt end to end.
    pub async fn run(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        request
            .validate()
            .map_err(|e| GenerationError::new(ErrorCategory::InvalidRequest, e.to_string()))?;

        let composed = compose(request);
        tracing::debug!(
            style = %request.style,
            temperature = composed.temperature,
            has_image = request.image.is_some(),
            "Composed generation request",
        );

        let service_request = self.build_request(request, composed);
        let response = self
            .service
            .generate(service_request)
            .await
            .map_err(|e| classify(Failure::from(e)))?;

        let svg = interpret(&response.text).map_err(|e| classify(Failure::from(e)))?;

        let artifact = GeneratedArtifact::new(svg, request.prompt.clone());
        tracing::info!(
            artifact_id = %artifact.id,
            style = %request.style,
            svg_len = artifact.svg.len(),
            "Generated artwork",
        );
        Ok(artifact)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
