//! Handler for one-shot generation outside the studio session.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use svgsmith_core::generation::GenerationRequest;
use svgsmith_core::image::ImageAttachment;
use svgsmith_core::settings::TraceSettings;
use svgsmith_core::style::Style;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateInput {
    #[serde(default)]
    pub prompt: String,
    pub style: String,
    pub settings: Option<TraceSettings>,
    /// Browser `data:image/...;base64,...` URL of a reference image.
    pub image_data_url: Option<String>,
}

/// POST /api/v1/generate
///
/// Run one generation and wait for it. Does not touch the studio session.
///
/// Returns the artifact on success. Failures carry the error category,
/// details and suggestion; see [`AppError::Generation`].
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateInput>,
) -> AppResult<impl IntoResponse> {
    let style: Style = input.style.parse()?;

    let image = input.image_data_url.as_deref().and_then(|url| {
        let image = ImageAttachment::from_data_url(url);
        if image.is_none() {
            tracing::debug!("Ignoring image_data_url that is not a base64 image");
        }
        image
    });

    if let Some(image) = &image {
        if image.decoded_len() > state.config.max_image_bytes {
            return Err(AppError::BadRequest(format!(
                "Image is {} bytes; the limit is {} bytes",
                image.decoded_len(),
                state.config.max_image_bytes
            )));
        }
    }

    let request = GenerationRequest {
        prompt: input.prompt,
        image,
        style,
        settings: input.settings.filter(|_| style.has_advanced_settings()),
    };
    request.validate()?;

    let artifact = state.generator.run(&request).await?;

    Ok(Json(DataResponse { data: artifact }))
}
