//! Handlers for the shared studio session.
//!
//! Every mutation returns the resulting [`StudioSnapshot`] and publishes it
//! to WebSocket subscribers. Submissions return `202 Accepted` with the
//! generation token; the outcome arrives through the snapshot stream.
//!
//! [`StudioSnapshot`]: svgsmith_core::studio::StudioSnapshot

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use svgsmith_core::image::{is_image_mime, ImageAttachment};
use svgsmith_core::settings::TraceSettings;
use svgsmith_core::style::Style;
use svgsmith_core::types::GenerationToken;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "file";

/// Request body for `PUT /studio/style`.
#[derive(Debug, Deserialize)]
pub struct SelectStyle {
    pub style: String,
}

/// Request body for `POST /studio/generate`.
#[derive(Debug, Deserialize)]
pub struct SubmitGeneration {
    #[serde(default)]
    pub prompt: String,
    /// Style override, applied only if the submission is accepted.
    pub style: Option<String>,
    /// Settings override, applied only if the submission is accepted.
    pub settings: Option<TraceSettings>,
}

#[derive(Debug, Serialize)]
pub struct SubmitAccepted {
    pub token: GenerationToken,
}

/// GET /api/v1/studio
pub async fn get_studio(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.studio.snapshot().await;
    Ok(Json(DataResponse { data: snapshot }))
}

/// PUT /api/v1/studio/style
///
/// Select the active style. Unknown ids are rejected with 400.
pub async fn select_style(
    State(state): State<AppState>,
    Json(input): Json<SelectStyle>,
) -> AppResult<impl IntoResponse> {
    let style: Style = input.style.parse()?;
    let snapshot = state.studio.select_style(style).await;

    tracing::info!(style = %style, "Studio style selected");

    Ok(Json(DataResponse { data: snapshot }))
}

/// PUT /api/v1/studio/settings
///
/// Replace the trace settings. Missing fields take their defaults.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<TraceSettings>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.studio.update_settings(settings).await;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/studio/image
///
/// Attach an image from the multipart field `file`. A file whose content
/// type is not `image/*` is ignored and the current snapshot is returned.
pub async fn attach_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !is_image_mime(mime_type.trim()) {
            tracing::debug!(mime_type = %mime_type, "Ignoring non-image upload");
            let snapshot = state.studio.snapshot().await;
            return Ok(Json(DataResponse { data: snapshot }));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        if bytes.len() > state.config.max_image_bytes {
            return Err(AppError::BadRequest(format!(
                "Image is {} bytes; the limit is {} bytes",
                bytes.len(),
                state.config.max_image_bytes
            )));
        }

        let Some(image) = ImageAttachment::from_bytes(&bytes, &mime_type) else {
            return Err(AppError::BadRequest(format!(
                "Unsupported image type '{mime_type}'"
            )));
        };

        let snapshot = state.studio.attach_image(image).await;
        tracing::info!(
            mime_type = %mime_type,
            size = bytes.len(),
            style = %snapshot.style,
            "Image attached",
        );
        return Ok(Json(DataResponse { data: snapshot }));
    }

    Err(AppError::BadRequest(format!(
        "Multipart field '{IMAGE_FIELD}' is required"
    )))
}

/// DELETE /api/v1/studio/image
pub async fn clear_image(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.studio.clear_image().await;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/studio/generate
///
/// Start a generation from the studio's current inputs.
///
/// Returns 202 with the generation token. Returns 400 when there is neither
/// a prompt nor an image and 409 while another generation is running; in
/// both cases the studio is left exactly as it was.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitGeneration>,
) -> AppResult<impl IntoResponse> {
    let style = input
        .style
        .as_deref()
        .map(str::parse::<Style>)
        .transpose()?;

    let token = state
        .studio
        .submit(&input.prompt, style, input.settings)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: SubmitAccepted { token },
        }),
    ))
}
