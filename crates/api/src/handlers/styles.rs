//! Handlers for the style catalog.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use svgsmith_core::composer::temperature_for;
use svgsmith_core::style::{catalog, Style, StyleInfo};

use crate::error::AppResult;
use crate::response::DataResponse;

/// Catalog entry plus the sampling temperature the style generates with.
#[derive(Debug, Serialize)]
pub struct StyleDetail {
    #[serde(flatten)]
    pub info: StyleInfo,
    pub temperature: f32,
}

/// GET /api/v1/styles
///
/// List every style in display order.
pub async fn list_styles() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: catalog() }))
}

/// GET /api/v1/styles/{id}
///
/// Look up one style by id or display name (case-insensitive).
pub async fn get_style(Path(id): Path<String>) -> AppResult<impl IntoResponse> {
    let style: Style = id.parse()?;

    Ok(Json(DataResponse {
        data: StyleDetail {
            info: StyleInfo::from(style),
            temperature: temperature_for(style),
        },
    }))
}
