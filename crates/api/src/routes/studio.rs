//! Route definitions for the shared studio session.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::studio;
use crate::state::AppState;

/// Studio routes mounted at `/studio`.
///
/// ```text
/// GET    /            -> get_studio
/// PUT    /style       -> select_style
/// PUT    /settings    -> update_settings
/// POST   /image       -> attach_image (multipart, field `file`)
/// DELETE /image       -> clear_image
/// POST   /generate    -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(studio::get_studio))
        .route("/style", put(studio::select_style))
        .route("/settings", put(studio::update_settings))
        .route(
            "/image",
            post(studio::attach_image).delete(studio::clear_image),
        )
        .route("/generate", post(studio::submit))
}
