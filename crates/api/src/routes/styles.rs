use axum::routing::get;
use axum::Router;

use crate::handlers::styles;
use crate::state::AppState;

/// Style catalog routes mounted at `/styles`.
///
/// ```text
/// GET /        -> list_styles
/// GET /{id}    -> get_style
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(styles::list_styles))
        .route("/{id}", get(styles::get_style))
}
