use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// One-shot generation route, merged at the `/api/v1` root.
///
/// ```text
/// POST /generate   -> generate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate))
}
