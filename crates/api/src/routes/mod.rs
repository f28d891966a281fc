pub mod generate;
pub mod health;
pub mod studio;
pub mod styles;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                         studio snapshot stream (WebSocket)
///
/// /styles                     list the style catalog
/// /styles/{id}                one style with its sampling temperature
///
/// /studio                     current snapshot (GET)
/// /studio/style               select style (PUT)
/// /studio/settings            update trace settings (PUT)
/// /studio/image               attach (POST multipart), clear (DELETE)
/// /studio/generate            submit the current inputs (POST)
///
/// /generate                   one-shot synchronous generation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Style catalog.
        .nest("/styles", styles::router())
        // Shared studio session.
        .nest("/studio", studio::router())
        // Stateless generation.
        .merge(generate::router())
}
