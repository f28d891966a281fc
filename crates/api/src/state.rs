use std::sync::Arc;

use svgsmith_core::generation::Generator;

use crate::config::ServerConfig;
use crate::studio::StudioService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (upload limits, timeouts).
    pub config: Arc<ServerConfig>,
    /// Stateless generation pipeline used by `POST /generate`.
    pub generator: Generator,
    /// The shared studio session and its snapshot stream.
    pub studio: Arc<StudioService>,
}

impl AppState {
    /// Build state around `generator`, with a fresh studio session sharing it.
    pub fn new(config: ServerConfig, generator: Generator) -> Self {
        let studio = StudioService::new(generator.clone());
        Self {
            config: Arc::new(config),
            generator,
            studio,
        }
    }
}
