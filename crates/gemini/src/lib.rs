//! Google Generative Language REST client.
//!
//! Provides the typed `generateContent` wire format, an HTTP wrapper built
//! on [`reqwest`], and an implementation of
//! [`svgsmith_core::service::GenerativeService`] so the client can be
//! injected wherever the core expects a generative model.

pub mod api;
pub mod config;
pub mod messages;

pub use api::{GeminiApi, GeminiApiError};
pub use config::GeminiConfig;
