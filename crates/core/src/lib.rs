//! Core domain logic for svgsmith.
//!
//! Turns a handful of UI selections (prompt, optional image, style, trace
//! settings) into a request for a generative model, and turns the model's
//! free-text reply into SVG markup or a categorized error. The studio state
//! machine drives the Idle / Loading / Success / Error lifecycle that the
//! HTTP layer exposes to the browser.
//!
//! Nothing in this crate performs I/O directly; the model is reached through
//! the injected [`service::GenerativeService`] trait.

pub mod classify;
pub mod composer;
pub mod error;
pub mod generation;
pub mod image;
pub mod interpreter;
pub mod service;
pub mod settings;
pub mod studio;
pub mod style;
pub mod types;
