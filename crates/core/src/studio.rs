//! Studio session state machine.
//!
//! One [`Studio`] holds the user's current selections (style, trace
//! settings, attached image) and the single "current result" slot, modelled
//! as one tagged [`StudioState`]:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ─┐
//!                    │                      │
//!                    └──err──▶ Error ───────┴──submit──▶ Loading ...
//! ```
//!
//! There is no terminal state. Only one request may be in flight: submitting
//! while Loading is rejected, never queued. Every accepted submission gets a
//! fresh [`GenerationToken`]; completions carrying an older token are
//! discarded so a slow reply can never overwrite a newer cycle.
//!
//! Image/style coupling: attaching an image while the default style is
//! selected switches to the trace style, and clearing the image while the
//! trace style is selected switches back. Any other combination is left as
//! the user chose it.

use serde::Serialize;

use crate::classify::GenerationError;
use crate::generation::{GeneratedArtifact, GenerationRequest};
use crate::image::ImageAttachment;
use crate::settings::TraceSettings;
use crate::style::Style;
use crate::types::GenerationToken;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The displayed lifecycle state; exactly one variant at any instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StudioState {
    #[default]
    Idle,
    Loading {
        token: GenerationToken,
    },
    Success {
        artifact: GeneratedArtifact,
    },
    Error {
        error: GenerationError,
    },
}

impl StudioState {
    pub fn is_loading(&self) -> bool {
        matches!(self, StudioState::Loading { .. })
    }

    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        match self {
            StudioState::Success { artifact } => Some(artifact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            StudioState::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Why a submission was dropped. The studio state is unchanged in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("Enter a prompt or attach an image before generating")]
    Empty,

    #[error("A generation is already in progress")]
    InFlight,
}

/// An accepted submission: the token to complete with and the request to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub token: GenerationToken,
    pub request: GenerationRequest,
}

/// Outcome of [`Studio::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The token did not match the in-flight request; nothing changed.
    Stale,
}

// ---------------------------------------------------------------------------
// Studio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Studio {
    style: Style,
    settings: TraceSettings,
    image: Option<ImageAttachment>,
    state: StudioState,
    last_token: GenerationToken,
}

impl Studio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Whether the trace-settings panel applies to the selected style.
    pub fn settings_visible(&self) -> bool {
        self.style.has_advanced_settings()
    }

    pub fn can_submit(&self, prompt: &str) -> bool {
        !self.is_loading() && (!prompt.trim().is_empty() || self.image.is_some())
    }

    // -- selections --

    /// Explicit user choice; overrides any automatic pairing.
    pub fn select_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn update_settings(&mut self, settings: TraceSettings) {
        self.settings = settings;
    }

    /// Attach an image, replacing any previous one.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
        if self.style == Style::DEFAULT {
            tracing::debug!(from = %self.style, to = %Style::TRACE, "Image attached, switching style");
            self.style = Style::TRACE;
        }
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        if self.style == Style::TRACE {
            tracing::debug!(from = %self.style, to = %Style::DEFAULT, "Image cleared, switching style");
            self.style = Style::DEFAULT;
        }
    }

    // -- lifecycle --

    /// Submit with the current selections.
    pub fn submit(&mut self, prompt: &str) -> Result<Ticket, SubmitRejection> {
        self.submit_with(prompt, None, None)
    }

    /// Submit, applying optional style/settings overrides once accepted.
    ///
    /// Entering Loading clears any previous artifact or error.
    pub fn submit_with(
        &mut self,
        prompt: &str,
        style: Option<Style>,
        settings: Option<TraceSettings>,
    ) -> Result<Ticket, SubmitRejection> {
        if self.is_loading() {
            return Err(SubmitRejection::InFlight);
        }
        if prompt.trim().is_empty() && self.image.is_none() {
            return Err(SubmitRejection::Empty);
        }

        if let Some(style) = style {
            self.style = style;
        }
        if let Some(settings) = settings {
            self.settings = settings;
        }

        self.last_token += 1;
        let token = self.last_token;
        self.state = StudioState::Loading { token };

        let request = GenerationRequest {
            prompt: prompt.to_string(),
            image: self.image.clone(),
            style: self.style,
            settings: self.settings_visible().then_some(self.settings),
        };

        Ok(Ticket { token, request })
    }

    /// Record the outcome of the request identified by `token`.
    pub fn complete(
        &mut self,
        token: GenerationToken,
        outcome: Result<GeneratedArtifact, GenerationError>,
    ) -> Completion {
        match self.state {
            StudioState::Loading { token: current } if current == token => {}
            _ => return Completion::Stale,
        }

        self.state = match outcome {
            Ok(artifact) => StudioState::Success { artifact },
            Err(error) => StudioState::Error { error },
        };
        Completion::Applied
    }

    pub fn snapshot(&self) -> StudioSnapshot {
        StudioSnapshot {
            state: self.state.clone(),
            style: self.style,
            settings: self.settings,
            settings_visible: self.settings_visible(),
            is_loading: self.is_loading(),
            image: self.image.as_ref().map(|img| ImagePreview {
                mime_type: img.mime_type.clone(),
                preview_url: img.preview_url.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Serializable view of a studio for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioSnapshot {
    pub state: StudioState,
    pub style: Style,
    pub settings: TraceSettings,
    pub settings_visible: bool,
    pub is_loading: bool,
    pub image: Option<ImagePreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePreview {
    pub mime_type: String,
    pub preview_url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
