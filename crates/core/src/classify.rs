//! Error taxonomy and heuristic classification.
//!
//! The generative service reports failures as free text, so categories are
//! derived by substring matching on the lowercased message. Rules are an
//! ordered table evaluated first-match-wins; anything unmatched is treated
//! as a connection failure. Errors that are already classified (for
//! example a [`ErrorCategory::FormatError`] from the interpreter) pass
//! through untouched.

use std::fmt;

use serde::Serialize;

use crate::service::ServiceError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    ContentFlagged,
    Overloaded,
    InvalidRequest,
    AuthError,
    ConnectionError,
    FormatError,
}

impl ErrorCategory {
    /// Short user-facing headline.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCategory::ContentFlagged => "Content flagged",
            ErrorCategory::Overloaded => "Service busy",
            ErrorCategory::InvalidRequest => "Invalid request",
            ErrorCategory::AuthError => "Authentication failed",
            ErrorCategory::ConnectionError => "Generation failed",
            ErrorCategory::FormatError => "Invalid output",
        }
    }

    /// Fixed remediation text shown alongside the error.
    pub fn suggestion(self) -> &'static str {
        match self {
            ErrorCategory::ContentFlagged => "Your prompt or image triggered the safety filters. Try rephrasing the prompt or using a different image.",
            ErrorCategory::Overloaded => "The service is receiving too many requests or the quota is exhausted. Wait a minute and try again.",
            ErrorCategory::InvalidRequest => "The request was rejected as malformed. If you attached an image, try a smaller PNG or JPEG file.",
            ErrorCategory::AuthError => "The API credential is missing or invalid. Check that GEMINI_API_KEY is configured correctly.",
            ErrorCategory::ConnectionError => "Something went wrong reaching the model. Check your connection and try again.",
            ErrorCategory::FormatError => "Try again, or simplify the prompt so the model focuses on a single subject.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// A categorized, user-presentable generation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}: {details}")]
pub struct GenerationError {
    pub category: ErrorCategory,
    pub message: String,
    pub details: String,
    pub suggestion: Option<String>,
}

/// Fixed detail for replies that contain no SVG markup.
pub const FORMAT_ERROR_DETAILS: &str = "The model response did not contain valid SVG markup.";

impl GenerationError {
    /// Build an error with the category's fixed message and suggestion.
    pub fn new(category: ErrorCategory, details: impl Into<String>) -> Self {
        Self {
            category,
            message: category.message().to_string(),
            details: details.into(),
            suggestion: Some(category.suggestion().to_string()),
        }
    }

    pub fn format_error() -> Self {
        Self::new(ErrorCategory::FormatError, FORMAT_ERROR_DETAILS)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// One row of the classification table.
struct Rule {
    needles: &'static [&'static str],
    category: ErrorCategory,
}

/// Evaluated in order; the first rule with any matching needle wins.
const RULES: &[Rule] = &[
    Rule {
        needles: &["safety", "blocked"],
        category: ErrorCategory::ContentFlagged,
    },
    Rule {
        needles: &["429", "quota", "exhausted"],
        category: ErrorCategory::Overloaded,
    },
    Rule {
        needles: &["400", "invalid argument"],
        category: ErrorCategory::InvalidRequest,
    },
    Rule {
        needles: &["apikey", "api key", "403"],
        category: ErrorCategory::AuthError,
    },
];

/// Category for a raw service error message.
pub fn categorize(message: &str) -> ErrorCategory {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|n| lowered.contains(n)))
        .map_or(ErrorCategory::ConnectionError, |rule| rule.category)
}

/// Either a raw service failure or an error that is already classified.
#[derive(Debug)]
pub enum Failure {
    Service(ServiceError),
    Classified(GenerationError),
}

impl From<ServiceError> for Failure {
    fn from(err: ServiceError) -> Self {
        Failure::Service(err)
    }
}

impl From<GenerationError> for Failure {
    fn from(err: GenerationError) -> Self {
        Failure::Classified(err)
    }
}

/// Turn any failure into a [`GenerationError`].
///
/// Already-classified errors carrying a suggestion are returned unchanged.
pub fn classify(failure: Failure) -> GenerationError {
    match failure {
        Failure::Classified(err) if err.suggestion.is_some() => err,
        Failure::Classified(err) => GenerationError::new(categorize(&err.details), err.details),
        Failure::Service(err) => {
            let details = err.to_string();
            GenerationError::new(categorize(&details), details)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
