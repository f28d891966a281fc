//! Response interpreter: locate SVG markup in a free-text model reply.
//!
//! Extraction is textual only. The markup is never parsed or validated, so
//! whatever sits between the first `<svg` and the following `</svg>` is
//! returned as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::GenerationError;

/// First `<svg ...>...</svg>` span, case-insensitive, non-greedy, across lines.
static SVG_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b.*?</svg>").expect("valid regex"));

/// Markdown fences: ```svg, ```xml, ```html and bare ```.
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:svg|xml|html)?").expect("valid regex"));

/// Extract SVG markup from a raw model reply.
///
/// 1. Return the first complete `<svg>...</svg>` span verbatim.
/// 2. Otherwise strip code fences, trim, and return the cleaned text if it
///    still contains both `<svg` and `</svg>`.
/// 3. Otherwise fail with a format error.
pub fn interpret(raw: &str) -> Result<String, GenerationError> {
    if let Some(m) = SVG_BLOCK_RE.find(raw) {
        return Ok(m.as_str().to_string());
    }

    let cleaned = CODE_FENCE_RE.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.contains("<svg") && cleaned.contains("</svg>") {
        return Ok(cleaned.to_string());
    }

    tracing::debug!(reply_len = raw.len(), "No SVG markup found in model reply");
    Err(GenerationError::format_error())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
