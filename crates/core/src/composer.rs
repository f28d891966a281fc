//! Request composer.
//!
//! Builds the system instruction, user instruction and sampling temperature
//! for one generation request. Everything here is pure string assembly; the
//! network call happens in [`crate::generation`].
//!
//! The caller-supplied prompt is interpolated verbatim. It is never escaped
//! or validated, so quotes or braces in the prompt reach the model as typed.

use serde::Serialize;

use crate::generation::GenerationRequest;
use crate::settings::TraceSettings;
use crate::style::Style;

// ---------------------------------------------------------------------------
// Temperature bands
// ---------------------------------------------------------------------------

/// Precision-oriented styles: trace, blueprint, pixel art, isometric.
pub const TEMPERATURE_PRECISE: f32 = 0.15;
/// Balanced styles: flat, material, minimalist, low poly.
pub const TEMPERATURE_BALANCED: f32 = 0.3;
/// Creative styles: hand drawn, gradient, cyberpunk, pop art.
pub const TEMPERATURE_CREATIVE: f32 = 0.6;
/// Any style outside the three bands.
pub const TEMPERATURE_DEFAULT: f32 = 0.4;

/// Sampling temperature for a style.
pub fn temperature_for(style: Style) -> f32 {
    match style {
        Style::VectorTrace | Style::Blueprint | Style::PixelArt | Style::Isometric => {
            TEMPERATURE_PRECISE
        }
        Style::Flat | Style::Material | Style::Minimalist | Style::LowPoly => TEMPERATURE_BALANCED,
        Style::HandDrawn | Style::Gradient | Style::Cyberpunk | Style::PopArt => {
            TEMPERATURE_CREATIVE
        }
        _ => TEMPERATURE_DEFAULT,
    }
}

/// Temperature for a raw style id; unknown ids fall back to the default band.
pub fn temperature_for_id(id: &str) -> f32 {
    Style::from_id(id).map_or(TEMPERATURE_DEFAULT, temperature_for)
}

// ---------------------------------------------------------------------------
// Fixed instruction text
// ---------------------------------------------------------------------------

const SYSTEM_PREAMBLE: &str = "You are an expert vector illustrator and SVG engineer. \
You turn text descriptions and reference images into clean, production-ready SVG artwork.";

/// Technical directives appended to every system instruction, in order.
pub const TECHNICAL_DIRECTIVES: [&str; 5] = [
    "Output format: respond with ONLY the raw SVG code, starting with <svg and ending with </svg>. No markdown fences, no explanations.",
    "Sizing: define the canvas with a viewBox attribute only. Do not set fixed width or height attributes.",
    "Optimization: merge paths where possible, group related elements with <g>, and avoid redundant attributes or hidden elements.",
    "Self-containment: the SVG must not reference external images, fonts, scripts or stylesheets.",
    "Path quality: close every shape cleanly (use Z), with no gaps, stray points or overlapping artifacts.",
];

// ---------------------------------------------------------------------------
// Style block
// ---------------------------------------------------------------------------

/// Settings directives for an advanced style, one `- ` line per field.
///
/// Order is fixed: complexity and colors (trace only), fill (line art only),
/// then stroke weight and line cap for both. Fields that do not apply to the
/// style produce no line at all. Non-advanced styles yield an empty string.
pub fn compose_settings_block(style: Style, settings: &TraceSettings) -> String {
    if !style.has_advanced_settings() {
        return String::new();
    }

    let mut directives = Vec::with_capacity(4);
    if style == Style::VectorTrace {
        directives.push(settings.complexity.directive());
        directives.push(settings.colors.directive());
    }
    if style == Style::LineArt {
        directives.push(settings.line_fill.directive());
    }
    directives.push(settings.stroke_weight.directive());
    directives.push(settings.line_cap.directive());

    directives
        .into_iter()
        .map(|d| format!("- {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Goal text for the style, followed by the settings block when the style
/// is advanced and settings were supplied.
pub fn style_instruction(style: Style, settings: Option<&TraceSettings>) -> String {
    match settings {
        Some(settings) if style.has_advanced_settings() => format!(
            "{}\nSettings:\n{}",
            style.rule(),
            compose_settings_block(style, settings)
        ),
        _ => style.rule().to_string(),
    }
}

/// Full system instruction: preamble, style block, technical directives.
pub fn system_instruction(style: Style, settings: Option<&TraceSettings>) -> String {
    let technical = TECHNICAL_DIRECTIVES
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {d}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{SYSTEM_PREAMBLE}\n\nStyle:\n{}\n\nTechnical requirements:\n{technical}",
        style_instruction(style, settings)
    )
}

// ---------------------------------------------------------------------------
// User instruction
// ---------------------------------------------------------------------------

/// User instruction; exactly one of the two templates applies.
pub fn user_instruction(prompt: &str, has_image: bool, style: Style) -> String {
    let name = style.display_name();
    if has_image {
        let approach = if style == Style::TRACE {
            "Trace the image precisely, reproducing its shapes, proportions and colors as clean vector paths.".to_string()
        } else {
            format!("Use the image as a reference for subject and composition, reinterpreting it in the {name} style.")
        };
        format!(
            "Create an SVG from the attached image in the {name} style. {approach}\nAdditional instructions: {prompt}"
        )
    } else {
        format!("Create an SVG illustration of \"{prompt}\" in the {name} style.")
    }
}

// ---------------------------------------------------------------------------
// Compose
// ---------------------------------------------------------------------------

/// Everything needed to call the model for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedPrompt {
    pub system_instruction: String,
    pub user_instruction: String,
    pub temperature: f32,
}

pub fn compose(request: &GenerationRequest) -> ComposedPrompt {
    ComposedPrompt {
        system_instruction: system_instruction(request.style, request.settings.as_ref()),
        user_instruction: user_instruction(&request.prompt, request.image.is_some(), request.style),
        temperature: temperature_for(request.style),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
