//! Style catalog.
//!
//! A fixed set of visual styles, each carrying a human-readable description,
//! example prompts, the rule text injected into the system instruction, and
//! whether the style exposes the secondary trace settings. Every lookup is
//! an exhaustive `match`, so a style without a catalog entry does not compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Visual rendering preset guiding the model's output aesthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Flat,
    Material,
    Minimalist,
    LowPoly,
    HandDrawn,
    Gradient,
    Cyberpunk,
    PopArt,
    VectorTrace,
    Blueprint,
    PixelArt,
    Isometric,
    LineArt,
    PaperCutout,
}

impl Style {
    /// Every style, in catalog display order.
    pub const ALL: [Style; 14] = [
        Style::Flat,
        Style::Material,
        Style::Minimalist,
        Style::LowPoly,
        Style::HandDrawn,
        Style::Gradient,
        Style::Cyberpunk,
        Style::PopArt,
        Style::VectorTrace,
        Style::Blueprint,
        Style::PixelArt,
        Style::Isometric,
        Style::LineArt,
        Style::PaperCutout,
    ];

    /// Style selected when a studio is created and after an image is cleared.
    pub const DEFAULT: Style = Style::Flat;

    /// Image-tracing style paired with an attached image.
    pub const TRACE: Style = Style::VectorTrace;

    /// Stable kebab-case identifier used on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Style::Flat => "flat",
            Style::Material => "material",
            Style::Minimalist => "minimalist",
            Style::LowPoly => "low-poly",
            Style::HandDrawn => "hand-drawn",
            Style::Gradient => "gradient",
            Style::Cyberpunk => "cyberpunk",
            Style::PopArt => "pop-art",
            Style::VectorTrace => "vector-trace",
            Style::Blueprint => "blueprint",
            Style::PixelArt => "pixel-art",
            Style::Isometric => "isometric",
            Style::LineArt => "line-art",
            Style::PaperCutout => "paper-cutout",
        }
    }

    /// Human-readable label, also interpolated into user instructions.
    pub fn display_name(self) -> &'static str {
        match self {
            Style::Flat => "Flat",
            Style::Material => "Material",
            Style::Minimalist => "Minimalist",
            Style::LowPoly => "Low Poly",
            Style::HandDrawn => "Hand Drawn",
            Style::Gradient => "Gradient",
            Style::Cyberpunk => "Cyberpunk",
            Style::PopArt => "Pop Art",
            Style::VectorTrace => "Vector Trace",
            Style::Blueprint => "Blueprint",
            Style::PixelArt => "Pixel Art",
            Style::Isometric => "Isometric",
            Style::LineArt => "Line Art",
            Style::PaperCutout => "Paper Cutout",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Style::Flat => "Clean solid shapes with no shading, the classic icon and illustration look.",
            Style::Material => "Layered paper surfaces with subtle drop shadows and bold accent colors.",
            Style::Minimalist => "As few shapes as possible, generous negative space, restrained palette.",
            Style::LowPoly => "Faceted triangular geometry with flat-shaded polygons.",
            Style::HandDrawn => "Loose, organic strokes that feel sketched by hand.",
            Style::Gradient => "Smooth color transitions and glowing, vibrant blends.",
            Style::Cyberpunk => "Neon outlines on dark backgrounds with a high-tech, dystopian edge.",
            Style::PopArt => "Bold outlines, halftone dots and saturated comic-book colors.",
            Style::VectorTrace => "Faithfully converts an uploaded image into clean vector paths.",
            Style::Blueprint => "Technical white linework on a blueprint-blue grid.",
            Style::PixelArt => "Crisp square pixels on a coarse grid, retro game aesthetic.",
            Style::Isometric => "Three-quarter isometric projection with consistent 30 degree axes.",
            Style::LineArt => "Pure outlines with consistent stroke weight and no fills.",
            Style::PaperCutout => "Stacked paper layers with soft shadows between cut shapes.",
        }
    }

    /// Ordered example prompts shown as suggestions in the UI.
    pub fn example_prompts(self) -> &'static [&'static str] {
        match self {
            Style::Flat => &[
                "A red fox sitting under a crescent moon",
                "A coffee cup with rising steam",
                "A rocket launching over green hills",
            ],
            Style::Material => &[
                "A weather app icon with sun and clouds",
                "A stack of colorful folders",
                "A camera lens on a teal card",
            ],
            Style::Minimalist => &[
                "A single mountain peak at dawn",
                "A paper plane in flight",
                "A leaf on a plain background",
            ],
            Style::LowPoly => &[
                "A wolf head made of triangles",
                "A desert canyon at sunset",
                "A diamond floating in space",
            ],
            Style::HandDrawn => &[
                "A doodle of a cat napping on books",
                "A sketched bicycle leaning on a wall",
                "A hand-lettered 'hello' banner",
            ],
            Style::Gradient => &[
                "A glowing abstract wave",
                "A sunset over the ocean",
                "A colorful hummingbird",
            ],
            Style::Cyberpunk => &[
                "A neon city skyline in the rain",
                "A robot samurai with a glowing blade",
                "A hacker terminal with floating code",
            ],
            Style::PopArt => &[
                "A surprised woman with a speech bubble",
                "A cherry soda can exploding with fizz",
                "A lightning bolt with 'ZAP!' text",
            ],
            Style::VectorTrace => &[
                "Trace this logo exactly",
                "Convert this photo into clean shapes",
                "Vectorize this sketch",
            ],
            Style::Blueprint => &[
                "A vintage airplane schematic",
                "Floor plan of a small cottage",
                "Exploded view of a mechanical watch",
            ],
            Style::PixelArt => &[
                "An 8-bit treasure chest",
                "A pixel knight with a sword",
                "A retro space invader",
            ],
            Style::Isometric => &[
                "An isometric coffee shop",
                "A tiny isometric island with a lighthouse",
                "An isometric server room",
            ],
            Style::LineArt => &[
                "A single-line portrait of a woman",
                "An outline of a city bridge",
                "A botanical line drawing of a fern",
            ],
            Style::PaperCutout => &[
                "A layered forest with deer",
                "An underwater scene with coral",
                "A mountain range in paper layers",
            ],
        }
    }

    /// Rule text ("Goal") injected into the system instruction.
    pub fn rule(self) -> &'static str {
        match self {
            Style::Flat => "Goal: Flat design. Use solid fills only, no gradients, no shadows, no textures. Simple geometric shapes with a cohesive, limited palette.",
            Style::Material => "Goal: Material design. Layered flat surfaces with subtle, soft drop shadows implying elevation. Bold primary colors with tonal accents.",
            Style::Minimalist => "Goal: Minimalist design. Use the fewest shapes that still read clearly. Generous negative space, at most three colors.",
            Style::LowPoly => "Goal: Low-poly art. Build every form from flat-shaded triangles. Vary triangle brightness to suggest lighting and depth.",
            Style::HandDrawn => "Goal: Hand-drawn illustration. Slightly irregular, organic strokes and shapes that feel sketched, with a warm informal character.",
            Style::Gradient => "Goal: Gradient art. Use linear and radial gradients generously to produce smooth, vibrant, luminous color transitions.",
            Style::Cyberpunk => "Goal: Cyberpunk aesthetic. Dark background, neon magenta, cyan and yellow outlines, glow effects and futuristic tech details.",
            Style::PopArt => "Goal: Pop art. Thick black outlines, halftone dot patterns, saturated primary colors and comic-book energy.",
            Style::VectorTrace => "Goal: Precise vector trace. Reproduce the source faithfully as clean vector paths, preserving proportions, silhouettes and color regions. Do not add or invent elements.",
            Style::Blueprint => "Goal: Technical blueprint. White or light-cyan linework on a deep blue background with a subtle grid, dimension lines and annotations.",
            Style::PixelArt => "Goal: Pixel art. Compose the image from equal-sized square rects aligned to a coarse grid. Limited retro palette, no anti-aliasing.",
            Style::Isometric => "Goal: Isometric illustration. Strict isometric projection with 30 degree axes, consistent light direction and three visible faces per solid.",
            Style::LineArt => "Goal: Line art. Express the subject purely through strokes with consistent weight. No shading.",
            Style::PaperCutout => "Goal: Paper cutout. Stack flat layered shapes with soft shadows between layers to mimic cut paper depth.",
        }
    }

    /// Whether the secondary trace-settings schema applies to this style.
    pub fn has_advanced_settings(self) -> bool {
        matches!(self, Style::VectorTrace | Style::LineArt)
    }

    /// Parse a style from its id or display name (case-insensitive).
    pub fn from_id(value: &str) -> Option<Style> {
        let needle = value.trim();
        Style::ALL.into_iter().find(|style| {
            style.id().eq_ignore_ascii_case(needle)
                || style.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::DEFAULT
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Style {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::from_id(s).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown style '{s}'. Must be one of: {}",
                Style::ALL.map(Style::id).join(", ")
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog listing
// ---------------------------------------------------------------------------

/// Serializable catalog entry for one style.
#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub id: Style,
    pub name: &'static str,
    pub description: &'static str,
    pub example_prompts: &'static [&'static str],
    pub has_advanced_settings: bool,
}

impl From<Style> for StyleInfo {
    fn from(style: Style) -> Self {
        Self {
            id: style,
            name: style.display_name(),
            description: style.description(),
            example_prompts: style.example_prompts(),
            has_advanced_settings: style.has_advanced_settings(),
        }
    }
}

/// The full catalog in display order.
pub fn catalog() -> Vec<StyleInfo> {
    Style::ALL.into_iter().map(StyleInfo::from).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fourteen_unique_styles() {
        let ids: std::collections::HashSet<_> = Style::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 14);
        assert_eq!(catalog().len(), 14);
    }

    #[test]
    fn only_trace_and_line_art_have_advanced_settings() {
        let advanced: Vec<_> = Style::ALL
            .into_iter()
            .filter(|s| s.has_advanced_settings())
            .collect();
        assert_eq!(advanced, vec![Style::VectorTrace, Style::LineArt]);
    }

    #[test]
    fn every_style_has_catalog_text() {
        for style in Style::ALL {
            assert!(!style.description().is_empty(), "{style} description");
            assert!(!style.example_prompts().is_empty(), "{style} examples");
            assert!(style.rule().starts_with("Goal:"), "{style} rule");
        }
    }

    #[test]
    fn parses_ids_and_display_names() {
        assert_eq!(Style::from_id("vector-trace"), Some(Style::VectorTrace));
        assert_eq!(Style::from_id("Low Poly"), Some(Style::LowPoly));
        assert_eq!(Style::from_id("  PIXEL-ART "), Some(Style::PixelArt));
        assert_eq!(Style::from_id("watercolor"), None);
    }

    #[test]
    fn unknown_style_is_validation_error() {
        let err = "watercolor".parse::<Style>().unwrap_err();
        assert!(err.to_string().contains("Unknown style 'watercolor'"));
    }

    #[test]
    fn serde_uses_kebab_case_ids() {
        for style in Style::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.id()));
            let back: Style = serde_json::from_str(&json).unwrap();
            assert_eq!(back, style);
        }
    }

    #[test]
    fn default_is_flat() {
        assert_eq!(Style::default(), Style::Flat);
    }
}
