//! Trace settings: the secondary options for the two advanced styles.
//!
//! Each field is an independent enum with a direct text lookup used by the
//! composer. Settings are only meaningful for styles where
//! [`Style::has_advanced_settings`](crate::style::Style::has_advanced_settings)
//! is true; elsewhere they are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    pub fn directive(self) -> &'static str {
        match self {
            Complexity::Low => "Detail level: LOW. Simplify aggressively into a small number of large, bold shapes. Drop fine texture and minor details.",
            Complexity::Medium => "Detail level: MEDIUM. Keep the main forms and the most recognisable details, smoothing away noise.",
            Complexity::High => "Detail level: HIGH. Preserve fine detail, small features and subtle contours as faithfully as possible.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Monochrome,
    Limited,
    #[default]
    Full,
}

impl ColorMode {
    pub fn directive(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "Colors: MONOCHROME. Use black and white only (one dark tone on a light ground).",
            ColorMode::Limited => "Colors: LIMITED. Reduce the palette to at most six flat colors sampled from the source.",
            ColorMode::Full => "Colors: FULL. Reproduce the full range of colors in the source as distinct flat regions.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWeight {
    Thin,
    #[default]
    Standard,
    Thick,
}

impl StrokeWeight {
    pub fn directive(self) -> &'static str {
        match self {
            StrokeWeight::Thin => "Stroke weight: THIN. Use stroke-width around 1 (relative to a 512 unit viewBox).",
            StrokeWeight::Standard => "Stroke weight: STANDARD. Use stroke-width around 2-3 (relative to a 512 unit viewBox).",
            StrokeWeight::Thick => "Stroke weight: THICK. Use stroke-width around 5-6 (relative to a 512 unit viewBox).",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn directive(self) -> &'static str {
        match self {
            LineCap::Butt => "Line caps: use stroke-linecap=\"butt\" and stroke-linejoin=\"miter\" for sharp, exact ends.",
            LineCap::Round => "Line caps: use stroke-linecap=\"round\" and stroke-linejoin=\"round\" for soft ends.",
            LineCap::Square => "Line caps: use stroke-linecap=\"square\" and stroke-linejoin=\"bevel\" for squared-off ends.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFill {
    #[default]
    None,
    Solid,
}

impl LineFill {
    pub fn directive(self) -> &'static str {
        match self {
            LineFill::None => "Fill: NONE. Every shape uses fill=\"none\"; the drawing is strokes only.",
            LineFill::Solid => "Fill: SOLID. Closed outlines may be filled with flat color beneath their strokes.",
        }
    }
}

/// Secondary options refining output for the two advanced styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    pub complexity: Complexity,
    pub colors: ColorMode,
    pub stroke_weight: StrokeWeight,
    pub line_cap: LineCap,
    pub line_fill: LineFill,
}
