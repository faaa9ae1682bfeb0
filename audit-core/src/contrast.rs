//! WCAG color and contrast math.
//!
//! Pure numeric functions over resolved colors. The gamma curve and
//! luminance weights follow WCAG 2.x exactly; changing them changes
//! compliance results.

use crate::node::{FontStyle, Rgb};

/// Contrast floor for body text (WCAG 1.4.3).
pub const BODY_TEXT_MIN_CONTRAST: f64 = 4.5;
/// Contrast floor for large text (WCAG 1.4.3).
pub const LARGE_TEXT_MIN_CONTRAST: f64 = 3.0;
/// Font size at which any text counts as large, in pixels.
pub const LARGE_TEXT_MIN_SIZE: f32 = 24.0;
/// Font size at which bold text counts as large, in pixels.
pub const LARGE_BOLD_TEXT_MIN_SIZE: f32 = 19.0;

/// Linearize one `sRGB` channel.
///
/// Applies the piecewise `sRGB` gamma curve: values at or below 0.04045
/// (normalized) are divided by 12.92, the rest go through the 2.4 exponent.
#[must_use]
pub fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color, in [0, 1].
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio between two colors, in [1, 21].
///
/// Symmetric in its arguments; identical colors yield exactly 1.0.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Whether text qualifies as "large" under WCAG 1.4.3.
///
/// Large means at least 24px, or bold and at least 19px. Absent or zero
/// font size is never large.
#[must_use]
pub fn is_large_text(font_size: Option<f32>, style: Option<&FontStyle>) -> bool {
    let Some(size) = font_size else {
        return false;
    };
    if size <= 0.0 {
        return false;
    }
    let bold = style.is_some_and(FontStyle::is_bold);
    size >= LARGE_TEXT_MIN_SIZE || (bold && size >= LARGE_BOLD_TEXT_MIN_SIZE)
}
