//! Per-line geometry calibration.

use super::Glyph;

/// Base word-break threshold, in character widths of gap.
pub const BASE_WORD_BREAK_THRESHOLD: f32 = 0.9;

/// Approximate character width as a fraction of font size when no better
/// metric is available. 0.5 is a reasonable default for proportional fonts.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Below this many non-space characters the measured width is not trusted.
const MIN_MEASURED_CHARS: usize = 2;

/// Font size assumed when runs report none.
const FALLBACK_FONT_SIZE: f32 = 10.0;

/// Per-line estimate of character width and word-break threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometryModel {
    /// Average width of one non-space character (> 0)
    pub estimated_char_width: f32,
    /// Gap, in character widths, that separates words (> 0)
    pub word_break_threshold_by_char: f32,
    /// Average font size of the line (> 0)
    pub avg_font_size: f32,
}

impl LineGeometryModel {
    /// Derive the model from the glyphs of one line.
    pub fn from_glyphs(glyphs: &[Glyph<'_>]) -> Self {
        let avg_font_size = if glyphs.is_empty() {
            FALLBACK_FONT_SIZE
        } else {
            glyphs.iter().map(|g| g.font_size).sum::<f32>() / glyphs.len() as f32
        };
        let avg_font_size = if avg_font_size.is_finite() && avg_font_size > 0.0 {
            avg_font_size
        } else {
            FALLBACK_FONT_SIZE
        };

        let mut visible_width = 0.0f32;
        let mut visible_chars = 0usize;
        for glyph in glyphs {
            let total = glyph.char_count();
            let visible = glyph.text.chars().filter(|c| !c.is_whitespace()).count();
            if total == 0 || visible == 0 {
                continue;
            }
            visible_width += glyph.width * visible as f32 / total as f32;
            visible_chars += visible;
        }

        let floor = avg_font_size * APPROX_CHAR_WIDTH_RATIO;
        let estimated_char_width = if visible_chars >= MIN_MEASURED_CHARS && visible_width > 0.0 {
            visible_width / visible_chars as f32
        } else {
            floor
        };

        Self {
            estimated_char_width,
            word_break_threshold_by_char: BASE_WORD_BREAK_THRESHOLD,
            avg_font_size,
        }
    }
}
