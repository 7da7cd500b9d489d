//! Positioned text runs and their styling.

use serde::{Deserialize, Serialize};

/// Rotation below this many degrees is treated as upright text.
const ROTATION_EPSILON: f32 = 0.01;

/// One positioned run of same-style text from the source page.
///
/// Coordinates follow the page-description convention: `x`, `y` is the
/// bottom-left corner of the run and `y` grows upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Left edge in page units
    pub x: f32,

    /// Bottom edge in page units (y-up)
    pub y: f32,

    /// Advance width of the run
    #[serde(default)]
    pub width: f32,

    /// Height of the run's box
    #[serde(default)]
    pub height: f32,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Font family name (e.g., "Helvetica")
    #[serde(default)]
    pub font_family: String,

    /// Font weight keyword or number ("normal", "bold", "700")
    #[serde(default = "default_normal")]
    pub font_weight: String,

    /// Font style keyword ("normal", "italic", "oblique")
    #[serde(default = "default_normal")]
    pub font_style: String,

    /// Fill color (hex format, e.g., "#000000")
    #[serde(default = "default_color")]
    pub color: String,

    /// Rotation in degrees, if the run is not upright
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

fn default_font_size() -> f32 {
    10.0
}

fn default_normal() -> String {
    "normal".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

impl TextRun {
    /// Create a run with default styling.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height: font_size,
            font_size,
            font_family: "Helvetica".to_string(),
            font_weight: default_normal(),
            font_style: default_normal(),
            color: default_color(),
            rotation: None,
        }
    }

    /// Set the box height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the font family.
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the font weight.
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = weight.into();
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Right edge in page units.
    pub fn right(&self) -> f32 {
        self.x + self.width.max(0.0)
    }

    /// Top edge in page units (y-up).
    pub fn top(&self) -> f32 {
        self.y + self.height.max(0.0)
    }

    /// Whether the run is drawn at a non-zero angle.
    pub fn is_rotated(&self) -> bool {
        self.rotation
            .map(|r| r.abs() > ROTATION_EPSILON)
            .unwrap_or(false)
    }

    /// Whether the run carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Styling snapshot of this run.
    pub fn style(&self) -> RunStyle {
        RunStyle {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight.clone(),
            font_style: self.font_style.clone(),
            color: self.color.clone(),
        }
    }
}

/// Styling that a renderer re-applies to a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Font family name
    pub font_family: String,

    /// Font size in points
    pub font_size: f32,

    /// Font weight keyword or number
    pub font_weight: String,

    /// Font style keyword
    pub font_style: String,

    /// Fill color
    pub color: String,
}

impl RunStyle {
    /// Whether two styles render identically.
    pub fn same_style(&self, other: &RunStyle) -> bool {
        self.font_family == other.font_family
            && (self.font_size - other.font_size).abs() < 0.01
            && self.font_weight == other.font_weight
            && self.font_style == other.font_style
            && self.color == other.color
    }

    /// Check if the weight reads as bold.
    pub fn is_bold(&self) -> bool {
        let weight = self.font_weight.to_lowercase();
        weight.contains("bold")
            || weight.contains("black")
            || weight.contains("heavy")
            || weight.parse::<u16>().map(|w| w >= 600).unwrap_or(false)
    }

    /// Check if the style reads as italic.
    pub fn is_italic(&self) -> bool {
        let style = self.font_style.to_lowercase();
        style.contains("italic") || style.contains("oblique")
    }
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            font_size: default_font_size(),
            font_weight: default_normal(),
            font_style: default_normal(),
            color: default_color(),
        }
    }
}

/// A run of same-style text with inferred spaces already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRun {
    /// The text content, including inferred spaces
    pub text: String,

    /// Styling shared by the whole run
    pub style: RunStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_from_json() {
        let run: TextRun = serde_json::from_str(r#"{"text":"Hi","x":1.0,"y":2.0}"#).unwrap();
        assert_eq!(run.font_weight, "normal");
        assert_eq!(run.color, "#000000");
        assert_eq!(run.font_size, 10.0);
        assert!(run.rotation.is_none());
    }

    #[test]
    fn test_rotation_detection() {
        let run = TextRun::new("a", 0.0, 0.0, 5.0, 10.0);
        assert!(!run.is_rotated());
        assert!(!run.clone().with_rotation(0.001).is_rotated());
        assert!(run.with_rotation(90.0).is_rotated());
    }

    #[test]
    fn test_style_bold_detection() {
        let run = TextRun::new("a", 0.0, 0.0, 5.0, 10.0).with_weight("700");
        assert!(run.style().is_bold());

        let run = TextRun::new("a", 0.0, 0.0, 5.0, 10.0).with_weight("SemiBold");
        assert!(run.style().is_bold());
        assert!(!run.style().is_italic());
    }

    #[test]
    fn test_same_style() {
        let a = TextRun::new("a", 0.0, 0.0, 5.0, 10.0).style();
        let mut b = a.clone();
        b.font_size = 10.001;
        assert!(a.same_style(&b));
        b.color = "#FF0000".to_string();
        assert!(!a.same_style(&b));
    }
}
