//! Lines and regions produced by layout analysis.

use serde::{Deserialize, Serialize};

use super::geometry::serde_distance;
use super::{MergedRun, Paragraph, Rect, TextRun};

/// Glyph runs believed to share one baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Source runs, sorted by X position
    pub items: Vec<TextRun>,

    /// Reconstructed text with inferred spaces
    pub text: String,

    /// Bounding box in layout space
    pub rect: Rect,

    /// Leftmost X position
    pub min_x: f32,

    /// Rightmost X position
    pub max_x: f32,

    /// Top edge in page space (y-up)
    pub top_pdf: f32,

    /// Line box height
    pub height: f32,

    /// Whether any run in the line is rotated
    pub has_rotation: bool,

    /// Average font size of the runs
    pub avg_font_size: f32,

    /// Most common font family among the runs
    pub dominant_font: String,

    /// Style-merged runs for rich output
    #[serde(default)]
    pub merged_runs: Vec<MergedRun>,
}

impl TextLine {
    /// Top edge in layout space.
    pub fn top(&self) -> f32 {
        self.rect.top
    }

    /// Bottom edge in layout space.
    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }

    /// Left edge in layout space.
    pub fn left(&self) -> f32 {
        self.rect.left
    }

    /// Whether the line is made of a single run.
    pub fn is_single_run(&self) -> bool {
        self.items.len() == 1
    }
}

/// A maximal run of lines with no disqualifying visual break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Lines in reading order
    pub lines: Vec<TextLine>,

    /// Bounding box of all lines
    pub rect: Rect,

    /// Whether an obstacle disqualifies this region
    pub overlaps_obstacle: bool,

    /// Distance to the closest obstacle (`null` in JSON when there is none)
    #[serde(with = "serde_distance")]
    pub nearest_obstacle_distance: f32,

    /// Whether the lines can be reflowed into paragraphs
    pub flow_allowed: bool,

    /// Paragraphs, populated only for flow-allowed regions
    pub paragraphs: Vec<Paragraph>,
}

impl TextRegion {
    /// Plain text of the region: paragraphs when reflowed, raw lines otherwise.
    pub fn plain_text(&self) -> String {
        if self.flow_allowed && !self.paragraphs.is_empty() {
            self.paragraphs
                .iter()
                .map(|p| p.text())
                .collect::<Vec<_>>()
                .join("\n\n")
        } else {
            self.lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    /// Number of lines in the region.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
