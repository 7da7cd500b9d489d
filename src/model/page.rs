//! Page-level input and output types.

use serde::{Deserialize, Serialize};

use super::{PageRect, TextLine, TextRegion, TextRun};
use crate::error::{Error, Result};

/// Everything the page parser hands over for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    /// Page number (1-indexed)
    #[serde(default = "default_page_number")]
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Positioned text runs, in any order
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Image placements
    #[serde(default)]
    pub images: Vec<PageRect>,

    /// Vector graphics bounding boxes
    #[serde(default)]
    pub graphics: Vec<PageRect>,

    /// Annotation rectangles
    #[serde(default)]
    pub annotations: Vec<PageRect>,

    /// Form field widgets
    #[serde(default)]
    pub form_fields: Vec<PageRect>,
}

fn default_page_number() -> u32 {
    1
}

impl PageInput {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            runs: Vec::new(),
            images: Vec::new(),
            graphics: Vec::new(),
            annotations: Vec::new(),
            form_fields: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Add a text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Add an image placement.
    pub fn add_image(&mut self, rect: PageRect) {
        self.images.push(rect);
    }

    /// Add a vector graphic.
    pub fn add_graphic(&mut self, rect: PageRect) {
        self.graphics.push(rect);
    }

    /// Check if the page has no text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.is_blank())
    }
}

impl Default for PageInput {
    fn default() -> Self {
        Self::letter(1)
    }
}

/// A sequence of pages to analyze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Pages in document order
    pub pages: Vec<PageInput>,
}

impl DocumentInput {
    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by its 1-indexed position.
    pub fn page(&self, number: u32) -> Result<&PageInput> {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .ok_or(Error::PageOutOfRange(number, self.pages.len() as u32))
    }
}

/// Counters collected while analyzing one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Runs handed in by the parser
    pub run_count: usize,
    /// Runs that survived normalization
    pub glyph_count: usize,
    /// Lines built
    pub line_count: usize,
    /// Regions built
    pub region_count: usize,
    /// Regions allowed to reflow
    pub flow_region_count: usize,
    /// Paragraphs built
    pub paragraph_count: usize,
    /// Lines carrying rotated runs
    pub rotated_line_count: usize,
    /// Hard obstacles on the page
    pub hard_obstacle_count: usize,
    /// Soft obstacles on the page
    pub soft_obstacle_count: usize,
}

/// Result of analyzing one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,

    /// Regions in reading order
    pub regions: Vec<TextRegion>,

    /// All lines on the page, top to bottom
    pub lines: Vec<TextLine>,

    /// Median font size of the page's runs
    pub median_font_size: f32,

    /// Median height of the page's runs
    pub median_height: f32,

    /// Analysis counters
    pub stats: LayoutStats,
}

impl PageLayout {
    /// Plain text of the page, regions separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.regions
            .iter()
            .map(|r| r.plain_text())
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page produced no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of analyzing a whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Page layouts in document order
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain text of all pages.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
