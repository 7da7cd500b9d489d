//! Layout analysis: lines, regions, obstacles and paragraphs.

mod analyzer;
mod lines;
mod measure;
mod obstacles;
mod options;
mod paragraphs;
mod regions;

pub use analyzer::LayoutAnalyzer;
pub use lines::{build_line, group_runs_into_lines, line_tolerance};
pub use measure::{median, median_font_size, median_height, percentile};
pub use obstacles::{nearest_distance, Obstacles};
pub use options::{LayoutOptions, ParagraphOptions};
pub use paragraphs::{build_paragraphs, is_continuation, is_hyphenated};
pub use regions::{is_flow_allowed, segment_regions, sort_lines, tag_obstacles, PageMetrics};
