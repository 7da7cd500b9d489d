//! Page-level layout analysis.

use super::lines::{build_line, group_runs_into_lines};
use super::measure::{median_font_size, median_height};
use super::obstacles::Obstacles;
use super::options::LayoutOptions;
use super::paragraphs::build_paragraphs;
use super::regions::{is_flow_allowed, segment_regions, sort_lines, tag_obstacles, PageMetrics};
use crate::model::{LayoutStats, PageInput, PageLayout, TextLine};
use crate::text::LinePipeline;

/// Layout analyzer for one page at a time.
///
/// Runs line grouping, line reconstruction, region segmentation, obstacle
/// tagging, flow eligibility and paragraph building, in that order.
#[derive(Debug)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
    pipeline: LinePipeline,
}

impl LayoutAnalyzer {
    /// Create an analyzer with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        let pipeline = LinePipeline::from_options(&options);
        Self { options, pipeline }
    }

    /// Options in effect.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Line pipeline in effect.
    pub fn pipeline(&self) -> &LinePipeline {
        &self.pipeline
    }

    /// Measurements the page thresholds scale with.
    pub fn metrics(page: &PageInput) -> PageMetrics {
        PageMetrics {
            median_height: median_height(&page.runs),
            median_font_size: median_font_size(&page.runs),
        }
    }

    /// Group and reconstruct the lines of a page, top to bottom.
    pub fn lines(&self, page: &PageInput) -> Vec<TextLine> {
        let metrics = Self::metrics(page);
        let mut lines: Vec<TextLine> = group_runs_into_lines(&page.runs, metrics.median_height)
            .into_iter()
            .map(|items| build_line(items, page.height, &self.pipeline))
            .collect();
        sort_lines(&mut lines);
        lines
    }

    /// Analyze one page.
    pub fn analyze(&self, page: &PageInput) -> PageLayout {
        let metrics = Self::metrics(page);
        let obstacles = Obstacles::collect(page);
        let lines = self.lines(page);

        let mut regions = segment_regions(&lines, &metrics);
        for region in &mut regions {
            tag_obstacles(region, &obstacles, &metrics);
            region.flow_allowed = is_flow_allowed(region, &metrics);
            if region.flow_allowed {
                region.paragraphs = build_paragraphs(region, &metrics, &self.options.paragraph);
            }
        }

        let stats = LayoutStats {
            run_count: page.runs.len(),
            glyph_count: page.runs.iter().filter(|r| !r.is_blank()).count(),
            line_count: lines.len(),
            region_count: regions.len(),
            flow_region_count: regions.iter().filter(|r| r.flow_allowed).count(),
            paragraph_count: regions.iter().map(|r| r.paragraphs.len()).sum(),
            rotated_line_count: lines.iter().filter(|l| l.has_rotation).count(),
            hard_obstacle_count: obstacles.hard.len(),
            soft_obstacle_count: obstacles.soft.len(),
        };

        log::debug!(
            "Page {}: {} lines, {} regions ({} flowing), {} paragraphs, {} obstacles",
            page.number,
            stats.line_count,
            stats.region_count,
            stats.flow_region_count,
            stats.paragraph_count,
            stats.soft_obstacle_count
        );

        PageLayout {
            number: page.number,
            regions,
            lines,
            median_font_size: metrics.median_font_size,
            median_height: metrics.median_height,
            stats,
        }
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}
