//! Region segmentation and flow eligibility.

use std::cmp::Ordering;

use super::measure::percentile;
use super::obstacles::Obstacles;
use crate::model::{TextLine, TextRegion};

/// Page-level measurements the thresholds scale with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    /// Median run height
    pub median_height: f32,
    /// Median run font size
    pub median_font_size: f32,
}

impl PageMetrics {
    /// Vertical gap beyond which a new region starts.
    pub fn region_gap(&self) -> f32 {
        6.0_f32.max(self.median_height * 1.8)
    }

    /// Indent shift beyond which a new region may start.
    pub fn region_indent(&self) -> f32 {
        8.0_f32.max(self.median_font_size * 2.0)
    }

    /// Gap an indent shift must come with to start a new region.
    pub fn region_indent_gap(&self) -> f32 {
        self.median_height * 0.6
    }

    /// Largest allowed spread between the 90th and 10th percentile left edges.
    pub fn indent_spread(&self) -> f32 {
        18.0_f32.max(self.median_font_size * 2.5)
    }
}

/// Order lines top to bottom, then left to right.
pub fn sort_lines(lines: &mut [TextLine]) {
    lines.sort_by(|a, b| {
        a.top()
            .partial_cmp(&b.top())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.left().partial_cmp(&b.left()).unwrap_or(Ordering::Equal))
    });
}

fn starts_new_region(prev: &TextLine, line: &TextLine, metrics: &PageMetrics) -> bool {
    let gap = line.top() - prev.bottom();
    if gap > metrics.region_gap() {
        return true;
    }
    let shift = (line.left() - prev.left()).abs();
    shift > metrics.region_indent() && gap > metrics.region_indent_gap()
}

/// Split sorted lines into regions.
///
/// Obstacle and flow fields are left at their defaults; see
/// [`tag_obstacles`] and [`is_flow_allowed`].
pub fn segment_regions(lines: &[TextLine], metrics: &PageMetrics) -> Vec<TextRegion> {
    let mut groups: Vec<Vec<TextLine>> = Vec::new();
    for line in lines {
        let split = groups
            .last()
            .and_then(|g| g.last())
            .map(|prev| starts_new_region(prev, line, metrics))
            .unwrap_or(true);
        match groups.last_mut() {
            Some(group) if !split => group.push(line.clone()),
            _ => groups.push(vec![line.clone()]),
        }
    }

    groups
        .into_iter()
        .map(|lines| {
            let rect = lines
                .iter()
                .skip(1)
                .fold(lines[0].rect, |acc, l| acc.union(&l.rect));
            TextRegion {
                lines,
                rect,
                overlaps_obstacle: false,
                nearest_obstacle_distance: f32::INFINITY,
                flow_allowed: false,
                paragraphs: Vec::new(),
            }
        })
        .collect()
}

/// Record obstacle overlap and distance on a region.
pub fn tag_obstacles(region: &mut TextRegion, obstacles: &Obstacles, metrics: &PageMetrics) {
    region.overlaps_obstacle = obstacles.overlap(&region.rect, metrics.median_height);
    region.nearest_obstacle_distance = obstacles.nearest(&region.rect);
}

/// Whether a region's lines may be reflowed into paragraphs.
///
/// Requires no rotation, no obstacle overlap, at least two lines, stable
/// line heights and stable left edges.
pub fn is_flow_allowed(region: &TextRegion, metrics: &PageMetrics) -> bool {
    if region.overlaps_obstacle || region.lines.len() < 2 {
        return false;
    }
    if region.lines.iter().any(|l| l.has_rotation) {
        return false;
    }

    let min_h = region.lines.iter().map(|l| l.height).fold(f32::INFINITY, f32::min);
    let max_h = region.lines.iter().map(|l| l.height).fold(f32::NEG_INFINITY, f32::max);
    if max_h > (min_h + 4.0).max(metrics.median_height * 1.4) {
        return false;
    }

    let lefts = || region.lines.iter().map(|l| l.left());
    match (percentile(lefts(), 90.0), percentile(lefts(), 10.0)) {
        (Some(p90), Some(p10)) => p90 - p10 <= metrics.indent_spread(),
        _ => false,
    }
}
