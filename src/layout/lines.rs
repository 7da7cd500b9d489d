//! Grouping runs into visual lines.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Rect, TextLine, TextRun};
use crate::text::{merge_tokens, normalize_runs, LinePipeline};

/// Minimum baseline tolerance in page units.
const MIN_LINE_TOLERANCE: f32 = 1.5;

/// Tolerance as a fraction of the smaller of median and run height.
const LINE_TOLERANCE_RATIO: f32 = 0.45;

/// Widened tolerance for stray punctuation, as a fraction of median height.
const PUNCTUATION_TOLERANCE_RATIO: f32 = 0.85;

/// Characters that may float off the baseline (quotes, commas, dots).
const FLOATING_PUNCTUATION: &[char] = &[
    '\'', '"', '`', ',', '.', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201C}', '\u{201D}', '\u{201E}',
    '\u{00B4}', '*', '\u{2032}', '\u{2033}',
];

/// A line under construction with its running average baseline.
#[derive(Debug, Default)]
struct LineBucket {
    runs: Vec<TextRun>,
    y_sum: f32,
    punctuation_only: bool,
}

impl LineBucket {
    fn avg_y(&self) -> f32 {
        self.y_sum / self.runs.len().max(1) as f32
    }

    fn push(&mut self, run: TextRun) {
        self.punctuation_only = (self.runs.is_empty() || self.punctuation_only) && is_floating_punctuation(&run);
        self.y_sum += run.y;
        self.runs.push(run);
    }
}

fn run_height(run: &TextRun) -> f32 {
    if run.height > 0.0 {
        run.height
    } else {
        run.font_size.max(0.0)
    }
}

/// Whether a run is a tiny punctuation or quote glyph.
fn is_floating_punctuation(run: &TextRun) -> bool {
    let text = run.text.trim();
    !text.is_empty() && text.chars().count() <= 2 && text.chars().all(|c| FLOATING_PUNCTUATION.contains(&c))
}

/// Baseline tolerance for attaching `run` to an existing line.
pub fn line_tolerance(run: &TextRun, median_height: f32) -> f32 {
    let tol = MIN_LINE_TOLERANCE.max(median_height.min(run_height(run)) * LINE_TOLERANCE_RATIO);
    if is_floating_punctuation(run) {
        tol.max(median_height * PUNCTUATION_TOLERANCE_RATIO)
    } else {
        tol
    }
}

/// Group runs into lines.
///
/// Runs are visited top to bottom, then left to right; each joins the
/// first line whose average baseline lies within its tolerance. A line
/// holding only floating punctuation so far accepts runs at the widened
/// tolerance. Blank runs carry no text and are skipped.
pub fn group_runs_into_lines(runs: &[TextRun], median_height: f32) -> Vec<Vec<TextRun>> {
    let mut ordered: Vec<&TextRun> = runs.iter().filter(|r| !r.is_blank()).collect();
    ordered.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut buckets: Vec<LineBucket> = Vec::new();
    for run in ordered {
        let tol = line_tolerance(run, median_height);
        let widened = tol.max(median_height * PUNCTUATION_TOLERANCE_RATIO);
        let fits = |b: &LineBucket| {
            let tol = if b.punctuation_only { widened } else { tol };
            (b.avg_y() - run.y).abs() <= tol
        };
        match buckets.iter_mut().find(|b| fits(&**b)) {
            Some(bucket) => bucket.push(run.clone()),
            None => {
                let mut bucket = LineBucket::default();
                bucket.push(run.clone());
                buckets.push(bucket);
            }
        }
    }

    buckets
        .into_iter()
        .map(|mut b| {
            b.runs
                .sort_by(|x, y| x.x.partial_cmp(&y.x).unwrap_or(Ordering::Equal));
            b.runs
        })
        .collect()
}

/// Most common font family; ties go to the family seen first.
fn dominant_font(items: &[TextRun]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for run in items {
        *counts.entry(run.font_family.as_str()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for run in items {
        let count = counts[run.font_family.as_str()];
        if best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((run.font_family.as_str(), count));
        }
    }
    best.map(|(f, _)| f.to_string()).unwrap_or_default()
}

/// Build a line from its runs, reconstructing text with `pipeline`.
pub fn build_line(items: Vec<TextRun>, page_height: f32, pipeline: &LinePipeline) -> TextLine {
    let min_x = items.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
    let max_x = items.iter().map(|r| r.right()).fold(f32::NEG_INFINITY, f32::max);
    let top_pdf = items
        .iter()
        .map(|r| r.y + run_height(r))
        .fold(f32::NEG_INFINITY, f32::max);
    let bottom_pdf = items.iter().map(|r| r.y).fold(f32::INFINITY, f32::min);
    let (min_x, max_x, top_pdf, bottom_pdf) = if items.is_empty() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        (min_x, max_x, top_pdf, bottom_pdf)
    };
    let height = (top_pdf - bottom_pdf).max(0.0);

    let avg_font_size = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.font_size).sum::<f32>() / items.len() as f32
    };

    let glyphs = normalize_runs(&items);
    let text = pipeline.reconstruct_text(&glyphs);
    let merged_runs = merge_tokens(&pipeline.reconstruct_tokens(&glyphs));
    let has_rotation = items.iter().any(|r| r.is_rotated());
    let dominant_font = dominant_font(&items);

    TextLine {
        rect: Rect::new(min_x, page_height - top_pdf, max_x - min_x, height),
        items,
        text,
        min_x,
        max_x,
        top_pdf,
        height,
        has_rotation,
        avg_font_size,
        dominant_font,
        merged_runs,
    }
}
