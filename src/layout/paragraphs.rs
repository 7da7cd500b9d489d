//! Paragraph building inside flow-allowed regions.

use std::collections::HashMap;

use super::options::ParagraphOptions;
use super::regions::PageMetrics;
use crate::model::{LineJoin, Paragraph, ParagraphLine, RunStyle, TextLine, TextRegion};

/// Soft hyphen as emitted by hyphenating typesetters.
const SOFT_HYPHEN: char = '\u{00AD}';

impl PageMetrics {
    /// Vertical gap beyond which a new paragraph starts.
    pub fn paragraph_gap(&self) -> f32 {
        4.0_f32.max(self.median_height * 0.8)
    }

    /// Indent shift beyond which a new paragraph may start.
    pub fn paragraph_indent(&self) -> f32 {
        10.0_f32.max(self.median_height * 1.2)
    }

    /// Gap an indent shift must come with to start a new paragraph.
    pub fn paragraph_indent_gap(&self) -> f32 {
        self.median_height * 0.15
    }
}

fn starts_new_paragraph(prev: &TextLine, line: &TextLine, metrics: &PageMetrics) -> bool {
    let gap = line.top() - prev.bottom();
    if gap > metrics.paragraph_gap() {
        return true;
    }
    let shift = (line.left() - prev.left()).abs();
    shift > metrics.paragraph_indent() && gap >= metrics.paragraph_indent_gap()
}

/// Previous line ends in a soft hyphen after a letter and the next starts lowercase.
pub fn is_hyphenated(prev: &str, next: &str) -> bool {
    let mut tail = prev.trim_end().chars().rev();
    let hyphen = tail.next() == Some(SOFT_HYPHEN);
    let letter = tail.next().map(char::is_alphabetic).unwrap_or(false);
    hyphen && letter && next.trim_start().chars().next().map(char::is_lowercase).unwrap_or(false)
}

/// Previous line ends in a short capitalized token and the next line
/// continues it with enough lowercase letters.
pub fn is_continuation(prev: &str, next: &str, options: &ParagraphOptions) -> bool {
    let Some(token) = prev.split_whitespace().next_back() else {
        return false;
    };
    let len = token.chars().count();
    let capitalized = token.chars().next().map(char::is_uppercase).unwrap_or(false);
    let ends_alpha = token.chars().next_back().map(char::is_alphabetic).unwrap_or(false);
    if !capitalized || !ends_alpha || len > options.continuation_prefix_max {
        return false;
    }
    let lowercase_run = next
        .trim_start()
        .chars()
        .take_while(|c| c.is_lowercase())
        .count();
    lowercase_run >= options.continuation_suffix_min
}

/// Style of the run carrying the most characters.
fn dominant_style(lines: &[&TextLine]) -> RunStyle {
    let mut weights: Vec<(RunStyle, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for run in lines.iter().flat_map(|l| l.items.iter()) {
        let style = run.style();
        let key = format!(
            "{}|{}|{}|{}|{}",
            style.font_family, style.font_size, style.font_weight, style.font_style, style.color
        );
        let chars = run.text.chars().filter(|c| !c.is_whitespace()).count();
        match index.get(&key) {
            Some(&i) => weights[i].1 += chars,
            None => {
                index.insert(key, weights.len());
                weights.push((style, chars));
            }
        }
    }
    let mut best: Option<(RunStyle, usize)> = None;
    for (style, weight) in weights {
        if best.as_ref().map(|(_, w)| weight > *w).unwrap_or(true) {
            best = Some((style, weight));
        }
    }
    best.map(|(s, _)| s).unwrap_or_default()
}

fn finish_paragraph(lines: &[&TextLine], entries: Vec<ParagraphLine>, gap_before: f32) -> Paragraph {
    let top = lines.first().map(|l| l.top()).unwrap_or(0.0);
    let line_height = if lines.len() > 1 {
        lines.windows(2).map(|w| w[1].top() - w[0].top()).sum::<f32>() / (lines.len() - 1) as f32
    } else {
        lines.first().map(|l| l.height).unwrap_or(0.0)
    };
    Paragraph {
        lines: entries,
        top,
        gap_before,
        dominant: dominant_style(lines),
        line_height,
    }
}

/// Build paragraphs from the sorted lines of a region.
pub fn build_paragraphs(
    region: &TextRegion,
    metrics: &PageMetrics,
    options: &ParagraphOptions,
) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut group: Vec<&TextLine> = Vec::new();
    let mut entries: Vec<ParagraphLine> = Vec::new();
    let mut prev_bottom: Option<f32> = None;

    for (index, line) in region.lines.iter().enumerate() {
        if let Some(prev) = group.last() {
            if starts_new_paragraph(prev, line, metrics) {
                let gap_before = match prev_bottom {
                    Some(bottom) => (group[0].top() - bottom).max(0.0),
                    None => 0.0,
                };
                prev_bottom = Some(prev.bottom());
                paragraphs.push(finish_paragraph(&group, std::mem::take(&mut entries), gap_before));
                group.clear();
            }
        }

        let mut entry = ParagraphLine {
            text: line.text.clone(),
            indent: line.left() - region.rect.left,
            source_line: index,
            join_with_prev: None,
        };
        if let Some(last) = entries.last_mut() {
            if is_hyphenated(&last.text, &entry.text) {
                let trimmed = last.text.trim_end();
                last.text = trimmed.strip_suffix(SOFT_HYPHEN).unwrap_or(trimmed).to_string();
                entry.text = entry.text.trim_start().to_string();
                entry.join_with_prev = Some(LineJoin::Hyphenation);
            } else if is_continuation(&last.text, &entry.text, options) {
                last.text = last.text.trim_end().to_string();
                entry.text = entry.text.trim_start().to_string();
                entry.join_with_prev = Some(LineJoin::Continuation);
            }
        }
        entries.push(entry);
        group.push(line);
    }

    if !group.is_empty() {
        let gap_before = match prev_bottom {
            Some(bottom) => (group[0].top() - bottom).max(0.0),
            None => 0.0,
        };
        paragraphs.push(finish_paragraph(&group, entries, gap_before));
    }

    log::trace!(
        "Region with {} lines -> {} paragraphs",
        region.lines.len(),
        paragraphs.len()
    );
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rect, TextRun};

    fn line(text: &str, left: f32, top: f32) -> TextLine {
        TextLine {
            items: vec![TextRun::new(text, left, 792.0 - top - 10.0, 100.0, 10.0)],
            text: text.to_string(),
            rect: Rect::new(left, top, 300.0, 10.0),
            min_x: left,
            max_x: left + 300.0,
            top_pdf: 792.0 - top,
            height: 10.0,
            has_rotation: false,
            avg_font_size: 10.0,
            dominant_font: "Helvetica".to_string(),
            merged_runs: vec![],
        }
    }

    fn region(lines: Vec<TextLine>) -> TextRegion {
        let rect = lines
            .iter()
            .skip(1)
            .fold(lines[0].rect, |acc, l| acc.union(&l.rect));
        TextRegion {
            lines,
            rect,
            overlaps_obstacle: false,
            nearest_obstacle_distance: f32::INFINITY,
            flow_allowed: true,
            paragraphs: vec![],
        }
    }

    fn metrics() -> PageMetrics {
        PageMetrics {
            median_height: 10.0,
            median_font_size: 10.0,
        }
    }

    #[test]
    fn test_hyphenation_predicate() {
        assert!(is_hyphenated("infor\u{00AD}", "mation"));
        assert!(is_hyphenated("infor\u{00AD} ", "mation"));
        assert!(!is_hyphenated("infor\u{00AD}", "Mation"));
        assert!(!is_hyphenated("1\u{00AD}", "mation"));
        assert!(!is_hyphenated("infor-", "mation"));
    }

    #[test]
    fn test_continuation_predicate() {
        let options = ParagraphOptions::default();
        assert!(is_continuation("see the Ca", "lifornia report", &options));
        assert!(!is_continuation("see the Cal.", "ifornia", &options));
        assert!(!is_continuation("see the Cali", "fornia", &options));
        assert!(!is_continuation("see the ca", "lifornia", &options));
        assert!(!is_continuation("see the Ca", "li", &options));
        let wide = ParagraphOptions {
            continuation_prefix_max: 4,
            continuation_suffix_min: 2,
        };
        assert!(is_continuation("see the Cali", "fornia", &wide));
    }

    #[test]
    fn test_hyphenated_lines_merge() {
        let region = region(vec![line("The infor\u{00AD}", 72.0, 100.0), line("mation age", 72.0, 112.0)]);
        let paragraphs = build_paragraphs(&region, &metrics(), &ParagraphOptions::default());
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "The information age");
        assert_eq!(paragraphs[0].lines[1].join_with_prev, Some(LineJoin::Hyphenation));
    }

    #[test]
    fn test_continuation_lines_merge() {
        let region = region(vec![line("Visit Ca", 72.0, 100.0), line("lifornia today", 72.0, 112.0)]);
        let paragraphs = build_paragraphs(&region, &metrics(), &ParagraphOptions::default());
        assert_eq!(paragraphs[0].text(), "Visit California today");
    }

    #[test]
    fn test_plain_lines_join_with_space() {
        let region = region(vec![line("first line", 72.0, 100.0), line("second line", 72.0, 112.0)]);
        let paragraphs = build_paragraphs(&region, &metrics(), &ParagraphOptions::default());
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "first line second line");
        assert!((paragraphs[0].line_height - 12.0).abs() < 1e-5);
        assert_eq!(paragraphs[0].gap_before, 0.0);
    }

    #[test]
    fn test_gap_and_indent_break_paragraphs() {
        let region = region(vec![
            line("one", 72.0, 100.0),
            line("two", 72.0, 112.0),
            // 9-unit gap > 8
            line("three", 72.0, 131.0),
            // indent 20 > 12 with a 2-unit gap >= 1.5
            line("four", 92.0, 143.0),
        ]);
        let paragraphs = build_paragraphs(&region, &metrics(), &ParagraphOptions::default());
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1].text(), "three");
        assert!((paragraphs[1].gap_before - 9.0).abs() < 1e-5);
        assert_eq!(paragraphs[2].lines[0].source_line, 3);
        assert!((paragraphs[2].lines[0].indent - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_dominant_style() {
        let mut first = line("short", 72.0, 100.0);
        first.items[0] = first.items[0].clone().with_weight("bold");
        let second = line("a much longer line of text", 72.0, 112.0);
        let region = region(vec![first, second]);
        let paragraphs = build_paragraphs(&region, &metrics(), &ParagraphOptions::default());
        assert!(!paragraphs[0].dominant.is_bold());
    }
}
