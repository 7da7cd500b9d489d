//! Glyph normalization: raw runs to an ordered sequence of atomic glyphs.

use unicode_normalization::UnicodeNormalization;

use crate::model::TextRun;

/// Latin presentation-form ligatures and their letter sequences.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"), // long s + t
    ('\u{FB06}', "st"),
];

/// One atomic reconstructable unit of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph<'a> {
    /// Normalized text, never empty or whitespace-only
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Advance width (never negative)
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// The run this glyph came from
    pub run: &'a TextRun,
}

impl<'a> Glyph<'a> {
    /// Build a glyph from a run, or `None` if the run has no visible text.
    pub fn from_run(run: &'a TextRun) -> Option<Self> {
        if run.is_blank() {
            return None;
        }
        Some(Self {
            text: normalize_text(&run.text),
            x: run.x,
            width: run.width.max(0.0),
            font_size: run.font_size,
            run,
        })
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Last character of the text.
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// First character of the text.
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// NFC-normalize text and expand presentation ligatures.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    if !composed.chars().any(|c| ('\u{FB00}'..='\u{FB06}').contains(&c)) {
        return composed;
    }

    let mut out = String::with_capacity(composed.len() + 4);
    for c in composed.chars() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expanded)) => out.push_str(expanded),
            None => out.push(c),
        }
    }
    out
}

/// Turn runs into glyphs sorted left to right.
///
/// Empty and whitespace-only runs are dropped. The sort is stable, so runs
/// sharing an `x` keep their input order.
pub fn normalize_runs(runs: &[TextRun]) -> Vec<Glyph<'_>> {
    let mut glyphs: Vec<Glyph<'_>> = runs.iter().filter_map(Glyph::from_run).collect();
    glyphs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f32) -> TextRun {
        TextRun::new(text, x, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_runs(&[]).is_empty());
    }

    #[test]
    fn test_blank_runs_dropped_and_sorted() {
        let runs = vec![run("world", 40.0), run("  ", 30.0), run("", 5.0), run("Hello", 0.0)];
        let glyphs = normalize_runs(&runs);
        let texts: Vec<&str> = glyphs.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello", "world"]);
        assert!(std::ptr::eq(glyphs[0].run, &runs[3]));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let runs = vec![run("b", 10.0), run("a", 10.0), run("c", 0.0)];
        let glyphs = normalize_runs(&runs);
        let texts: Vec<&str> = glyphs.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ligatures_expanded() {
        assert_eq!(normalize_text("\u{FB01}nal \u{FB04}uent"), "final ffluent");
    }

    #[test]
    fn test_nfc_composition() {
        // e + combining acute accent
        assert_eq!(normalize_text("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_negative_width_clamped() {
        let mut r = run("x", 0.0);
        r.width = -3.0;
        let glyph = Glyph::from_run(&r).unwrap();
        assert_eq!(glyph.width, 0.0);
    }
}
