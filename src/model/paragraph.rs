//! Paragraph-level types.

use serde::{Deserialize, Serialize};

use super::RunStyle;

/// How a paragraph line attaches to the line before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// The previous line ended in a soft hyphen that was dropped
    Hyphenation,
    /// A short capitalized fragment continues on this line
    Continuation,
}

/// One source line inside a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphLine {
    /// Reconstructed text of the line (soft hyphen already removed)
    pub text: String,

    /// Left offset from the region's left edge
    pub indent: f32,

    /// Index of the source line within the region
    pub source_line: usize,

    /// Set when this line continues the previous one without a space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_with_prev: Option<LineJoin>,
}

/// One or more lines joined into continuous prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Lines in reading order
    pub lines: Vec<ParagraphLine>,

    /// Top edge of the first line (layout space)
    pub top: f32,

    /// Vertical gap from the previous paragraph's bottom (0 for the first)
    pub gap_before: f32,

    /// Style sample of the dominant run
    pub dominant: RunStyle,

    /// Typical distance between consecutive line tops
    pub line_height: f32,
}

impl Paragraph {
    /// Get the logical text of the paragraph.
    ///
    /// Lines are separated by a single space unless they were joined by
    /// hyphenation or continuation.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 && line.join_with_prev.is_none() && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push_str(&line.text);
        }
        out
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.text().trim().is_empty()
    }

    /// Number of source lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, join: Option<LineJoin>) -> ParagraphLine {
        ParagraphLine {
            text: text.to_string(),
            indent: 0.0,
            source_line: 0,
            join_with_prev: join,
        }
    }

    #[test]
    fn test_paragraph_text_joins() {
        let p = Paragraph {
            lines: vec![
                line("An exam", None),
                line("ple of", Some(LineJoin::Hyphenation)),
                line("text", None),
            ],
            top: 0.0,
            gap_before: 0.0,
            dominant: RunStyle::default(),
            line_height: 12.0,
        };
        assert_eq!(p.text(), "An example of text");
        assert_eq!(p.line_count(), 3);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_line_join_serde() {
        let json = serde_json::to_string(&line("x", Some(LineJoin::Continuation))).unwrap();
        assert!(json.contains("\"continuation\""));

        let json = serde_json::to_string(&line("x", None)).unwrap();
        assert!(!json.contains("join_with_prev"));
    }
}
