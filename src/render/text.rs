//! Plain text rendering for layouts.

use crate::model::{DocumentLayout, PageLayout};

/// Convert a page layout to plain text.
///
/// Regions are separated by blank lines. Flow regions print one line per
/// paragraph; other regions print their lines as laid out.
pub fn to_text(layout: &PageLayout) -> String {
    layout.plain_text().trim().to_string()
}

/// Convert a document layout to plain text, pages separated by form feeds.
pub fn document_to_text(layout: &DocumentLayout) -> String {
    layout
        .pages
        .iter()
        .map(to_text)
        .collect::<Vec<_>>()
        .join("\n\x0c\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutAnalyzer;
    use crate::model::{PageInput, TextRun};

    fn page(number: u32, words: &[&str]) -> PageInput {
        let mut page = PageInput::letter(number);
        let mut y = 700.0;
        for word in words {
            page.add_run(TextRun::new(*word, 72.0, y, 5.0 * word.len() as f32, 10.0));
            y -= 12.0;
        }
        page
    }

    #[test]
    fn test_to_text() {
        let layout = LayoutAnalyzer::default().analyze(&page(1, &["Hello,", "world!"]));
        assert_eq!(to_text(&layout), "Hello, world!");
    }

    #[test]
    fn test_document_to_text() {
        let analyzer = LayoutAnalyzer::default();
        let doc = DocumentLayout {
            pages: vec![
                analyzer.analyze(&page(1, &["one"])),
                analyzer.analyze(&page(2, &["two"])),
            ],
        };
        assert_eq!(document_to_text(&doc), "one\n\x0c\ntwo");
    }
}
