//! # unpdf-layout
//!
//! Text reconstruction and layout analysis for positioned PDF glyph runs.
//!
//! A PDF parser hands over text as positioned runs with no reliable spaces
//! or line structure. This library decides where words break inside a line,
//! groups runs into lines, splits lines into regions, and rebuilds
//! paragraphs in regions that are safe to reflow.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unpdf_layout::{analyze_page, PageInput, TextRun};
//!
//! let mut page = PageInput::letter(1);
//! page.add_run(TextRun::new("Hello", 72.0, 700.0, 25.0, 10.0));
//! page.add_run(TextRun::new("world", 100.0, 700.0, 25.0, 10.0));
//!
//! let layout = analyze_page(&page);
//! println!("{}", layout.plain_text());
//! ```
//!
//! ## Features
//!
//! - **Word boundaries**: geometric, rule-based and dictionary-assisted classifiers
//! - **Script profiles**: Latin, Cyrillic, Greek and CJK defaults, replaceable from JSON
//! - **Region analysis**: obstacle-aware segmentation and flow eligibility
//! - **Paragraphs**: soft-hyphen and split-word continuation joins
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{LayoutAnalyzer, LayoutOptions, ParagraphOptions};
pub use model::{
    DocumentInput, DocumentLayout, LayoutStats, LineJoin, MergedRun, PageInput, PageLayout,
    PageRect, Paragraph, ParagraphLine, Rect, RunStyle, TextLine, TextRegion, TextRun,
};
pub use render::{document_to_text, to_json, to_text, JsonFormat};
pub use text::{
    reconstruct_line_text, reconstruct_line_tokens, BoundaryDecision, BoundaryKind,
    ClassifierProfile, LinePipeline, LineToken, ProfileRegistry, TextPipeline,
};

use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

/// Analyze one page with default options.
///
/// # Example
///
/// ```no_run
/// use unpdf_layout::{analyze_page, PageInput};
///
/// let layout = analyze_page(&PageInput::letter(1));
/// assert!(layout.is_empty());
/// ```
pub fn analyze_page(page: &PageInput) -> PageLayout {
    LayoutAnalyzer::default().analyze(page)
}

/// Analyze one page with custom options.
///
/// # Example
///
/// ```no_run
/// use unpdf_layout::{analyze_page_with_options, LayoutOptions, PageInput, TextPipeline};
///
/// let options = LayoutOptions::new().with_pipeline(TextPipeline::Smart);
/// let layout = analyze_page_with_options(&PageInput::letter(1), &options);
/// ```
pub fn analyze_page_with_options(page: &PageInput, options: &LayoutOptions) -> PageLayout {
    LayoutAnalyzer::new(options.clone()).analyze(page)
}

/// Analyze every page of a document.
///
/// Pages are independent; with `options.parallel` they are analyzed on the
/// Rayon pool. Output order always follows input order.
///
/// # Example
///
/// ```no_run
/// use unpdf_layout::{analyze_document, load_document_file, LayoutOptions};
///
/// let doc = load_document_file("pages.json")?;
/// let layout = analyze_document(&doc, &LayoutOptions::default());
/// println!("{}", layout.plain_text());
/// # Ok::<(), unpdf_layout::Error>(())
/// ```
pub fn analyze_document(document: &DocumentInput, options: &LayoutOptions) -> DocumentLayout {
    let analyzer = LayoutAnalyzer::new(options.clone());
    let pages: Vec<PageLayout> = if options.parallel {
        document.pages.par_iter().map(|p| analyzer.analyze(p)).collect()
    } else {
        document.pages.iter().map(|p| analyzer.analyze(p)).collect()
    };
    log::debug!(
        "Analyzed {} pages with the {} pipeline",
        pages.len(),
        analyzer.pipeline().kind()
    );
    DocumentLayout { pages }
}

/// Accepted shapes of a JSON page dump.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageDump {
    Page(PageInput),
    Pages(Vec<PageInput>),
    Document(DocumentInput),
}

/// Load a document from a JSON page dump.
///
/// Accepts a single page object, an array of pages, or an object with a
/// `pages` array.
pub fn load_document_str(json: &str) -> Result<DocumentInput> {
    let document = match serde_json::from_str::<PageDump>(json)? {
        PageDump::Page(page) => DocumentInput { pages: vec![page] },
        PageDump::Pages(pages) => DocumentInput { pages },
        PageDump::Document(document) => document,
    };
    Ok(document)
}

/// Load a document from a JSON page dump on disk.
///
/// # Example
///
/// ```no_run
/// use unpdf_layout::load_document_file;
///
/// let doc = load_document_file("pages.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<DocumentInput> {
    let data = std::fs::read_to_string(path)?;
    load_document_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page(number: u32) -> PageInput {
        let mut page = PageInput::letter(number);
        page.add_run(TextRun::new("Page", 72.0, 700.0, 20.0, 10.0));
        page.add_run(TextRun::new(number.to_string(), 97.0, 700.0, 5.0, 10.0));
        page
    }

    #[test]
    fn test_analyze_page_defaults() {
        let layout = analyze_page(&sample_page(1));
        assert_eq!(layout.plain_text(), "Page 1");
    }

    #[test]
    fn test_analyze_document_preserves_order() {
        let doc = DocumentInput {
            pages: (1..=6).map(sample_page).collect(),
        };
        let parallel = analyze_document(&doc, &LayoutOptions::default());
        let sequential = analyze_document(&doc, &LayoutOptions::default().sequential());
        assert_eq!(parallel.page_count(), 6);
        assert_eq!(parallel.pages[4].number, 5);
        assert_eq!(parallel.plain_text(), sequential.plain_text());
    }

    #[test]
    fn test_load_single_page() {
        let doc = load_document_str(r#"{"width": 612, "height": 792, "runs": []}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_load_page_array() {
        let doc = load_document_str(
            r#"[{"number": 1, "width": 612, "height": 792}, {"number": 2, "width": 612, "height": 792}]"#,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].number, 2);
    }

    #[test]
    fn test_load_document_object() {
        let doc = load_document_str(r#"{"pages": [{"width": 612, "height": 792}]}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_load_invalid_json() {
        let err = load_document_str("[1, 2").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
