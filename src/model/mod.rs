//! Data model shared by the text and layout stages.
//!
//! Input types describe what the page parser hands over (positioned runs,
//! obstacle geometry); output types describe the reconstructed structure
//! (lines, regions, paragraphs). All of them serialize with serde so page
//! dumps and analysis results can travel as JSON.

mod geometry;
mod page;
mod paragraph;
mod region;
mod run;

pub use geometry::{PageRect, Rect};
pub use page::{DocumentInput, DocumentLayout, LayoutStats, PageInput, PageLayout};
pub use paragraph::{LineJoin, Paragraph, ParagraphLine};
pub use region::{TextLine, TextRegion};
pub use run::{MergedRun, RunStyle, TextRun};
