//! Line text reconstruction.
//!
//! Turns the positioned runs of one visual line into text by deciding, for
//! every adjacent pair, whether a space belongs between them.

mod classifier;
mod dictionary;
mod geometry;
mod normalize;
mod pipeline;
mod predictive;
mod profile;
pub mod rules;
mod script;
mod smart;

pub use classifier::{
    base_threshold, effective_threshold, gap_confidence, BoundaryClassifier, BoundaryDecision,
    BoundaryKind, BoundaryRule, ClassifyContext, Gap, GeometricClassifier, RuleClassifier,
};
pub use dictionary::WordValidator;
pub use geometry::{LineGeometryModel, BASE_WORD_BREAK_THRESHOLD};
pub use normalize::{normalize_runs, normalize_text, Glyph};
pub use pipeline::{
    merge_tokens, reconstruct_line_text, reconstruct_line_tokens, LinePipeline, LineToken,
    TextPipeline,
};
pub use predictive::{Prediction, PredictiveTextModel};
pub use profile::{ClassifierProfile, ProfileRegistry, DEFAULT_DIGIT_THRESHOLD, DEFAULT_PROFILE};
pub use script::{
    is_spaceless_script_char, resolve_script_for_glyphs, resolve_script_for_text, script_of,
    Script,
};
pub use smart::SmartClassifier;
