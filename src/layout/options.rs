//! Layout analysis options and configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::text::{ProfileRegistry, TextPipeline, DEFAULT_PROFILE};

/// Options for analyzing pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Boundary classifier variant
    pub text_pipeline: TextPipeline,

    /// Classifier profile name (unknown names fall back to `auto-default`)
    pub classifier_profile: String,

    /// Paragraph merge limits
    pub paragraph: ParagraphOptions,

    /// Re-split over-merged words in smart-pipeline output
    pub fix_merged_words: bool,

    /// Whether to analyze pages in parallel
    pub parallel: bool,

    /// Custom profile registry (built-ins when unset)
    #[serde(skip)]
    pub registry: Option<Arc<ProfileRegistry>>,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier variant.
    pub fn with_pipeline(mut self, pipeline: TextPipeline) -> Self {
        self.text_pipeline = pipeline;
        self
    }

    /// Set the classifier variant by name (`legacy`, `rules`, `smart`).
    pub fn with_pipeline_name(mut self, name: &str) -> Self {
        self.text_pipeline = TextPipeline::from_name(name);
        self
    }

    /// Set the classifier profile name.
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.classifier_profile = name.into();
        self
    }

    /// Set paragraph merge limits.
    pub fn with_paragraph(mut self, paragraph: ParagraphOptions) -> Self {
        self.paragraph = paragraph;
        self
    }

    /// Enable or disable merged-word re-splitting.
    pub fn with_fix_merged_words(mut self, enabled: bool) -> Self {
        self.fix_merged_words = enabled;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Use a custom profile registry.
    pub fn with_registry(mut self, registry: Arc<ProfileRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_pipeline: TextPipeline::Rules,
            classifier_profile: DEFAULT_PROFILE.to_string(),
            paragraph: ParagraphOptions::default(),
            fix_merged_words: false,
            parallel: true,
            registry: None,
        }
    }
}

/// Limits for joining wrapped lines inside a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphOptions {
    /// Longest capitalized fragment that may continue on the next line
    pub continuation_prefix_max: usize,

    /// Lowercase letters the next line must start with to continue it
    pub continuation_suffix_min: usize,
}

impl Default for ParagraphOptions {
    fn default() -> Self {
        Self {
            continuation_prefix_max: 3,
            continuation_suffix_min: 3,
        }
    }
}
