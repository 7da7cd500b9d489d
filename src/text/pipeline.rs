//! Line reconstruction: glyphs in, text or styled tokens out.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifier::{BoundaryClassifier, BoundaryDecision, ClassifyContext, GeometricClassifier, RuleClassifier};
use super::dictionary::WordValidator;
use super::profile::{ClassifierProfile, ProfileRegistry, DEFAULT_PROFILE};
use super::smart::SmartClassifier;
use super::{normalize_runs, Glyph, LineGeometryModel};
use crate::layout::LayoutOptions;
use crate::model::{MergedRun, RunStyle, TextRun};

/// Which classifier a pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextPipeline {
    /// Geometry only
    Legacy,
    /// Geometry plus domain rules
    #[default]
    Rules,
    /// Rules plus dictionary and bigram checks
    Smart,
}

impl TextPipeline {
    /// Parse a pipeline name; unknown names select `Rules`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "legacy" => TextPipeline::Legacy,
            "rules" | "v2" => TextPipeline::Rules,
            "smart" | "v2-smart" => TextPipeline::Smart,
            other => {
                log::debug!("Unknown text pipeline '{}', using 'rules'", other);
                TextPipeline::Rules
            }
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextPipeline::Legacy => "legacy",
            TextPipeline::Rules => "rules",
            TextPipeline::Smart => "smart",
        }
    }

    /// Instantiate the classifier.
    pub fn build(&self) -> Box<dyn BoundaryClassifier> {
        match self {
            TextPipeline::Legacy => Box::new(GeometricClassifier),
            TextPipeline::Rules => Box::new(RuleClassifier),
            TextPipeline::Smart => Box::new(SmartClassifier::new()),
        }
    }
}

impl From<String> for TextPipeline {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TextPipeline> for String {
    fn from(pipeline: TextPipeline) -> Self {
        pipeline.as_str().to_string()
    }
}

impl fmt::Display for TextPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A styled piece of a reconstructed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineToken {
    /// Token text, without the inferred leading space
    pub text: String,
    /// Whether an inferred space precedes the token
    pub space_before: bool,
    /// Style of the run the token came from
    pub style: RunStyle,
}

/// A classifier bound to a profile, applied one line at a time.
pub struct LinePipeline {
    kind: TextPipeline,
    classifier: Box<dyn BoundaryClassifier>,
    profile: ClassifierProfile,
    fix_merged_words: bool,
}

impl fmt::Debug for LinePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinePipeline")
            .field("kind", &self.kind)
            .field("classifier", &self.classifier.name())
            .field("profile", &self.profile.name)
            .field("fix_merged_words", &self.fix_merged_words)
            .finish()
    }
}

impl LinePipeline {
    /// Create a pipeline for a classifier variant and profile.
    pub fn new(kind: TextPipeline, profile: ClassifierProfile) -> Self {
        Self {
            kind,
            classifier: kind.build(),
            profile,
            fix_merged_words: false,
        }
    }

    /// Create the pipeline described by layout options.
    pub fn from_options(options: &LayoutOptions) -> Self {
        let profile = match &options.registry {
            Some(registry) => registry.get(&options.classifier_profile),
            None => ProfileRegistry::builtin().get(&options.classifier_profile),
        };
        Self::new(options.text_pipeline, profile).with_merged_word_fix(options.fix_merged_words)
    }

    /// Re-split over-merged words in reconstructed text (smart pipeline only).
    pub fn with_merged_word_fix(mut self, enabled: bool) -> Self {
        self.fix_merged_words = enabled;
        self
    }

    /// Classifier variant.
    pub fn kind(&self) -> TextPipeline {
        self.kind
    }

    /// Profile in effect.
    pub fn profile(&self) -> &ClassifierProfile {
        &self.profile
    }

    /// Classify every adjacent pair of a line, in order.
    pub fn decisions(&self, glyphs: &[Glyph<'_>]) -> Vec<BoundaryDecision> {
        let mut out = Vec::with_capacity(glyphs.len().saturating_sub(1));
        self.walk(glyphs, |_, _, decision| out.push(*decision));
        out
    }

    /// Reconstruct the line as one string.
    pub fn reconstruct_text(&self, glyphs: &[Glyph<'_>]) -> String {
        let mut text = String::new();
        if let Some(first) = glyphs.first() {
            text.push_str(&first.text);
        }
        self.walk(glyphs, |_, next, decision| {
            append(&mut text, &next.text, decision.is_space());
        });

        if self.fix_merged_words && self.kind == TextPipeline::Smart {
            text = WordValidator::shared().fix_merged_text(&text);
        }
        text
    }

    /// Reconstruct the line as tokens split on inferred spaces and style changes.
    pub fn reconstruct_tokens(&self, glyphs: &[Glyph<'_>]) -> Vec<LineToken> {
        let Some(first) = glyphs.first() else {
            return Vec::new();
        };
        let mut tokens = vec![LineToken {
            text: first.text.clone(),
            space_before: false,
            style: first.run.style(),
        }];

        self.walk(glyphs, |_, next, decision| {
            let style = next.run.style();
            let Some(current) = tokens.last_mut() else {
                return;
            };
            let space = decision.is_space() && !boundary_has_whitespace(&current.text, &next.text);
            if space || !current.style.same_style(&style) {
                tokens.push(LineToken {
                    text: next.text.clone(),
                    space_before: space,
                    style,
                });
            } else {
                append(&mut current.text, &next.text, false);
            }
        });
        tokens
    }

    fn walk<F>(&self, glyphs: &[Glyph<'_>], mut visit: F)
    where
        F: FnMut(&Glyph<'_>, &Glyph<'_>, &BoundaryDecision),
    {
        if glyphs.len() < 2 {
            return;
        }
        let model = LineGeometryModel::from_glyphs(glyphs);
        let script = self.profile.resolve_script(glyphs);
        let mut ctx = ClassifyContext::new(self.profile.clone(), script);
        ctx.start_line(glyphs.first());

        for pair in glyphs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let decision = self.classifier.classify(prev, next, &model, &ctx);
            log::trace!(
                "{} | {:?} {:?}: {:?} via {:?} (gap {:.2} / {:.2})",
                self.classifier.name(),
                prev.text,
                next.text,
                decision.kind,
                decision.rule,
                decision.gap_by_char,
                decision.threshold_by_char
            );
            visit(prev, next, &decision);
            ctx.record(&decision, next);
        }
    }
}

impl Default for LinePipeline {
    fn default() -> Self {
        Self::new(TextPipeline::default(), ProfileRegistry::builtin().get(DEFAULT_PROFILE))
    }
}

fn boundary_has_whitespace(left: &str, right: &str) -> bool {
    left.ends_with(char::is_whitespace) || right.starts_with(char::is_whitespace)
}

/// Append `next`, inserting one space if asked and collapsing whitespace at the seam.
fn append(out: &mut String, next: &str, space: bool) {
    if out.ends_with(char::is_whitespace) {
        out.push_str(next.trim_start());
        return;
    }
    if space && !out.is_empty() && !next.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(next);
}

/// Fold consecutive same-style tokens into styled runs.
///
/// Inferred spaces are re-inserted in front of the token that carried them.
pub fn merge_tokens(tokens: &[LineToken]) -> Vec<MergedRun> {
    let mut runs: Vec<MergedRun> = Vec::new();
    for token in tokens {
        match runs.last_mut() {
            Some(run) if run.style.same_style(&token.style) => {
                append(&mut run.text, &token.text, token.space_before);
            }
            _ => {
                let mut text = String::with_capacity(token.text.len() + 1);
                if token.space_before && !runs.is_empty() {
                    text.push(' ');
                }
                text.push_str(&token.text);
                runs.push(MergedRun {
                    text,
                    style: token.style.clone(),
                });
            }
        }
    }
    runs
}

/// Reconstruct one line of runs with the default pipeline and profile.
pub fn reconstruct_line_text(runs: &[TextRun]) -> String {
    LinePipeline::default().reconstruct_text(&normalize_runs(runs))
}

/// Tokenize one line of runs with the default pipeline and profile.
pub fn reconstruct_line_tokens(runs: &[TextRun]) -> Vec<LineToken> {
    LinePipeline::default().reconstruct_tokens(&normalize_runs(runs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::classifier::BoundaryRule;

    fn words(words: &[(&str, f32)], char_width: f32) -> Vec<TextRun> {
        words
            .iter()
            .map(|(text, x)| TextRun::new(*text, *x, 700.0, char_width * text.chars().count() as f32, 10.0))
            .collect()
    }

    #[test]
    fn test_pipeline_names() {
        assert_eq!(TextPipeline::from_name("legacy"), TextPipeline::Legacy);
        assert_eq!(TextPipeline::from_name("v2"), TextPipeline::Rules);
        assert_eq!(TextPipeline::from_name("V2-Smart"), TextPipeline::Smart);
        assert_eq!(TextPipeline::from_name("quantum"), TextPipeline::Rules);
        assert_eq!(TextPipeline::default().to_string(), "rules");
    }

    #[test]
    fn test_pipeline_serde() {
        let p: TextPipeline = serde_json::from_str("\"v2-smart\"").unwrap();
        assert_eq!(p, TextPipeline::Smart);
        assert_eq!(serde_json::to_string(&TextPipeline::Legacy).unwrap(), "\"legacy\"");
        let unknown: TextPipeline = serde_json::from_str("\"nope\"").unwrap();
        assert_eq!(unknown, TextPipeline::Rules);
    }

    #[test]
    fn test_reconstruct_sentence() {
        // "Hello" [gap 5] "world" [gap 0] "!"
        let runs = words(&[("Hello", 0.0), ("world", 30.0), ("!", 55.0)], 5.0);
        assert_eq!(reconstruct_line_text(&runs), "Hello world!");
    }

    #[test]
    fn test_split_word_rejoined() {
        let runs = words(&[("Rec", 0.0), ("onstruct", 15.5)], 5.0);
        assert_eq!(reconstruct_line_text(&runs), "Reconstruct");
    }

    #[test]
    fn test_existing_whitespace_not_doubled() {
        let runs = words(&[("Hello ", 0.0), ("world", 40.0), (" again", 75.0)], 5.0);
        let text = reconstruct_line_text(&runs);
        assert_eq!(text, "Hello world again");
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(reconstruct_line_text(&[]), "");
        let runs = words(&[("alone", 0.0)], 5.0);
        assert_eq!(reconstruct_line_text(&runs), "alone");
        assert!(LinePipeline::default().decisions(&normalize_runs(&runs)).is_empty());
    }

    #[test]
    fn test_tokens_break_on_style_and_space() {
        let runs = vec![
            TextRun::new("Bold", 0.0, 700.0, 20.0, 10.0).with_weight("bold"),
            TextRun::new("face", 20.0, 700.0, 20.0, 10.0),
            TextRun::new("text", 45.0, 700.0, 20.0, 10.0),
        ];
        let tokens = reconstruct_line_tokens(&runs);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "Bold");
        assert!(tokens[0].style.is_bold());
        assert_eq!(tokens[1].text, "face");
        assert!(!tokens[1].space_before);
        assert!(tokens[2].space_before);

        let merged = merge_tokens(&tokens);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "Bold");
        assert_eq!(merged[1].text, "face text");
    }

    #[test]
    fn test_tokens_join_same_style() {
        let runs = words(&[("foo", 0.0), ("bar", 15.0)], 5.0);
        let tokens = reconstruct_line_tokens(&runs);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "foobar");
    }

    #[test]
    fn test_decisions_for_explain() {
        let runs = words(&[("12:", 0.0), ("30", 16.0), ("pm", 30.0)], 5.0);
        let pipeline = LinePipeline::new(TextPipeline::Rules, ProfileRegistry::builtin().get("latin-default"));
        let decisions = pipeline.decisions(&normalize_runs(&runs));
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[0].rule, BoundaryRule::TimePattern);
        assert!(!decisions[0].is_space());
    }

    #[test]
    fn test_smart_fix_merged_words() {
        let runs = words(&[("theannualreport", 0.0)], 5.0);
        let glyphs = normalize_runs(&runs);
        let profile = ProfileRegistry::builtin().get("latin-default");

        let plain = LinePipeline::new(TextPipeline::Smart, profile.clone());
        assert_eq!(plain.reconstruct_text(&glyphs), "theannualreport");

        let fixing = LinePipeline::new(TextPipeline::Smart, profile.clone()).with_merged_word_fix(true);
        assert_eq!(fixing.reconstruct_text(&glyphs), "the annual report");

        // Only the smart pipeline re-splits
        let rules = LinePipeline::new(TextPipeline::Rules, profile).with_merged_word_fix(true);
        assert_eq!(rules.reconstruct_text(&glyphs), "theannualreport");
    }

    #[test]
    fn test_deterministic() {
        let runs = words(&[("alpha", 0.0), ("beta", 27.0), ("gamma", 49.0)], 5.0);
        let a = reconstruct_line_text(&runs);
        let b = reconstruct_line_text(&runs);
        assert_eq!(a, b);
    }
}
