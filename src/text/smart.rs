//! Rule classifier augmented with dictionary and bigram checks.

use std::sync::Arc;

use super::classifier::{
    BoundaryClassifier, BoundaryDecision, BoundaryRule, ClassifyContext, Gap, RuleClassifier,
    RuleOutcome,
};
use super::dictionary::WordValidator;
use super::predictive::PredictiveTextModel;
use super::rules;
use super::{Glyph, LineGeometryModel};

/// Width of the ambiguity band around the threshold, in character widths.
const AMBIGUITY_BAND: f32 = 0.35;

/// Gaps below this fraction of the threshold are clear joins and skip the band.
const BAND_FLOOR_RATIO: f32 = 0.5;

/// Dictionary scores at or above this join.
const DICTIONARY_JOIN: f32 = 0.9;

/// Dictionary scores at or below this split.
const DICTIONARY_SPLIT: f32 = 0.3;

/// Predictions below this confidence are ignored.
const PREDICTION_FLOOR: f32 = 0.75;

/// The `smart` pipeline.
///
/// Behaves exactly like [`RuleClassifier`] except for letter/letter
/// boundaries whose gap falls within the ambiguity band of the threshold.
/// Those consult the dictionary first and the predictive model second.
/// Touching glyphs, and gaps under half the threshold, never enter the band.
#[derive(Debug, Clone)]
pub struct SmartClassifier {
    rules: RuleClassifier,
    validator: Arc<WordValidator>,
    model: PredictiveTextModel,
}

impl SmartClassifier {
    /// Create a classifier over the shared common-word dictionary.
    pub fn new() -> Self {
        Self::with_validator(WordValidator::shared())
    }

    /// Create a classifier over a custom dictionary.
    pub fn with_validator(validator: Arc<WordValidator>) -> Self {
        Self {
            rules: RuleClassifier,
            validator,
            model: PredictiveTextModel::new(),
        }
    }

    fn resolve_ambiguous(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        ctx: &ClassifyContext,
        gap: Gap,
        threshold: f32,
    ) -> Option<BoundaryDecision> {
        let left = rules::trailing_word(ctx.word_before(prev));
        let right = rules::leading_word(&next.text);
        if left.is_empty() || right.is_empty() {
            return None;
        }

        let score = self.validator.score_join(left, right);
        if score >= DICTIONARY_JOIN {
            return Some(BoundaryDecision::join(score, gap, threshold, BoundaryRule::Dictionary));
        }
        if score <= DICTIONARY_SPLIT {
            return Some(BoundaryDecision::space(
                1.0 - score,
                gap,
                threshold,
                BoundaryRule::Dictionary,
            ));
        }

        let prediction = self.model.predict(left, right);
        if prediction.confidence < PREDICTION_FLOOR {
            return None;
        }
        let decision = if prediction.boundary {
            BoundaryDecision::space(prediction.confidence, gap, threshold, BoundaryRule::Predictive)
        } else {
            BoundaryDecision::join(prediction.confidence, gap, threshold, BoundaryRule::Predictive)
        };
        Some(decision)
    }
}

/// Whether geometry leaves the boundary open to linguistic checks.
fn is_in_band(gap: Gap, threshold: f32) -> bool {
    gap.px > 0.0
        && gap.by_char >= threshold * BAND_FLOOR_RATIO
        && (gap.by_char - threshold).abs() <= AMBIGUITY_BAND
}

impl Default for SmartClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryClassifier for SmartClassifier {
    fn name(&self) -> &'static str {
        "smart"
    }

    fn classify(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        model: &LineGeometryModel,
        ctx: &ClassifyContext,
    ) -> BoundaryDecision {
        match self.rules.evaluate(prev, next, model, ctx) {
            RuleOutcome::Decided(decision) => decision,
            RuleOutcome::Default { gap, threshold } => {
                let ambiguous = is_in_band(gap, threshold)
                    && rules::is_letter_boundary(&prev.text, &next.text);
                if ambiguous {
                    if let Some(decision) = self.resolve_ambiguous(prev, next, ctx, gap, threshold) {
                        return decision;
                    }
                }
                BoundaryDecision::by_gap(gap, threshold, BoundaryRule::Gap)
            }
        }
    }
}
