//! Space-or-join classification of adjacent glyph pairs.
//!
//! Every classifier answers the same question for one boundary: does a
//! space belong between `prev` and `next`? The rule-augmented classifier
//! evaluates a fixed precedence list; the first rule that matches decides.
//!
//! ```text
//!  1 overlap            gap < 0                       -> join
//!  2 gap by char        gap / estimated char width
//!  3 CJK                spaceless chars, CJK line      -> join
//!  4 time               "12:" + "30"                   -> join
//!  5 URL / path         "www." + "example"             -> join
//!  6 closing punct      "word" + ","                   -> join
//!  7 single letters     "W" + "o" below 1.35x          -> join
//!  8 profile splits     camelCase, ALLCAPS, 12abc      -> space at reduced gap
//!  9 effective threshold (digits up, separators / words down)
//! 10 gap >= threshold   -> space
//! ```

use serde::{Deserialize, Serialize};

use super::profile::ClassifierProfile;
use super::rules;
use super::script::{is_spaceless_script_char, Script};
use super::{Glyph, LineGeometryModel};

/// Gaps down to this fraction of the font size below zero are kerning noise.
const KERNING_TOLERANCE: f32 = 0.25;

/// Single letters join below `max(threshold * 1.35, 1.25)` characters.
const SINGLE_LETTER_FACTOR: f32 = 1.35;
const SINGLE_LETTER_MIN: f32 = 1.25;

/// Profile split thresholds as fractions of the scaled base threshold.
const LOWER_UPPER_SPLIT: f32 = 0.35;
const ALL_CAPS_SPLIT: f32 = 0.45;
const DIGIT_ALPHA_SPLIT: f32 = 0.3;

/// ALL-CAPS pairs longer than this (combined) are left to the default rule.
const ALL_CAPS_MAX_COMBINED: usize = 24;

/// Ceiling after a `:;,` separator.
const SEPARATOR_THRESHOLD: f32 = 0.28;

/// Ceiling between two multi-character words.
const WORD_PAIR_THRESHOLD: f32 = 0.32;

/// Outcome of one boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Insert a space
    Space,
    /// Concatenate directly
    Join,
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Glyphs overlap
    Overlap,
    /// Spaceless script on both sides
    CjkJoin,
    /// Clock time split across glyphs
    TimePattern,
    /// URL, path, domain or e-mail
    UrlContext,
    /// Next glyph opens with closing punctuation
    ClosingPunctuation,
    /// Two single-letter fragments
    SingleLetter,
    /// lowercase→Uppercase split
    LowerUpper,
    /// ALL-CAPS word pair split
    AllCaps,
    /// digit↔letter split
    DigitAlpha,
    /// Dictionary lookup
    Dictionary,
    /// Bigram / pattern model
    Predictive,
    /// Gap compared against the effective threshold
    Gap,
}

/// Result of classifying one adjacent glyph pair.
///
/// `confidence` and `rule` are diagnostics; nothing downstream branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDecision {
    /// Space or join
    pub kind: BoundaryKind,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Horizontal gap in page units, after kerning clamp
    pub gap_px: f32,
    /// Gap in estimated character widths
    pub gap_by_char: f32,
    /// Threshold the gap was compared against
    pub threshold_by_char: f32,
    /// Deciding rule
    pub rule: BoundaryRule,
}

impl BoundaryDecision {
    /// Whether a space is inserted.
    pub fn is_space(&self) -> bool {
        self.kind == BoundaryKind::Space
    }

    fn fixed(kind: BoundaryKind, confidence: f32, gap: Gap, threshold: f32, rule: BoundaryRule) -> Self {
        Self {
            kind,
            confidence,
            gap_px: gap.px,
            gap_by_char: gap.by_char,
            threshold_by_char: threshold,
            rule,
        }
    }

    /// `space` iff the gap reaches the threshold; confidence grows with the margin.
    pub(crate) fn by_gap(gap: Gap, threshold: f32, rule: BoundaryRule) -> Self {
        let kind = if gap.by_char >= threshold {
            BoundaryKind::Space
        } else {
            BoundaryKind::Join
        };
        Self::fixed(kind, gap_confidence(gap.by_char, threshold), gap, threshold, rule)
    }

    pub(crate) fn join(confidence: f32, gap: Gap, threshold: f32, rule: BoundaryRule) -> Self {
        Self::fixed(BoundaryKind::Join, confidence, gap, threshold, rule)
    }

    pub(crate) fn space(confidence: f32, gap: Gap, threshold: f32, rule: BoundaryRule) -> Self {
        Self::fixed(BoundaryKind::Space, confidence, gap, threshold, rule)
    }
}

/// `clamp01(0.55 + min(1.5, |gap - threshold|) / 1.5)`
pub fn gap_confidence(gap_by_char: f32, threshold: f32) -> f32 {
    (0.55 + (gap_by_char - threshold).abs().min(1.5) / 1.5).clamp(0.0, 1.0)
}

/// Measured gap between two glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    /// Gap in page units
    pub px: f32,
    /// Gap in estimated character widths
    pub by_char: f32,
}

impl Gap {
    /// Measure the gap, clamping kerning-sized overlaps to zero.
    pub fn measure(prev: &Glyph<'_>, next: &Glyph<'_>, model: &LineGeometryModel) -> Self {
        let mut px = next.x - prev.right();
        if px < 0.0 && px >= -KERNING_TOLERANCE * model.avg_font_size {
            px = 0.0;
        }
        Self {
            px,
            by_char: px / model.estimated_char_width,
        }
    }

    /// Whether the glyphs genuinely overlap.
    pub fn is_overlap(&self) -> bool {
        self.px < 0.0
    }
}

/// Per-line state threaded through classification.
#[derive(Debug, Clone)]
pub struct ClassifyContext {
    /// Profile in effect for the line
    pub profile: ClassifierProfile,
    /// Script the line resolved to
    pub script: Script,
    /// Word accumulated so far, ending with `prev`; reset on every space
    pub current_word: String,
}

impl ClassifyContext {
    /// Create a context at the start of a line.
    pub fn new(profile: ClassifierProfile, script: Script) -> Self {
        Self {
            profile,
            script,
            current_word: String::new(),
        }
    }

    /// Word preceding the boundary: the accumulated word, or `prev` alone.
    pub fn word_before<'a>(&'a self, prev: &'a Glyph<'_>) -> &'a str {
        if self.current_word.is_empty() {
            &prev.text
        } else {
            &self.current_word
        }
    }

    /// Record a decision: joins extend the word, spaces restart it.
    pub fn record(&mut self, decision: &BoundaryDecision, next: &Glyph<'_>) {
        if decision.is_space() {
            self.current_word.clear();
        }
        self.current_word.push_str(&next.text);
    }

    /// Reset the accumulated word at the start of a line.
    pub fn start_line(&mut self, first: Option<&Glyph<'_>>) {
        self.current_word.clear();
        if let Some(glyph) = first {
            self.current_word.push_str(&glyph.text);
        }
    }
}

/// Decides space-or-join for one adjacent glyph pair.
pub trait BoundaryClassifier: Send + Sync {
    /// Short identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Classify the boundary between `prev` and `next`.
    fn classify(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        model: &LineGeometryModel,
        ctx: &ClassifyContext,
    ) -> BoundaryDecision;
}

/// Scaled base threshold of a line.
pub fn base_threshold(model: &LineGeometryModel, profile: &ClassifierProfile) -> f32 {
    model.word_break_threshold_by_char * profile.clamped_scale()
}

/// Spaceless characters on both sides of a line that resolved to CJK.
fn is_cjk_boundary(prev: &Glyph<'_>, next: &Glyph<'_>, ctx: &ClassifyContext) -> bool {
    ctx.profile.join_cjk
        && ctx.script == Script::Cjk
        && prev.last_char().map(is_spaceless_script_char).unwrap_or(false)
        && next.first_char().map(is_spaceless_script_char).unwrap_or(false)
}

/// Geometry-only classification (the `legacy` pipeline).
///
/// Overlaps and CJK pairs join; everything else is a plain gap test.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricClassifier;

impl BoundaryClassifier for GeometricClassifier {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn classify(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        model: &LineGeometryModel,
        ctx: &ClassifyContext,
    ) -> BoundaryDecision {
        let gap = Gap::measure(prev, next, model);
        let threshold = base_threshold(model, &ctx.profile);
        if gap.is_overlap() {
            return BoundaryDecision::join(0.9, gap, threshold, BoundaryRule::Overlap);
        }
        if is_cjk_boundary(prev, next, ctx) {
            return BoundaryDecision::join(0.95, gap, threshold, BoundaryRule::CjkJoin);
        }
        BoundaryDecision::by_gap(gap, threshold, BoundaryRule::Gap)
    }
}

/// Where the precedence list stopped.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RuleOutcome {
    /// A rule before the default decided
    Decided(BoundaryDecision),
    /// Only the default gap test remains
    Default {
        /// Measured gap
        gap: Gap,
        /// Effective threshold after contextual adjustments
        threshold: f32,
    },
}

/// Geometry plus the domain rules (the `rules` pipeline).
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    /// Run rules 1 through 9.
    pub(crate) fn evaluate(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        model: &LineGeometryModel,
        ctx: &ClassifyContext,
    ) -> RuleOutcome {
        let profile = &ctx.profile;
        let gap = Gap::measure(prev, next, model);
        let base = base_threshold(model, profile);
        let (p, n) = (prev.text.as_str(), next.text.as_str());

        if gap.is_overlap() {
            return RuleOutcome::Decided(BoundaryDecision::join(0.9, gap, base, BoundaryRule::Overlap));
        }
        if is_cjk_boundary(prev, next, ctx) {
            return RuleOutcome::Decided(BoundaryDecision::join(0.95, gap, base, BoundaryRule::CjkJoin));
        }
        if rules::is_time_split(p, n) {
            return RuleOutcome::Decided(BoundaryDecision::join(0.95, gap, base, BoundaryRule::TimePattern));
        }
        if rules::is_url_context(p, n) {
            return RuleOutcome::Decided(BoundaryDecision::join(0.9, gap, base, BoundaryRule::UrlContext));
        }
        if rules::starts_with_closing_punct(n) {
            return RuleOutcome::Decided(BoundaryDecision::join(
                0.9,
                gap,
                base,
                BoundaryRule::ClosingPunctuation,
            ));
        }
        if rules::is_single_letter_pair(p, n) {
            let elevated = (base * SINGLE_LETTER_FACTOR).max(SINGLE_LETTER_MIN);
            if gap.by_char < elevated {
                return RuleOutcome::Decided(BoundaryDecision::join(
                    0.8,
                    gap,
                    elevated,
                    BoundaryRule::SingleLetter,
                ));
            }
        }
        if let Some(decision) = self.profile_split(prev, next, gap, base, ctx) {
            return RuleOutcome::Decided(decision);
        }

        RuleOutcome::Default {
            gap,
            threshold: effective_threshold(p, n, base, profile),
        }
    }

    fn profile_split(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        gap: Gap,
        base: f32,
        ctx: &ClassifyContext,
    ) -> Option<BoundaryDecision> {
        let profile = &ctx.profile;
        let (p, n) = (prev.text.as_str(), next.text.as_str());

        if profile.split_lower_upper && rules::is_lower_upper_split(p, n) {
            let word = rules::trailing_word(ctx.word_before(prev));
            if !profile.is_camel_case_prefix(word) {
                let threshold = base * LOWER_UPPER_SPLIT;
                if gap.by_char >= threshold {
                    return Some(BoundaryDecision::by_gap(gap, threshold, BoundaryRule::LowerUpper));
                }
            }
        }
        if profile.split_all_caps {
            if let Some(len) = rules::all_caps_pair_len(p, n) {
                let threshold = base * ALL_CAPS_SPLIT;
                if len <= ALL_CAPS_MAX_COMBINED && gap.by_char >= threshold {
                    return Some(BoundaryDecision::by_gap(gap, threshold, BoundaryRule::AllCaps));
                }
            }
        }
        if profile.split_digit_alpha && rules::is_digit_alpha_transition(p, n) {
            let threshold = base * DIGIT_ALPHA_SPLIT;
            if gap.by_char >= threshold {
                return Some(BoundaryDecision::by_gap(gap, threshold, BoundaryRule::DigitAlpha));
            }
        }
        None
    }
}

/// Base threshold adjusted for what sits on either side of the boundary.
pub fn effective_threshold(prev: &str, next: &str, base: f32, profile: &ClassifierProfile) -> f32 {
    let mut threshold = base;
    if rules::is_digit_pair(prev, next) {
        threshold = threshold.max(profile.digit_threshold());
    }
    if rules::is_separator_then_alnum(prev, next) && !rules::is_time_split(prev, next) {
        threshold = threshold.min(SEPARATOR_THRESHOLD);
    }
    if rules::is_multi_char_alpha_pair(prev, next) {
        threshold = threshold.min(WORD_PAIR_THRESHOLD);
    }
    threshold
}

impl BoundaryClassifier for RuleClassifier {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn classify(
        &self,
        prev: &Glyph<'_>,
        next: &Glyph<'_>,
        model: &LineGeometryModel,
        ctx: &ClassifyContext,
    ) -> BoundaryDecision {
        match self.evaluate(prev, next, model, ctx) {
            RuleOutcome::Decided(decision) => decision,
            RuleOutcome::Default { gap, threshold } => {
                BoundaryDecision::by_gap(gap, threshold, BoundaryRule::Gap)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::TextRun;
    use crate::text::normalize_runs;
    use crate::text::profile::ProfileRegistry;

    /// Two runs on one baseline; `prev` is `char_width` wide per char and
    /// `next` starts `gap` units after it.
    pub(crate) fn pair(prev: &str, next: &str, char_width: f32, gap: f32, font_size: f32) -> Vec<TextRun> {
        let prev_width = char_width * prev.chars().count() as f32;
        let next_width = char_width * next.chars().count() as f32;
        vec![
            TextRun::new(prev, 0.0, 0.0, prev_width, font_size),
            TextRun::new(next, prev_width + gap, 0.0, next_width, font_size),
        ]
    }

    pub(crate) fn classify_with(
        classifier: &dyn BoundaryClassifier,
        runs: &[TextRun],
        profile: &str,
    ) -> BoundaryDecision {
        let glyphs = normalize_runs(runs);
        let model = LineGeometryModel::from_glyphs(&glyphs);
        let profile = ProfileRegistry::builtin().get(profile);
        let script = profile.resolve_script(&glyphs);
        let ctx = ClassifyContext::new(profile, script);
        classifier.classify(&glyphs[0], &glyphs[1], &model, &ctx)
    }

    #[test]
    fn test_overlap_always_joins() {
        for profile in ["latin-default", "latin-loose", "cjk-default", "auto-words"] {
            let runs = pair("abc", "def", 5.0, -8.0, 10.0);
            let d = classify_with(&RuleClassifier, &runs, profile);
            assert_eq!(d.kind, BoundaryKind::Join);
            assert_eq!(d.rule, BoundaryRule::Overlap);
            assert_eq!(d.confidence, 0.9);

            let d = classify_with(&GeometricClassifier, &runs, profile);
            assert_eq!(d.kind, BoundaryKind::Join);
        }
    }

    #[test]
    fn test_kerning_overlap_clamped() {
        // -2 at 10pt is within the 0.25 * font size tolerance
        let runs = pair("abc", "def", 5.0, -2.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.gap_px, 0.0);
        assert_eq!(d.rule, BoundaryRule::Gap);
        assert_eq!(d.kind, BoundaryKind::Join);
    }

    #[test]
    fn test_cjk_joins_at_large_gap() {
        let runs = pair("中文", "字符", 10.0, 40.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "cjk-default");
        assert_eq!(d.kind, BoundaryKind::Join);
        assert_eq!(d.rule, BoundaryRule::CjkJoin);

        let d = classify_with(&GeometricClassifier, &runs, "cjk-default");
        assert_eq!(d.kind, BoundaryKind::Join);

        // Without the flag the gap decides
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.kind, BoundaryKind::Space);
    }

    #[test]
    fn test_cjk_join_needs_cjk_line() {
        // Two Han glyphs far apart inside a mostly Latin line
        let mut runs = pair("中", "文", 10.0, 40.0, 10.0);
        runs.push(TextRun::new("Latin words here", 80.0, 0.0, 80.0, 10.0));
        let glyphs = normalize_runs(&runs);
        let model = LineGeometryModel::from_glyphs(&glyphs);
        let profile = ProfileRegistry::builtin().get(crate::text::DEFAULT_PROFILE);
        let script = profile.resolve_script(&glyphs);
        assert_eq!(script, Script::Latin);

        let ctx = ClassifyContext::new(profile.clone(), script);
        let d = RuleClassifier.classify(&glyphs[0], &glyphs[1], &model, &ctx);
        assert_eq!(d.kind, BoundaryKind::Space);
        assert_ne!(d.rule, BoundaryRule::CjkJoin);

        // The same pair on a line that resolves to CJK joins
        let ctx = ClassifyContext::new(profile, Script::Cjk);
        let d = RuleClassifier.classify(&glyphs[0], &glyphs[1], &model, &ctx);
        assert_eq!(d.rule, BoundaryRule::CjkJoin);
        let d = GeometricClassifier.classify(&glyphs[0], &glyphs[1], &model, &ctx);
        assert_eq!(d.kind, BoundaryKind::Join);
    }

    #[test]
    fn test_time_literal_joins() {
        let runs = pair("12:", "30", 5.0, 2.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "auto-default");
        assert_eq!(d.kind, BoundaryKind::Join);
        assert_eq!(d.rule, BoundaryRule::TimePattern);
        assert!(d.confidence >= 0.9);
    }

    #[test]
    fn test_sentence_boundary_spaces() {
        let runs = pair("Hello.", "World", 5.0, 5.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "auto-default");
        assert_eq!(d.kind, BoundaryKind::Space);
        assert!((d.gap_by_char - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_digit_run_joins() {
        let runs = pair("555", "1234", 5.0, 4.5, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "auto-default");
        assert!((d.gap_by_char - 0.9).abs() < 1e-4);
        assert_eq!(d.threshold_by_char, 1.35);
        assert_eq!(d.kind, BoundaryKind::Join);
    }

    #[test]
    fn test_closing_punctuation_joins() {
        let runs = pair("word", ",", 5.0, 6.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.kind, BoundaryKind::Join);
        assert_eq!(d.rule, BoundaryRule::ClosingPunctuation);
    }

    #[test]
    fn test_single_letters_use_elevated_threshold() {
        // 1.1 chars: above the base 0.9 but below 1.25
        let runs = pair("W", "o", 5.0, 5.5, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.kind, BoundaryKind::Join);
        assert_eq!(d.rule, BoundaryRule::SingleLetter);

        let runs = pair("W", "o", 5.0, 8.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.kind, BoundaryKind::Space);
    }

    #[test]
    fn test_lower_upper_split_only_when_enabled() {
        // 0.4 chars between two words: below 0.9 base, above 0.315 split
        let runs = pair("lower", "Upper", 5.0, 2.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-words");
        assert_eq!(d.kind, BoundaryKind::Space);
        assert_eq!(d.rule, BoundaryRule::LowerUpper);

        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_ne!(d.rule, BoundaryRule::LowerUpper);
    }

    #[test]
    fn test_camel_case_prefix_exempt() {
        let runs = pair("i", "Phone", 5.0, 2.0, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-words");
        assert_ne!(d.rule, BoundaryRule::LowerUpper);
        assert_eq!(d.kind, BoundaryKind::Join);
    }

    #[test]
    fn test_separator_lowers_threshold() {
        let runs = pair("Note:", "this", 5.0, 1.5, 10.0);
        let d = classify_with(&RuleClassifier, &runs, "latin-default");
        assert_eq!(d.threshold_by_char, SEPARATOR_THRESHOLD);
        assert_eq!(d.kind, BoundaryKind::Space);
    }

    #[test]
    fn test_geometric_ignores_domain_rules() {
        let runs = pair("12:", "30", 5.0, 5.0, 10.0);
        let d = classify_with(&GeometricClassifier, &runs, "latin-default");
        assert_eq!(d.kind, BoundaryKind::Space);
    }

    #[test]
    fn test_gap_monotonic() {
        let mut seen_space = false;
        for step in 0..60 {
            let gap = step as f32 * 0.25;
            let runs = pair("Hello", "world", 5.0, gap, 10.0);
            let d = classify_with(&RuleClassifier, &runs, "latin-words");
            if seen_space {
                assert_eq!(d.kind, BoundaryKind::Space, "flipped back at gap {}", gap);
            }
            seen_space |= d.is_space();
        }
        assert!(seen_space);
    }

    #[test]
    fn test_confidence_formula() {
        assert!((gap_confidence(1.0, 1.0) - 0.55).abs() < 1e-6);
        assert_eq!(gap_confidence(5.0, 1.0), 1.0);
        assert!((gap_confidence(0.25, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_context_records_words() {
        let runs = pair("Hel", "lo", 5.0, 0.0, 10.0);
        let glyphs = normalize_runs(&runs);
        let mut ctx = ClassifyContext::new(ProfileRegistry::new().get("latin-default"), Script::Latin);
        ctx.start_line(glyphs.first());
        assert_eq!(ctx.word_before(&glyphs[0]), "Hel");

        let join = BoundaryDecision::join(1.0, Gap { px: 0.0, by_char: 0.0 }, 0.9, BoundaryRule::Gap);
        ctx.record(&join, &glyphs[1]);
        assert_eq!(ctx.current_word, "Hello");

        let space = BoundaryDecision::space(1.0, Gap { px: 9.0, by_char: 2.0 }, 0.9, BoundaryRule::Gap);
        ctx.record(&space, &glyphs[0]);
        assert_eq!(ctx.current_word, "Hel");
    }
}
