//! Character-bigram and affix heuristics for ambiguous letter boundaries.

use std::collections::HashMap;

/// Bigrams common inside English words, with a rough within-word likelihood.
const WITHIN_WORD_BIGRAMS: &[(&str, f32)] = &[
    ("th", 0.95),
    ("he", 0.9),
    ("in", 0.92),
    ("er", 0.9),
    ("an", 0.88),
    ("re", 0.85),
    ("on", 0.85),
    ("at", 0.82),
    ("en", 0.85),
    ("nd", 0.9),
    ("ti", 0.9),
    ("es", 0.82),
    ("or", 0.82),
    ("te", 0.8),
    ("ed", 0.8),
    ("is", 0.78),
    ("it", 0.78),
    ("al", 0.82),
    ("ar", 0.82),
    ("st", 0.85),
    ("nt", 0.85),
    ("ng", 0.92),
    ("ou", 0.9),
    ("ea", 0.85),
    ("io", 0.92),
    ("le", 0.82),
    ("ve", 0.82),
    ("co", 0.78),
    ("me", 0.78),
    ("de", 0.78),
    ("hi", 0.78),
    ("ri", 0.8),
    ("ro", 0.8),
    ("ic", 0.85),
    ("ne", 0.78),
    ("ra", 0.8),
    ("ce", 0.82),
    ("li", 0.8),
    ("ch", 0.9),
    ("ll", 0.88),
    ("be", 0.75),
    ("ma", 0.75),
    ("si", 0.78),
    ("om", 0.78),
    ("ur", 0.8),
    ("qu", 0.98),
    ("ck", 0.95),
    ("sh", 0.85),
    ("ph", 0.92),
    ("wh", 0.85),
];

/// Bigrams that almost never occur inside a word.
const BOUNDARY_BIGRAMS: &[&str] = &[
    "qa", "qe", "qo", "qi", "qz", "qx", "qj", "qk", "qw", "jq", "jx", "jz", "xj", "vq", "vj",
    "vx", "zx", "zj", "kq", "wq", "fq", "pq", "gq", "bq", "hx", "jv", "kx", "mq", "wx", "xk",
];

/// Lowercase endings that complete a capitalized proper noun ("John" + "son").
const PROPER_NOUN_SUFFIXES: &[&str] = &["son", "sen", "ton", "berg", "burg", "ville", "ford", "stein", "field"];

/// Prefixes that rarely stand alone as words.
const BOUND_PREFIXES: &[&str] = &[
    "un", "re", "pre", "dis", "non", "mis", "anti", "sub", "inter", "trans", "semi",
];

/// Endings that rarely start a new word.
const WORD_FINAL_SUFFIXES: &[&str] = &[
    "ing", "tion", "sion", "ment", "ness", "able", "ible", "less", "ful", "ous", "ly", "ed",
    "est", "ity", "ism",
];

/// Confidence attached to inconclusive predictions.
const UNSURE: f32 = 0.5;

/// Verdict on one boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// `true` when the boundary separates two words
    pub boundary: bool,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl Prediction {
    fn boundary(confidence: f32) -> Self {
        Self {
            boundary: true,
            confidence,
        }
    }

    fn join(confidence: f32) -> Self {
        Self {
            boundary: false,
            confidence,
        }
    }
}

/// Scores a boundary between two letter sequences.
#[derive(Debug, Clone)]
pub struct PredictiveTextModel {
    within_word: HashMap<(char, char), f32>,
    boundary: HashMap<(char, char), f32>,
}

fn bigram_key(pair: &str) -> Option<(char, char)> {
    let mut chars = pair.chars();
    Some((chars.next()?, chars.next()?))
}

impl PredictiveTextModel {
    /// Build the model from the fixed tables.
    pub fn new() -> Self {
        let within_word = WITHIN_WORD_BIGRAMS
            .iter()
            .filter_map(|(pair, p)| bigram_key(pair).map(|k| (k, *p)))
            .collect();
        let boundary = BOUNDARY_BIGRAMS
            .iter()
            .filter_map(|pair| bigram_key(pair).map(|k| (k, 0.85)))
            .collect();
        Self { within_word, boundary }
    }

    /// Within-word likelihood of the bigram `a b`, if tabulated.
    pub fn bigram_likelihood(&self, a: char, b: char) -> Option<f32> {
        let key = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
        self.within_word.get(&key).copied()
    }

    /// Predict whether `left` and `right` are separate words.
    ///
    /// `left` is the word accumulated before the boundary, `right` the
    /// alphabetic run after it.
    pub fn predict(&self, left: &str, right: &str) -> Prediction {
        let (Some(a), Some(b)) = (left.chars().next_back(), right.chars().next()) else {
            return Prediction::boundary(0.0);
        };
        let left_lower = left.to_lowercase();
        let right_lower = right.to_lowercase();
        let right_is_lower = right.chars().all(|c| c.is_lowercase());

        // Capitalized stem plus a surname/place ending
        if left.chars().next().map(char::is_uppercase).unwrap_or(false)
            && right_is_lower
            && PROPER_NOUN_SUFFIXES.contains(&right_lower.as_str())
        {
            return Prediction::join(0.85);
        }

        // A new capital mid-word means a new word
        if a.is_lowercase() && b.is_uppercase() {
            return Prediction::boundary(0.8);
        }

        if right_is_lower && WORD_FINAL_SUFFIXES.contains(&right_lower.as_str()) && left.chars().count() >= 2 {
            return Prediction::join(0.8);
        }

        if right_is_lower
            && right.chars().count() >= 3
            && BOUND_PREFIXES.contains(&left_lower.as_str())
        {
            return Prediction::join(0.78);
        }

        let key = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
        if let Some(p) = self.boundary.get(&key) {
            return Prediction::boundary(*p);
        }
        match self.bigram_likelihood(a, b) {
            Some(p) => Prediction::join(0.5 + p * 0.4),
            None => Prediction::boundary(UNSURE),
        }
    }
}

impl Default for PredictiveTextModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proper_noun_suffix() {
        let model = PredictiveTextModel::new();
        let p = model.predict("John", "son");
        assert!(!p.boundary);
        assert!(p.confidence >= 0.75);
        // Lowercase stem is not a proper noun
        assert_ne!(model.predict("john", "son").confidence, 0.85);
    }

    #[test]
    fn test_case_change_is_boundary() {
        let model = PredictiveTextModel::new();
        let p = model.predict("annual", "Report");
        assert!(p.boundary);
        assert_eq!(p.confidence, 0.8);
    }

    #[test]
    fn test_affixes_join() {
        let model = PredictiveTextModel::new();
        assert!(!model.predict("walk", "ing").boundary);
        assert!(!model.predict("un", "likely").boundary);
        assert!(model.predict("un", "likely").confidence >= 0.75);
    }

    #[test]
    fn test_bigram_tables() {
        let model = PredictiveTextModel::new();
        let p = model.predict("wi", "th");
        assert!(!p.boundary);
        assert!(p.confidence >= 0.75);

        let p = model.predict("iraq", "zone");
        assert!(p.boundary);

        // Unknown bigram stays below the acceptance floor
        let p = model.predict("xyz", "vwb");
        assert!(p.confidence < 0.75);
    }

    #[test]
    fn test_empty_input() {
        let model = PredictiveTextModel::new();
        assert_eq!(model.predict("", "abc").confidence, 0.0);
        assert_eq!(model.bigram_likelihood('T', 'H'), Some(0.95));
    }
}
