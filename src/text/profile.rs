//! Named classifier profiles, one per script or behavioral variant.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::script::{resolve_script_for_glyphs, Script};
use super::Glyph;
use crate::error::Result;

/// Profile used when a name is unknown or absent.
pub const DEFAULT_PROFILE: &str = "auto-default";

/// Digit-to-digit threshold used when a profile sets none.
pub const DEFAULT_DIGIT_THRESHOLD: f32 = 1.35;

/// Bounds applied to `word_break_threshold_scale`.
const SCALE_MIN: f32 = 0.25;
const SCALE_MAX: f32 = 3.0;

/// A bundle of thresholds and flags tuning the boundary classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierProfile {
    /// Registry name (e.g., "latin-default")
    pub name: String,

    /// Target script, or `auto` to resolve per line
    pub script: Script,

    /// Multiplier applied to the base word-break threshold
    #[serde(default = "default_scale")]
    pub word_break_threshold_scale: f32,

    /// Split lowercase→Uppercase boundaries at a reduced gap
    #[serde(default)]
    pub split_lower_upper: bool,

    /// Split adjacent ALL-CAPS tokens at a reduced gap
    #[serde(default)]
    pub split_all_caps: bool,

    /// Split digit↔letter transitions at a reduced gap
    #[serde(default)]
    pub split_digit_alpha: bool,

    /// Never insert spaces between spaceless-script characters
    #[serde(default)]
    pub join_cjk: bool,

    /// Minimum threshold between digit runs (phone numbers, IDs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digit_word_break_threshold_min: Option<f32>,

    /// Lowercase prefixes exempt from lower→Upper splitting ("iPhone", "eBay")
    #[serde(default = "default_camel_case_prefixes")]
    pub camel_case_prefixes: Vec<String>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_camel_case_prefixes() -> Vec<String> {
    vec!["i".to_string(), "e".to_string()]
}

impl ClassifierProfile {
    /// Create a profile with neutral settings for a script.
    pub fn new(name: impl Into<String>, script: Script) -> Self {
        Self {
            name: name.into(),
            script,
            word_break_threshold_scale: default_scale(),
            split_lower_upper: false,
            split_all_caps: false,
            split_digit_alpha: false,
            join_cjk: false,
            digit_word_break_threshold_min: None,
            camel_case_prefixes: default_camel_case_prefixes(),
        }
    }

    fn with_scale(mut self, scale: f32) -> Self {
        self.word_break_threshold_scale = scale;
        self
    }

    fn with_word_splits(mut self) -> Self {
        self.split_lower_upper = true;
        self.split_all_caps = true;
        self.split_digit_alpha = true;
        self
    }

    fn with_join_cjk(mut self) -> Self {
        self.join_cjk = true;
        self
    }

    /// Threshold scale clamped to a sane range.
    pub fn clamped_scale(&self) -> f32 {
        if self.word_break_threshold_scale.is_finite() {
            self.word_break_threshold_scale.clamp(SCALE_MIN, SCALE_MAX)
        } else {
            1.0
        }
    }

    /// Threshold between digit runs.
    pub fn digit_threshold(&self) -> f32 {
        self.digit_word_break_threshold_min
            .unwrap_or(DEFAULT_DIGIT_THRESHOLD)
    }

    /// Whether a lowercase word is an exempt camelCase prefix.
    pub fn is_camel_case_prefix(&self, word: &str) -> bool {
        self.camel_case_prefixes
            .iter()
            .any(|p| p.eq_ignore_ascii_case(word))
    }

    /// Script to classify a line with; `auto` resolves by majority vote.
    pub fn resolve_script(&self, glyphs: &[Glyph<'_>]) -> Script {
        match self.script {
            Script::Auto => resolve_script_for_glyphs(glyphs, Script::Latin),
            script => script,
        }
    }
}

/// Name → profile lookup table.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, ClassifierProfile>,
}

impl ProfileRegistry {
    /// Create a registry holding only the built-in profiles.
    pub fn new() -> Self {
        let builtin = [
            ClassifierProfile::new("latin-default", Script::Latin),
            ClassifierProfile::new("latin-words", Script::Latin).with_word_splits(),
            ClassifierProfile::new("latin-loose", Script::Latin).with_scale(1.3),
            ClassifierProfile::new("cyrillic-default", Script::Cyrillic),
            ClassifierProfile::new("greek-default", Script::Greek),
            ClassifierProfile::new("cjk-default", Script::Cjk).with_join_cjk(),
            ClassifierProfile::new("arabic-default", Script::Arabic).with_scale(1.1),
            ClassifierProfile::new("hebrew-default", Script::Hebrew).with_scale(1.1),
            ClassifierProfile::new("devanagari-default", Script::Devanagari),
            ClassifierProfile::new(DEFAULT_PROFILE, Script::Auto).with_join_cjk(),
            ClassifierProfile::new("auto-words", Script::Auto)
                .with_join_cjk()
                .with_word_splits(),
        ];
        Self {
            profiles: builtin
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    /// The process-wide built-in registry, created on first use.
    pub fn builtin() -> Arc<ProfileRegistry> {
        static BUILTIN: OnceLock<Arc<ProfileRegistry>> = OnceLock::new();
        BUILTIN.get_or_init(|| Arc::new(ProfileRegistry::new())).clone()
    }

    /// Parse a JSON array of profiles and register them over the built-ins.
    pub fn from_json(json: &str) -> Result<Self> {
        let custom: Vec<ClassifierProfile> = serde_json::from_str(json)?;
        Ok(custom
            .into_iter()
            .fold(Self::new(), |registry, p| registry.with_profile(p)))
    }

    /// Register (or replace) a profile.
    pub fn with_profile(mut self, profile: ClassifierProfile) -> Self {
        self.profiles.insert(profile.name.clone(), profile);
        self
    }

    /// Look up a profile by name, falling back to `auto-default`.
    pub fn get(&self, name: &str) -> ClassifierProfile {
        if let Some(profile) = self.profiles.get(name) {
            return profile.clone();
        }
        log::debug!(
            "Unknown classifier profile '{}', using '{}'",
            name,
            DEFAULT_PROFILE
        );
        self.profiles
            .get(DEFAULT_PROFILE)
            .cloned()
            .unwrap_or_else(|| ClassifierProfile::new(DEFAULT_PROFILE, Script::Auto).with_join_cjk())
    }

    /// Whether a profile with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Registered profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over registered profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassifierProfile> {
        self.profiles.values()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;
    use crate::text::normalize_runs;

    #[test]
    fn test_builtin_profiles() {
        let registry = ProfileRegistry::builtin();
        assert!(registry.contains("latin-default"));
        assert!(registry.contains("cjk-default"));
        assert!(registry.contains(DEFAULT_PROFILE));
        assert!(registry.get("cjk-default").join_cjk);
        assert!(registry.get("latin-words").split_lower_upper);
    }

    #[test]
    fn test_unknown_profile_falls_back() {
        let registry = ProfileRegistry::new();
        let profile = registry.get("klingon-default");
        assert_eq!(profile.name, DEFAULT_PROFILE);
        assert_eq!(profile.script, Script::Auto);
    }

    #[test]
    fn test_lookup_returns_copy() {
        let registry = ProfileRegistry::new();
        let mut profile = registry.get("latin-default");
        profile.word_break_threshold_scale = 2.0;
        assert_eq!(registry.get("latin-default").word_break_threshold_scale, 1.0);
    }

    #[test]
    fn test_scale_clamped() {
        let mut profile = ClassifierProfile::new("x", Script::Latin);
        profile.word_break_threshold_scale = 10.0;
        assert_eq!(profile.clamped_scale(), 3.0);
        profile.word_break_threshold_scale = 0.0;
        assert_eq!(profile.clamped_scale(), 0.25);
        profile.word_break_threshold_scale = f32::NAN;
        assert_eq!(profile.clamped_scale(), 1.0);
    }

    #[test]
    fn test_auto_resolves_per_line() {
        let runs = vec![TextRun::new("Привет", 0.0, 0.0, 30.0, 10.0)];
        let glyphs = normalize_runs(&runs);
        let registry = ProfileRegistry::new();
        assert_eq!(registry.get(DEFAULT_PROFILE).resolve_script(&glyphs), Script::Cyrillic);
        assert_eq!(registry.get("latin-default").resolve_script(&glyphs), Script::Latin);
    }

    #[test]
    fn test_custom_profiles_from_json() {
        let registry = ProfileRegistry::from_json(
            r#"[{"name": "brand-words", "script": "latin", "split_lower_upper": true,
                 "camel_case_prefixes": ["i", "e", "my"]}]"#,
        )
        .unwrap();
        let profile = registry.get("brand-words");
        assert!(profile.split_lower_upper);
        assert!(profile.is_camel_case_prefix("My"));
        assert_eq!(profile.word_break_threshold_scale, 1.0);
        assert!(registry.contains("latin-default"));
    }

    #[test]
    fn test_camel_case_defaults() {
        let profile = ClassifierProfile::new("x", Script::Latin);
        assert!(profile.is_camel_case_prefix("i"));
        assert!(profile.is_camel_case_prefix("e"));
        assert!(!profile.is_camel_case_prefix("my"));
        assert_eq!(profile.digit_threshold(), DEFAULT_DIGIT_THRESHOLD);
    }
}
