//! Writing-system detection by majority vote over code points.

use serde::{Deserialize, Serialize};

use super::Glyph;

/// Writing system a profile targets or a glyph sequence resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin alphabet
    Latin,
    /// Cyrillic alphabet
    Cyrillic,
    /// Greek alphabet
    Greek,
    /// Han, Kana and Hangul
    Cjk,
    /// Arabic script
    Arabic,
    /// Hebrew script
    Hebrew,
    /// Devanagari script
    Devanagari,
    /// Letters from any other script
    Other,
    /// Resolve per call from the text itself (profiles only)
    Auto,
}

impl Script {
    /// Lowercase name used in profile tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cyrillic => "cyrillic",
            Script::Greek => "greek",
            Script::Cjk => "cjk",
            Script::Arabic => "arabic",
            Script::Hebrew => "hebrew",
            Script::Devanagari => "devanagari",
            Script::Other => "other",
            Script::Auto => "auto",
        }
    }

    /// Whether text in this script is written right to left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Script::Arabic | Script::Hebrew)
    }
}

/// Order in which tied-for-first buckets are reported; ties resolve to the fallback.
const VOTE_ORDER: [Script; 8] = [
    Script::Latin,
    Script::Cyrillic,
    Script::Greek,
    Script::Cjk,
    Script::Arabic,
    Script::Hebrew,
    Script::Devanagari,
    Script::Other,
];

/// Bucket a character by script.
///
/// Only letters (and CJK ideographs) vote; digits, punctuation and
/// whitespace return `None`.
pub fn script_of(c: char) -> Option<Script> {
    let code = c as u32;
    let script = match code {
        0x0041..=0x005A | 0x0061..=0x007A => Script::Latin,
        0x00C0..=0x024F | 0x1E00..=0x1EFF => Script::Latin,
        0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
        0x0400..=0x052F | 0x2DE0..=0x2DFF | 0xA640..=0xA69F => Script::Cyrillic,
        0x0590..=0x05FF | 0xFB1D..=0xFB4F => Script::Hebrew,
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF => Script::Arabic,
        0xFB50..=0xFDFF | 0xFE70..=0xFEFF => Script::Arabic,
        0x0900..=0x097F | 0xA8E0..=0xA8FF => Script::Devanagari,
        0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Cjk,
        0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Cjk,
        0xF900..=0xFAFF | 0x20000..=0x2EBEF => Script::Cjk,
        _ if c.is_alphabetic() => Script::Other,
        _ => return None,
    };
    // Latin-1 and Latin Extended ranges contain a few symbols (×, ÷)
    if script == Script::Latin && !c.is_alphabetic() {
        return None;
    }
    Some(script)
}

/// Check if a character belongs to a script that doesn't use word spaces.
///
/// Chinese and Japanese don't use spaces between words, but Korean does,
/// so Hangul is deliberately absent here even though it votes as CJK.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs (Chinese characters, used in Chinese/Japanese)
    (0x4E00..=0x9FFF).contains(&code)
    // CJK Unified Ideographs Extension A
    || (0x3400..=0x4DBF).contains(&code)
    // CJK Unified Ideographs Extension B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // CJK Compatibility Ideographs
    || (0xF900..=0xFAFF).contains(&code)
    // Hiragana and Katakana (Japanese)
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
    // Fullwidth forms
    || (0xFF00..=0xFFEF).contains(&code)
}

/// Majority-vote script of a piece of text.
///
/// Returns `fallback` for empty input, ties, or when unlisted scripts win.
pub fn resolve_script_for_text(text: &str, fallback: Script) -> Script {
    let mut votes = [0usize; VOTE_ORDER.len()];
    for c in text.chars() {
        if let Some(script) = script_of(c) {
            if let Some(idx) = VOTE_ORDER.iter().position(|s| *s == script) {
                votes[idx] += 1;
            }
        }
    }
    pick_winner(&votes, fallback)
}

/// Majority-vote script over all glyph text of a line.
pub fn resolve_script_for_glyphs(glyphs: &[Glyph<'_>], fallback: Script) -> Script {
    let mut votes = [0usize; VOTE_ORDER.len()];
    for glyph in glyphs {
        for c in glyph.text.chars() {
            if let Some(script) = script_of(c) {
                if let Some(idx) = VOTE_ORDER.iter().position(|s| *s == script) {
                    votes[idx] += 1;
                }
            }
        }
    }
    pick_winner(&votes, fallback)
}

fn pick_winner(votes: &[usize; VOTE_ORDER.len()], fallback: Script) -> Script {
    let max = votes.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return fallback;
    }
    let mut leaders = VOTE_ORDER
        .iter()
        .zip(votes.iter())
        .filter(|(_, count)| **count == max)
        .map(|(script, _)| *script);
    match (leaders.next(), leaders.next()) {
        (Some(Script::Other), None) => fallback,
        (Some(script), None) => script,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtl_scripts() {
        assert!(Script::Arabic.is_rtl());
        assert!(Script::Hebrew.is_rtl());
        assert!(!Script::Latin.is_rtl());
        assert!(!Script::Cjk.is_rtl());
        assert!(!Script::Auto.is_rtl());
    }

    #[test]
    fn test_script_of() {
        assert_eq!(script_of('a'), Some(Script::Latin));
        assert_eq!(script_of('é'), Some(Script::Latin));
        assert_eq!(script_of('ж'), Some(Script::Cyrillic));
        assert_eq!(script_of('λ'), Some(Script::Greek));
        assert_eq!(script_of('中'), Some(Script::Cjk));
        assert_eq!(script_of('한'), Some(Script::Cjk));
        assert_eq!(script_of('ب'), Some(Script::Arabic));
        assert_eq!(script_of('ש'), Some(Script::Hebrew));
        assert_eq!(script_of('क'), Some(Script::Devanagari));
        assert_eq!(script_of('ก'), Some(Script::Other));
        assert_eq!(script_of('7'), None);
        assert_eq!(script_of(' '), None);
        assert_eq!(script_of('×'), None);
    }

    #[test]
    fn test_majority_vote() {
        assert_eq!(resolve_script_for_text("Привет мир ok", Script::Latin), Script::Cyrillic);
        assert_eq!(resolve_script_for_text("日本語のテキスト", Script::Latin), Script::Cjk);
        assert_eq!(resolve_script_for_text("hello", Script::Greek), Script::Latin);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(resolve_script_for_text("", Script::Latin), Script::Latin);
        assert_eq!(resolve_script_for_text("12345 !?", Script::Greek), Script::Greek);
        // one latin, one cyrillic letter: tie
        assert_eq!(resolve_script_for_text("aж", Script::Hebrew), Script::Hebrew);
        // unlisted script wins: fallback
        assert_eq!(resolve_script_for_text("ภาษาไทย", Script::Latin), Script::Latin);
    }

    #[test]
    fn test_spaceless_excludes_hangul() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('の'));
        assert!(is_spaceless_script_char('。'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
