//! Named predicates behind the boundary rules.
//!
//! Each predicate looks at the text on both sides of a boundary. Their exact
//! edges are load-bearing: the classifiers apply them in a fixed order and
//! the first match wins.

use std::sync::OnceLock;

use regex::Regex;

/// Characters that attach to the preceding word.
pub const CLOSING_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?', ')'];

/// Separators after which a small gap already means a new word.
pub const SEPARATORS: &[char] = &[':', ';', ','];

/// Characters that keep a URL or path going across a boundary.
const URL_CONTINUATION: &[char] = &['/', '.', ':', '-', '_', '=', '?', '&', '#', '%', '@', '~', '+'];

fn url_start_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:https?://|ftp://|www\.)").unwrap())
}

fn domain_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*(?:\.[A-Za-z0-9-]+)*\.$").unwrap())
}

fn short_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:com|org|net|edu|gov|mil|int|io|ai|co|us|uk|de|fr|jp|kr|cn|ru|eu|info|biz|app|dev|html?|php|aspx?|jsp|pdf|docx?|xlsx?|pptx?|png|jpe?g|gif|svg|txt|csv|json|xml|zip|rs|py|js|ts)(?:[/.:?#)]|$)",
        )
        .unwrap()
    })
}

fn extension_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.[A-Za-z0-9]{1,4}(?:[/.:?#)]|$)").unwrap())
}

/// Last whitespace-separated token of `text`.
pub fn last_token(text: &str) -> &str {
    text.split_whitespace().next_back().unwrap_or("")
}

/// First whitespace-separated token of `text`.
pub fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

/// Trailing run of alphabetic characters of `text`.
pub fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[start..]
}

/// Leading run of alphabetic characters of `text`.
pub fn leading_word(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}

fn last_char(text: &str) -> Option<char> {
    text.chars().next_back()
}

fn first_char(text: &str) -> Option<char> {
    text.chars().next()
}

/// "12:" followed by "30": the two halves of a clock time.
pub fn is_time_split(prev: &str, next: &str) -> bool {
    let mut tail = prev.chars().rev();
    let colon = tail.next() == Some(':');
    let digit = tail.next().map(|c| c.is_ascii_digit()).unwrap_or(false);
    colon && digit && first_char(next).map(|c| c.is_ascii_digit()).unwrap_or(false)
}

/// Whether the boundary sits inside a URL, path, domain or e-mail address.
pub fn is_url_context(prev: &str, next: &str) -> bool {
    let (Some(prev_last), Some(next_first)) = (last_char(prev), first_char(next)) else {
        return false;
    };
    if prev_last.is_whitespace() || next_first.is_whitespace() {
        return false;
    }
    let prev_token = last_token(prev);
    let next_token = first_token(next);

    // Inside an explicit URL
    if url_start_regex().is_match(prev_token) {
        let prev_open = URL_CONTINUATION.contains(&prev_last);
        let next_continues = next_token.contains(|c: char| URL_CONTINUATION.contains(&c));
        if prev_open || next_continues {
            return true;
        }
    }

    // Paths: "src/" + "main.rs", "and" + "/or"
    if (prev_last == '/' && next_first.is_alphanumeric())
        || (next_first == '/' && prev_last.is_alphanumeric())
    {
        return true;
    }

    // E-mail addresses
    if (prev_last == '@' && next_first.is_alphanumeric())
        || (next_first == '@' && prev_last.is_alphanumeric())
    {
        return true;
    }

    // Domains: "example." + "com"
    if domain_prefix_regex().is_match(prev_token) && short_suffix_regex().is_match(next_token) {
        return true;
    }

    // Extensions: "report" + ".pdf"
    prev_last.is_alphanumeric() && extension_regex().is_match(next_token)
}

/// Next text opens with punctuation that attaches to the previous word.
pub fn starts_with_closing_punct(next: &str) -> bool {
    first_char(next)
        .map(|c| CLOSING_PUNCTUATION.contains(&c))
        .unwrap_or(false)
}

/// Both sides are a single letter.
pub fn is_single_letter_pair(prev: &str, next: &str) -> bool {
    fn single_letter(s: &str) -> bool {
        let mut chars = s.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    }
    single_letter(prev) && single_letter(next)
}

/// lowercase letter followed by an Uppercase letter.
pub fn is_lower_upper_split(prev: &str, next: &str) -> bool {
    match (last_char(prev), first_char(next)) {
        (Some(a), Some(b)) => a.is_lowercase() && b.is_uppercase(),
        _ => false,
    }
}

/// Combined length of two adjacent ALL-CAPS words, if the boundary joins two.
pub fn all_caps_pair_len(prev: &str, next: &str) -> Option<usize> {
    let left = trailing_word(prev);
    let right = leading_word(next);
    let is_caps = |w: &str| w.chars().count() >= 2 && w.chars().all(|c| c.is_uppercase());
    if is_caps(left) && is_caps(right) {
        Some(left.chars().count() + right.chars().count())
    } else {
        None
    }
}

/// Digit followed by a letter, or a letter followed by a digit.
pub fn is_digit_alpha_transition(prev: &str, next: &str) -> bool {
    match (last_char(prev), first_char(next)) {
        (Some(a), Some(b)) => {
            (a.is_numeric() && b.is_alphabetic()) || (a.is_alphabetic() && b.is_numeric())
        }
        _ => false,
    }
}

/// Digit on both sides of the boundary.
pub fn is_digit_pair(prev: &str, next: &str) -> bool {
    match (last_char(prev), first_char(next)) {
        (Some(a), Some(b)) => a.is_numeric() && b.is_numeric(),
        _ => false,
    }
}

/// A `:;,` separator followed by a letter or digit.
pub fn is_separator_then_alnum(prev: &str, next: &str) -> bool {
    match (last_char(prev), first_char(next)) {
        (Some(a), Some(b)) => SEPARATORS.contains(&a) && b.is_alphanumeric(),
        _ => false,
    }
}

/// Word-shaped token: at least two characters, letters with inner apostrophes or hyphens.
pub fn is_alpha_token(text: &str) -> bool {
    let count = text.chars().count();
    count >= 2
        && first_char(text).map(|c| c.is_alphabetic()).unwrap_or(false)
        && last_char(text).map(|c| c.is_alphabetic()).unwrap_or(false)
        && text
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '\u{2019}' | '-'))
}

/// Multi-character alphabetic tokens on both sides.
pub fn is_multi_char_alpha_pair(prev: &str, next: &str) -> bool {
    is_alpha_token(prev) && is_alpha_token(next)
}

/// Letters on both sides of the boundary.
pub fn is_letter_boundary(prev: &str, next: &str) -> bool {
    match (last_char(prev), first_char(next)) {
        (Some(a), Some(b)) => a.is_alphabetic() && b.is_alphabetic(),
        _ => false,
    }
}
