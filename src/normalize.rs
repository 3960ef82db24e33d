// src/normalize.rs
//! Tweet text normalization: strip URLs, mentions and hashtags, drop
//! everything that is not an ASCII letter or whitespace, then lowercase.
//!
//! Order matters: URLs go first, otherwise their path segments would survive
//! the character-class strip as alphabetic noise. The result matches
//! `^[a-z\s]*$`; an input that cleans down to the empty string is valid
//! output, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// `http…`/`www…` tokens, removed whole.
static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("url regex"));

/// `@mention` and `#hashtag` tokens, removed whole. A bare `#` marker left
/// behind by other stripping falls to `RE_NON_ALPHA`.
static RE_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+|#\w+").expect("handle regex"));

/// Anything outside ASCII letters and whitespace (digits, punctuation,
/// emoji, non-Latin scripts).
static RE_NON_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z\s]").expect("non-alpha regex"));

/// Clean a single text. Idempotent: already-clean text is a fixed point.
pub fn clean_text(raw: &str) -> String {
    let text = RE_URL.replace_all(raw, "");
    let text = RE_HANDLE.replace_all(&text, "");
    let text = RE_NON_ALPHA.replace_all(&text, "");
    text.to_ascii_lowercase().trim().to_string()
}

/// Element-wise cleaning; same length and order as the input, no
/// cross-record state.
pub fn clean_all<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts.iter().map(|t| clean_text(t.as_ref())).collect()
}
