// src/sentiment/lexicon.rs
//! Valence lexicon and contextual word classes for `LexiconScorer`.
//!
//! The lexicon ships inside the binary; word valences are graded magnitudes
//! roughly in [-4, 4]. Negators and degree modifiers are not valenced
//! themselves — they only adjust neighboring lexicon words.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Lexicon valence for a lowercase word, if any.
#[inline]
pub fn valence(word: &str) -> Option<f64> {
    LEXICON.get(word).copied()
}

/// Degree-modifier scalar: positive for intensifiers, negative for
/// dampeners. `None` for non-modifier words.
pub fn booster_scalar(word: &str) -> Option<f64> {
    const INCR: f64 = super::scorer::BOOSTER_INCR;
    match word {
        "absolutely" | "completely" | "deeply" | "enormously" | "entirely" | "especially"
        | "extremely" | "highly" | "hugely" | "incredibly" | "particularly" | "really"
        | "remarkably" | "so" | "totally" | "tremendously" | "truly" | "unbelievably"
        | "utterly" | "very" => Some(INCR),
        "almost" | "barely" | "hardly" | "kinda" | "less" | "little" | "marginally"
        | "occasionally" | "partly" | "scarcely" | "slightly" | "somewhat" | "sorta" => {
            Some(-INCR)
        }
        _ => None,
    }
}

/// Negation cues. Contraction forms are listed without the apostrophe
/// because the normalizer has stripped punctuation by the time the scorer
/// sees pipeline text; raw-text callers get the apostrophe forms too.
pub fn is_negator(word: &str) -> bool {
    matches!(
        word,
        "not"
            | "no"
            | "never"
            | "none"
            | "nothing"
            | "neither"
            | "nor"
            | "cannot"
            | "cant"
            | "can't"
            | "dont"
            | "don't"
            | "doesnt"
            | "doesn't"
            | "didnt"
            | "didn't"
            | "isnt"
            | "isn't"
            | "wasnt"
            | "wasn't"
            | "arent"
            | "aren't"
            | "wont"
            | "won't"
            | "wouldnt"
            | "wouldn't"
            | "shouldnt"
            | "shouldn't"
            | "couldnt"
            | "couldn't"
            | "aint"
            | "ain't"
            | "without"
            | "rarely"
            | "seldom"
    )
}
