// src/sentiment/scorer.rs
//! Default lexicon-based polarity engine.
//!
//! Per-token valences are adjusted by context (negation within a three-token
//! window, degree modifiers with distance damping, ALL-CAPS emphasis when
//! the text mixes case), then punctuation emphasis is applied to the summed
//! signal. The compound score is the saturating transform
//! `x / sqrt(x^2 + ALPHA)` clamped to [-1, 1]; the pos/neu/neg fractions are
//! normalized so they always sum to 1.

use super::lexicon::{booster_scalar, is_negator, valence};
use super::{PolarityScorer, SentimentScore};

/// Saturation constant for compound normalization.
pub const COMPOUND_ALPHA: f64 = 15.0;
/// Sign-flip-and-dampen factor applied once when a negator precedes a word.
pub const NEGATION_SCALAR: f64 = -0.74;
/// Magnitude of a degree modifier at distance one.
pub const BOOSTER_INCR: f64 = 0.293;
/// Extra magnitude for an ALL-CAPS lexicon word in mixed-case text.
pub const CAPS_INCR: f64 = 0.733;
/// How far back context words can reach, in tokens.
pub const CONTEXT_WINDOW: usize = 3;
/// Per-`!` emphasis, counted up to four marks.
const EXCLAIM_INCR: f64 = 0.292;
/// Per-`?` emphasis for two or three marks; capped beyond that.
const QUESTION_INCR: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Degree-modifier damping by distance (1, 2, 3 tokens back).
const BOOSTER_DAMPING: [f64; CONTEXT_WINDOW] = [1.0, 0.95, 0.9];

#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize_raw(text);
        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let cap_diff = has_mixed_case(&tokens);
        let mut sentiments = Vec::with_capacity(tokens.len());

        for (i, tok) in tokens.iter().enumerate() {
            let lower = tok.to_lowercase();

            // Context words modify neighbors; they carry no valence of
            // their own.
            if booster_scalar(&lower).is_some() || is_negator(&lower) {
                sentiments.push(0.0);
                continue;
            }
            let Some(base) = valence(&lower) else {
                sentiments.push(0.0);
                continue;
            };

            let mut v = base;
            if cap_diff && is_all_caps(tok) {
                v += CAPS_INCR.copysign(v);
            }

            let mut negated = false;
            for dist in 1..=CONTEXT_WINDOW {
                if dist > i {
                    break;
                }
                let prev = tokens[i - dist].to_lowercase();
                if let Some(b) = booster_scalar(&prev) {
                    let mut s = b * BOOSTER_DAMPING[dist - 1];
                    if v < 0.0 {
                        s = -s;
                    }
                    v += s;
                } else if is_negator(&prev) {
                    negated = true;
                }
            }
            if negated {
                v *= NEGATION_SCALAR;
            }

            sentiments.push(v);
        }

        let punct = punctuation_emphasis(text);
        score_from_sentiments(&sentiments, punct)
    }
}

/// Whitespace tokenization keeping case, with edge punctuation trimmed so
/// `good!!!` and `good` hit the same lexicon entry.
fn tokenize_raw(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(|c| c.is_alphabetic()) && !word.chars().any(|c| c.is_lowercase())
}

/// Caps emphasis only applies when the text mixes shouted and normal words;
/// a fully upper-case text carries no differential signal.
fn has_mixed_case(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Emphasis contributed by `!` and `?` in the raw text. Pipeline input has
/// punctuation stripped already, so this only fires on the raw-text
/// contract.
fn punctuation_emphasis(text: &str) -> f64 {
    let bangs = text.chars().filter(|&c| c == '!').count().min(4);
    let ep = bangs as f64 * EXCLAIM_INCR;

    let qmarks = text.chars().filter(|&c| c == '?').count();
    let qp = match qmarks {
        0 | 1 => 0.0,
        2..=3 => qmarks as f64 * QUESTION_INCR,
        _ => QUESTION_CAP,
    };
    ep + qp
}

fn score_from_sentiments(sentiments: &[f64], punct: f64) -> SentimentScore {
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += punct;
    } else if sum < 0.0 {
        sum -= punct;
    }
    let compound = (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &v in sentiments {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    // Punctuation emphasis goes to whichever pole dominates.
    if pos_sum > neg_sum.abs() {
        pos_sum += punct;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total <= f64::EPSILON {
        return SentimentScore::neutral();
    }
    SentimentScore {
        pos: pos_sum / total,
        neu: neu_count / total,
        neg: neg_sum.abs() / total,
        compound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> SentimentScore {
        LexiconScorer::new().score(text)
    }

    #[test]
    fn empty_text_is_exactly_neutral() {
        let s = score("");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neu, 1.0);
        assert_eq!(s.pos, 0.0);
        assert_eq!(s.neg, 0.0);
    }

    #[test]
    fn fractions_sum_to_one_for_any_input() {
        let samples = [
            "",
            "i love sunny days",
            "i hate this",
            "completely neutral words here",
            "not good at all",
            "GREAT day but terrible night!!!",
            "???",
        ];
        for t in samples {
            let s = score(t);
            let sum = s.pos + s.neu + s.neg;
            assert!((sum - 1.0).abs() < 1e-6, "sum {sum} for {t:?}");
            assert!((-1.0..=1.0).contains(&s.compound));
        }
    }

    #[test]
    fn sign_matches_dominant_valence() {
        assert!(score("i love sunny days").compound > 0.05);
        assert!(score("i hate this").compound < -0.05);
        assert_eq!(score("the cat sat on the mat").compound, 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = score("this is good");
        let negated = score("this is not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
        // dampened flip, not a mirror image
        assert!(negated.compound.abs() < plain.compound.abs());
    }

    #[test]
    fn negation_reaches_across_the_window() {
        assert!(score("not so very good").compound < 0.0);
        // beyond three tokens the negator no longer applies
        assert!(score("not that it would ever matter good").compound > 0.0);
    }

    #[test]
    fn boosters_amplify_and_dampeners_soften() {
        let base = score("good").compound;
        assert!(score("very good").compound > base);
        assert!(score("slightly good").compound < base);

        let neg = score("bad").compound;
        assert!(score("very bad").compound < neg);
    }

    #[test]
    fn caps_emphasis_requires_mixed_case() {
        let mixed = score("GREAT day");
        let plain = score("great day");
        assert!(mixed.compound > plain.compound);

        // all-caps text has no differential, so no boost
        let shouted = score("GREAT DAY");
        assert!((shouted.compound - plain.compound).abs() < 1e-9);
    }

    #[test]
    fn exclamation_emphasis_is_capped() {
        let plain = score("good").compound;
        let three = score("good!!!").compound;
        let many = score("good!!!!!!!!").compound;
        assert!(three > plain);
        // four marks count, the rest are ignored
        assert!((many - score("good!!!!").compound).abs() < 1e-9);
    }

    #[test]
    fn punctuation_alone_stays_neutral() {
        // no valenced token, so emphasis has nothing to amplify
        let s = score("what is this ???");
        assert_eq!(s.compound, 0.0);
    }
}
