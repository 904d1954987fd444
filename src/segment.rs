//! Sentence segmentation and original/translated pairing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static TERMINATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("terminator regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SentencePair {
    #[schema(example = "El clima es terrible")]
    pub original: String,
    #[schema(example = "The weather is terrible")]
    pub translated: String,
}

/// Splits on runs of `.`, `!` and `?`, trimming each fragment and dropping
/// the empty ones. Terminators are not kept.
pub fn segment(text: &str) -> Vec<String> {
    TERMINATORS_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pairs sentences by position. When translation merged or split sentences
/// the lists differ in length; everything past the shorter one is dropped.
pub fn pair_sentences(original: &[String], translated: &[String]) -> Vec<SentencePair> {
    original
        .iter()
        .zip(translated.iter())
        .map(|(o, t)| SentencePair {
            original: o.clone(),
            translated: t.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_of_terminators_are_one_boundary() {
        let sentences = segment("Hola!!! ¿Qué tal?? Bien... gracias.");
        assert_eq!(sentences, vec!["Hola", "¿Qué tal", "Bien", "gracias"]);
    }

    #[test]
    fn test_fragments_are_trimmed_and_empty_dropped() {
        assert_eq!(segment("  One.   Two  !  ?  "), vec!["One", "Two"]);
        assert!(segment("").is_empty());
        assert!(segment(" ... !? ").is_empty());
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        assert_eq!(segment("Hola mundo"), vec!["Hola mundo"]);
    }

    #[test]
    fn test_pairing_truncates_to_shorter_list() {
        let original = segment("Uno. Dos. Tres.");
        let translated = segment("One and two. Three.");
        let pairs = pair_sentences(&original, &translated);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].original, "Uno");
        assert_eq!(pairs[0].translated, "One and two");
        // misaligned: "Dos" is paired with "Three"
        assert_eq!(pairs[1].original, "Dos");
        assert_eq!(pairs[1].translated, "Three");

        let pairs = pair_sentences(&translated, &original);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_pairing_never_exceeds_min_len() {
        let a: Vec<String> = (0..7).map(|i| format!("a{i}")).collect();
        for n in 0..10 {
            let b: Vec<String> = (0..n).map(|i| format!("b{i}")).collect();
            assert_eq!(pair_sentences(&a, &b).len(), a.len().min(b.len()));
        }
    }
}
