//! Keyword frequency and prefix substring counts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::stopwords::{StopwordSet, STOPWORDS};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex is valid"));

/// Words of this many characters or fewer never count as keywords.
pub const MIN_WORD_CHARS: usize = 2;

/// Prefixes counted by `count_prefixes`, in display order.
pub const PREFIXES: &[&str] = &[
    "a", "an", "ante", "anti", "con", "contra", "de", "des", "dis", "en", "ex", "in",
    "im", "inter", "pre", "pro", "re", "sub", "super", "trans", "un",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WordCount {
    #[schema(example = "weather")]
    pub word: String,
    #[schema(example = 3)]
    pub count: usize,
}

/// Word counts ordered by descending count. Equal counts keep the order in
/// which the words first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyTable {
    entries: Vec<WordCount>,
}

impl WordFrequencyTable {
    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.word == word).map(|e| e.count)
    }

    /// The `n` most frequent words (what the bar chart shows).
    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Sum of all counts, equal to the number of filtered tokens.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of `count_words`: the ranked table plus the filtered token stream
/// it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    pub table: WordFrequencyTable,
    pub filtered_words: Vec<String>,
}

/// Counts significant words using the process-wide stopword set.
pub fn count_words(text: &str) -> WordStats {
    count_words_with(text, &STOPWORDS)
}

pub fn count_words_with(text: &str, stopwords: &StopwordSet) -> WordStats {
    let lowered = text.to_lowercase();
    let filtered_words: Vec<String> = WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > MIN_WORD_CHARS && !stopwords.contains(w))
        .map(str::to_string)
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<WordCount> = Vec::new();
    for word in &filtered_words {
        match index.get(word.as_str()) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(word.as_str(), entries.len());
                entries.push(WordCount {
                    word: word.clone(),
                    count: 1,
                });
            }
        }
    }
    // sort_by is stable, so ties stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    WordStats {
        table: WordFrequencyTable { entries },
        filtered_words,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrefixCount {
    #[schema(example = "des")]
    pub prefix: String,
    pub count: usize,
}

/// Counts raw substring occurrences of each entry in `PREFIXES` in the
/// lowercased text. Matches anywhere inside words, not only at the start.
pub fn count_prefixes(text: &str) -> Vec<PrefixCount> {
    let lowered = text.to_lowercase();
    PREFIXES
        .iter()
        .map(|p| PrefixCount {
            prefix: p.to_string(),
            count: lowered.matches(p).count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen_order() {
        let stats = count_words("apple banana apple cherry banana date");
        let words: Vec<_> = stats.table.entries().iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(
            words,
            vec![("apple", 2), ("banana", 2), ("cherry", 1), ("date", 1)]
        );
    }

    #[test]
    fn test_higher_count_wins_over_first_seen() {
        let stats = count_words("river stone stone stone river cloud");
        let words: Vec<_> = stats.table.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["stone", "river", "cloud"]);
    }

    #[test]
    fn test_short_words_and_stopwords_are_excluded() {
        let stats = count_words("The weather is so nice, and I am ok with it. El clima es bueno para mí.");
        for entry in stats.table.entries() {
            assert!(entry.word.chars().count() > 2, "{} too short", entry.word);
            assert!(!STOPWORDS.contains(&entry.word), "{} is a stopword", entry.word);
        }
        assert_eq!(stats.table.get("weather"), Some(1));
        assert_eq!(stats.table.get("clima"), Some(1));
        assert_eq!(stats.table.get("the"), None);
        assert_eq!(stats.table.get("para"), None);
    }

    #[test]
    fn test_counts_sum_to_filtered_tokens() {
        let stats = count_words("Rust rust RUST crates, crates and cargo. Cargo builds crates!");
        assert_eq!(stats.table.total(), stats.filtered_words.len());
        assert_eq!(stats.table.get("rust"), Some(3));
        assert_eq!(stats.table.get("crates"), Some(3));
        assert_eq!(stats.table.get("cargo"), Some(2));
    }

    #[test]
    fn test_digits_and_underscores_are_word_chars() {
        let stats = count_words("snake_case 2024 42 x_y");
        assert_eq!(stats.filtered_words, vec!["snake_case", "2024", "x_y"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "día" is 4 bytes but 3 chars, "él" is 3 bytes but 2 chars
        let stats = count_words("día él");
        assert_eq!(stats.filtered_words, vec!["día"]);
    }

    #[test]
    fn test_empty_text_yields_empty_table() {
        let stats = count_words("");
        assert!(stats.table.is_empty());
        assert!(stats.filtered_words.is_empty());
        assert!(count_words("... !!! ??").table.is_empty());
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let text = "one two three alpha beta gamma alpha beta delta epsilon zeta gamma";
        assert_eq!(count_words(text), count_words(text));
    }

    #[test]
    fn test_top_is_bounded() {
        let stats = count_words("alpha beta gamma");
        assert_eq!(stats.table.top(10).len(), 3);
        assert_eq!(stats.table.top(1)[0].word, "alpha");
        assert!(stats.table.top(0).is_empty());
    }

    #[test]
    fn test_table_serializes_as_list() {
        let stats = count_words("lorem lorem ipsum");
        let json = serde_json::to_value(&stats.table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"word": "lorem", "count": 2}, {"word": "ipsum", "count": 1}])
        );
    }

    #[test]
    fn test_prefixes_are_raw_substrings() {
        let counts = count_prefixes("Deshacer y REHACER, una casa");
        let get = |p: &str| counts.iter().find(|c| c.prefix == p).unwrap().count;
        assert_eq!(get("des"), 1);
        assert_eq!(get("re"), 1);
        // "a" matches inside every word containing the letter
        assert_eq!(get("a"), 5);
        assert_eq!(get("un"), 1);
        assert_eq!(counts.len(), PREFIXES.len());
    }
}
