//! Spanish + English function words excluded from keyword frequency.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Process-wide stopword set, built on first use and never mutated.
pub static STOPWORDS: Lazy<StopwordSet> = Lazy::new(StopwordSet::default);

static SPANISH: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "como", "con", "contra",
    "cual", "cuando", "de", "del", "desde", "donde", "durante", "e", "el", "ella",
    "ellas", "ellos", "en", "entre", "era", "erais", "eran", "eras", "eres", "es",
    "esa", "esas", "ese", "eso", "esos", "esta", "estaba", "estado", "estamos",
    "estan", "están", "estar", "estas", "este", "esto", "estos", "estoy", "fue",
    "fueron", "fui", "fuimos", "ha", "había", "habían", "han", "has", "hasta", "hay",
    "he", "la", "las", "le", "les", "lo", "los", "mas", "más", "me", "mi", "mis",
    "mucho", "muchos", "muy", "nada", "ni", "no", "nos", "nosotros", "nuestra",
    "nuestro", "o", "os", "otra", "otros", "para", "pero", "poco", "por", "porque",
    "que", "qué", "quien", "se", "sea", "ser", "si", "sí", "sido", "sin", "sobre",
    "sois", "somos", "son", "soy", "su", "sus", "también", "tanto", "te", "tenemos",
    "tener", "tengo", "ti", "tiene", "tienen", "todo", "todos", "tu", "tus", "tú",
    "un", "una", "uno", "unos", "vosotros", "y", "ya", "yo",
];

static ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
    "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Immutable set of lowercase stopwords with case-insensitive lookup.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new(SPANISH.iter().chain(ENGLISH.iter()))
    }
}
