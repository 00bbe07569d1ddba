//! Fixed-vocabulary spelling engine.
//!
//! Words outside the vocabulary are corrected from an explicit table first,
//! then to the closest known word within two edits.

use super::SpellEngine;
use indexmap::{IndexMap, IndexSet};

const MAX_EDIT_DISTANCE: usize = 2;

/// Spelling engine over a known word list.
#[derive(Debug, Clone, Default)]
pub struct WordListSpellEngine {
    words: IndexSet<String>,
    corrections: IndexMap<String, String>,
}

impl WordListSpellEngine {
    /// Create an engine that knows `words` (case-insensitive).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            corrections: IndexMap::new(),
        }
    }

    /// Add a known word.
    pub fn with_word(mut self, word: &str) -> Self {
        self.words.insert(word.to_lowercase());
        self
    }

    /// Map a misspelling to its correction. The correction becomes a known word.
    pub fn with_correction(mut self, misspelled: &str, correction: &str) -> Self {
        self.words.insert(correction.to_lowercase());
        self.corrections
            .insert(misspelled.to_lowercase(), correction.to_lowercase());
        self
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word is known.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Known words within [`MAX_EDIT_DISTANCE`], nearest first, then alphabetical.
    fn nearby(&self, lower: &str) -> Vec<(usize, &str)> {
        let mut candidates: Vec<(usize, &str)> = self
            .words
            .iter()
            .map(|w| (strsim::levenshtein(lower, w), w.as_str()))
            .filter(|(d, _)| *d <= MAX_EDIT_DISTANCE)
            .collect();
        candidates.sort();
        candidates
    }
}

impl SpellEngine for WordListSpellEngine {
    fn is_correct(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn correct(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if self.words.contains(&lower) {
            return word.to_string();
        }
        if let Some(fixed) = self.corrections.get(&lower) {
            return fixed.clone();
        }
        self.nearby(&lower)
            .first()
            .map(|(_, w)| w.to_string())
            .unwrap_or_else(|| word.to_string())
    }

    fn suggest(&self, word: &str, max: usize) -> Vec<String> {
        let lower = word.to_lowercase();
        let mut out: Vec<String> = Vec::new();
        if let Some(fixed) = self.corrections.get(&lower) {
            out.push(fixed.clone());
        }
        for (_, candidate) in self.nearby(&lower) {
            if candidate != lower && !out.iter().any(|o| o == candidate) {
                out.push(candidate.to_string());
            }
        }
        out.truncate(max);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_counts_chars() {
        let engine = WordListSpellEngine::new(["héllo"]);
        assert_eq!(engine.correct("hello"), "héllo");
        assert_eq!(engine.nearby("hxllx"), vec![(2, "héllo")]);
        assert!(engine.nearby("hexxxx").is_empty());
    }

    #[test]
    fn test_known_words_case_insensitive() {
        let engine = WordListSpellEngine::new(["Hello"]).with_word("World");
        assert!(engine.is_correct("hello"));
        assert!(engine.is_correct("WORLD"));
        assert!(!engine.is_correct("helo"));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_correction_table_wins() {
        let engine = WordListSpellEngine::new(["form", "from"]).with_correction("fomr", "from");
        assert_eq!(engine.correct("fomr"), "from");
        assert_eq!(engine.suggest("fomr", 5), vec!["from".to_string(), "form".to_string()]);
    }

    #[test]
    fn test_nearest_word_and_identity() {
        let engine = WordListSpellEngine::new(["receive", "recipe"]);
        assert_eq!(engine.correct("recieve"), "receive");
        assert_eq!(engine.correct("zzz"), "zzz");
        assert!(engine.suggest("zzz", 3).is_empty());
    }
}
