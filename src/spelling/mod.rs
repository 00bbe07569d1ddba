//! Spell checking policy over a pluggable engine.
//!
//! The [`SpellEngine`] answers "is this word right" and "what should it be".
//! [`SpellChecker`] adds the policy on top: a custom dictionary that always
//! wins, tokens with non-letters are never flagged, and corrections keep
//! the case pattern of the original word.
//!
//! Offsets reported in [`Mistake`] are byte offsets into the checked text.

pub mod word_list;

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

pub use word_list::WordListSpellEngine;

lazy_static! {
    /// Word tokens: maximal runs of word characters
    static ref WORD_RE: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// A natural-language spelling engine.
pub trait SpellEngine {
    /// Whether `word` is spelled correctly.
    fn is_correct(&self, word: &str) -> bool;

    /// Best single correction, or `word` itself when there is none.
    fn correct(&self, word: &str) -> String;

    /// Up to `max` candidate corrections.
    fn suggest(&self, word: &str, max: usize) -> Vec<String> {
        let corrected = self.correct(word);
        if max > 0 && corrected.to_lowercase() != word.to_lowercase() {
            vec![corrected]
        } else {
            Vec::new()
        }
    }
}

/// One misspelled word in a checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mistake {
    /// The word as it appears in the text
    pub word: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Apply the case pattern of `original` to `corrected`.
fn match_case(original: &str, corrected: &str) -> String {
    let has_cased = original.chars().any(char::is_alphabetic);
    if has_cased && original.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase) {
        return corrected.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = corrected.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        };
    }
    corrected.to_string()
}

/// Spell checking with a custom dictionary override.
pub struct SpellChecker {
    engine: Box<dyn SpellEngine>,
    custom_dictionary: IndexSet<String>,
}

impl std::fmt::Debug for SpellChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellChecker")
            .field("custom_dictionary", &self.custom_dictionary)
            .finish_non_exhaustive()
    }
}

impl SpellChecker {
    /// Create a checker with an empty custom dictionary.
    pub fn new(engine: Box<dyn SpellEngine>) -> Self {
        Self {
            engine,
            custom_dictionary: IndexSet::new(),
        }
    }

    /// Create a checker whose custom dictionary holds `words`.
    pub fn with_dictionary<I, S>(engine: Box<dyn SpellEngine>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checker = Self::new(engine);
        for word in words {
            checker.add_to_dictionary(word.as_ref());
        }
        checker
    }

    fn in_dictionary(&self, word: &str) -> bool {
        self.custom_dictionary.contains(&word.to_lowercase())
    }

    /// Whether a single word is acceptable.
    pub fn check_word(&self, word: &str) -> bool {
        if self.in_dictionary(word) || !is_alphabetic_word(word) {
            return true;
        }
        self.engine.is_correct(word)
    }

    /// Corrected form of a word, case preserved.
    pub fn correct_word(&self, word: &str) -> String {
        if self.check_word(word) {
            return word.to_string();
        }
        match_case(word, &self.engine.correct(word))
    }

    /// All misspelled words in `text`, in order.
    pub fn check_text(&self, text: &str) -> Vec<Mistake> {
        WORD_RE
            .find_iter(text)
            .filter(|m| !self.check_word(m.as_str()))
            .map(|m| Mistake {
                word: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    /// `text` with every misspelled word corrected; everything between
    /// words is kept as is.
    pub fn correct_text(&self, text: &str) -> String {
        WORD_RE
            .replace_all(text, |caps: &Captures| self.correct_word(&caps[0]))
            .into_owned()
    }

    /// Up to `max` corrections for a misspelled word.
    ///
    /// Words the checker accepts have no suggestions.
    pub fn get_suggestions(&self, word: &str, max: usize) -> Vec<String> {
        if self.check_word(word) {
            return Vec::new();
        }
        let lower = word.to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();
        for candidate in self.engine.suggest(word, max) {
            let candidate = match_case(word, &candidate);
            if candidate.to_lowercase() != lower && !suggestions.contains(&candidate) {
                suggestions.push(candidate);
            }
        }
        suggestions.truncate(max);
        suggestions
    }

    /// Accept `word` (any case) from now on.
    pub fn add_to_dictionary(&mut self, word: &str) {
        self.custom_dictionary.insert(word.to_lowercase());
    }

    /// Stop accepting `word` unconditionally.
    pub fn remove_from_dictionary(&mut self, word: &str) {
        self.custom_dictionary.shift_remove(&word.to_lowercase());
    }

    /// Custom dictionary words, lowercase, in insertion order.
    pub fn dictionary(&self) -> impl Iterator<Item = &str> {
        self.custom_dictionary.iter().map(String::as_str)
    }
}

/// Correct `text` with a fresh checker in one call.
pub fn correct_spelling_in_text(engine: Box<dyn SpellEngine>, text: &str, custom_dictionary: &[&str]) -> String {
    SpellChecker::with_dictionary(engine, custom_dictionary.iter().copied()).correct_text(text)
}
