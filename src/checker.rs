//! High-level spell checking facade.
//!
//! Ties the candidate search and the vocabulary store together behind the
//! operations the server and CLI speak: membership checks, correction,
//! and vocabulary updates.

use std::sync::Arc;

use crate::error::Result;
use crate::search::{CandidateSearch, Correction, SearchConfig};
use crate::vocabulary::{INITIAL_FREQUENCY, VocabularyStore, WordId};

/// Outcome of processing a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The word is present in the vocabulary.
    Ok,
    /// The word is absent; carries the best correction, if one was found.
    Wrong(Option<String>),
}

/// Spell checker over a shared vocabulary store.
#[derive(Debug)]
pub struct SpellChecker {
    store: Arc<dyn VocabularyStore>,
    search: CandidateSearch,
}

impl SpellChecker {
    /// Create a checker with default search configuration.
    pub fn new(store: Arc<dyn VocabularyStore>) -> Self {
        SpellChecker::with_config(store, SearchConfig::default())
    }

    /// Create a checker with custom search configuration.
    pub fn with_config(store: Arc<dyn VocabularyStore>, config: SearchConfig) -> Self {
        let search = CandidateSearch::with_config(store.clone(), config);
        SpellChecker { store, search }
    }

    /// The underlying vocabulary store.
    pub fn store(&self) -> &Arc<dyn VocabularyStore> {
        &self.store
    }

    /// Whether the word is present in the vocabulary.
    pub fn check(&self, word: &str) -> Result<bool> {
        self.store.has(word)
    }

    /// The best correction for a misspelled word, if any candidate lies
    /// within the lookup threshold.
    pub fn correct(&self, word: &str) -> Result<Option<Correction>> {
        self.search.best_correction(word)
    }

    /// Check the word, falling back to correction when it is absent.
    pub fn process(&self, word: &str) -> Result<Verdict> {
        if self.check(word)? {
            return Ok(Verdict::Ok);
        }
        let correction = self.correct(word)?;
        Ok(Verdict::Wrong(correction.map(|c| c.word)))
    }

    /// Add a new word at the initial relative frequency. Adding a word
    /// that already exists returns its existing id.
    pub fn add(&self, word: &str) -> Result<WordId> {
        let normalized = word.to_lowercase();
        self.search.engine().matrix().validate(&normalized)?;
        self.store.insert(&normalized, INITIAL_FREQUENCY)
    }

    /// Increase the raw count of an existing word by one.
    pub fn bump(&self, word: &str) -> Result<()> {
        self.store.bump_frequency(word, 1.0)
    }

    /// Add the word if it is new, otherwise bump its count.
    pub fn update(&self, word: &str) -> Result<()> {
        if self.check(word)? {
            self.bump(word)
        } else {
            self.add(word).map(|_| ())
        }
    }
}
