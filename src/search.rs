//! Graph-guided candidate search over the vocabulary.
//!
//! Correction starts from seed words that share the query's first character
//! and roughly its length, then walks the similarity graph outward from
//! every seed that lies within the lookup threshold. Words beyond the
//! threshold are dead ends but stay marked as visited, so each word is
//! evaluated at most once per query.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceEngine;
use crate::error::{CorrigoError, Result};
use crate::vocabulary::{VocabularyStore, WordId};

/// Default weighted-distance ceiling for accepting a candidate.
pub const LOOKUP_THRESHOLD: f64 = 3.0;

/// Default slack applied to the query length when selecting seeds.
pub const LENGTH_TOLERANCE: usize = 2;

/// Configuration for the candidate search.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Candidates farther than this (weighted) are rejected.
    pub lookup_threshold: f64,
    /// Seeds are drawn from words within this length difference.
    pub length_tolerance: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            lookup_threshold: LOOKUP_THRESHOLD,
            length_tolerance: LENGTH_TOLERANCE,
        }
    }
}

/// A scored correction candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// The suggested word.
    pub word: String,
    /// Weighted edit distance from the query.
    pub distance: f64,
    /// Ranking score (higher is better).
    pub score: f64,
}

/// Finds the best correction for a query.
#[derive(Debug)]
pub struct CandidateSearch {
    engine: DistanceEngine,
    store: Arc<dyn VocabularyStore>,
    config: SearchConfig,
}

impl CandidateSearch {
    /// Create a search over the given store with default configuration.
    pub fn new(store: Arc<dyn VocabularyStore>) -> Self {
        CandidateSearch::with_config(store, SearchConfig::default())
    }

    /// Create a search with custom configuration.
    pub fn with_config(store: Arc<dyn VocabularyStore>, config: SearchConfig) -> Self {
        CandidateSearch {
            engine: DistanceEngine::new(),
            store,
            config,
        }
    }

    /// The distance engine backing this search.
    pub fn engine(&self) -> &DistanceEngine {
        &self.engine
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find the highest-scoring correction for `query`, if any word lies
    /// within the lookup threshold.
    pub fn best_correction(&self, query: &str) -> Result<Option<Correction>> {
        let query = query.to_lowercase();
        let first = query
            .chars()
            .next()
            .ok_or_else(|| CorrigoError::invalid_input("empty query"))?;
        self.engine.matrix().validate(&query)?;
        let query_len = query.chars().count();

        let mut seeds = self.store.ids_by_length_and_prefix(
            query_len.saturating_sub(self.config.length_tolerance),
            query_len + self.config.length_tolerance,
            first,
        )?;
        seeds.shuffle(&mut rand::rng());
        debug!("correcting {query:?}: {} seeds", seeds.len());

        let mut visited: AHashSet<WordId> = AHashSet::new();
        let mut candidates: AHashMap<WordId, f64> = AHashMap::new();
        let mut stack: Vec<WordId> = Vec::new();

        for seed in seeds {
            if visited.contains(&seed) {
                continue;
            }
            stack.push(seed);

            while let Some(id) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }

                let word = self.store.word_of(id)?;
                let distance = match self.engine.distance_within(
                    &query,
                    &word,
                    self.config.lookup_threshold,
                )? {
                    Some(distance) => distance,
                    // Too far: a dead end, not expanded further.
                    None => continue,
                };
                candidates.insert(id, distance);

                for neighbor in self.store.neighbors_of(id)? {
                    if !visited.contains(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }

        let mut best: Option<Correction> = None;
        for (&id, &distance) in &candidates {
            let word = self.store.word_of(id)?;
            let score = self.score(query_len, first, &word, distance, id)?;
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(Correction {
                    word,
                    distance,
                    score,
                });
            }
        }
        debug!(
            "correcting {query:?}: {} candidates, best {:?}",
            candidates.len(),
            best.as_ref().map(|b| b.word.as_str())
        );
        Ok(best)
    }

    /// Rank a candidate: distance plus length and first-character penalties,
    /// scaled by the word's relative frequency.
    fn score(
        &self,
        query_len: usize,
        first: char,
        word: &str,
        distance: f64,
        id: WordId,
    ) -> Result<f64> {
        let word_len = word.chars().count();
        let length_penalty = (query_len as f64 - word_len as f64).abs() / 2.0;
        let first_penalty = if word.chars().next() == Some(first) {
            0.0
        } else {
            1.0
        };
        let frequency = self.store.frequency_of(id)?;
        Ok((distance + length_penalty + first_penalty) * frequency)
    }
}
