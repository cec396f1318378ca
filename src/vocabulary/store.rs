//! Vocabulary store interface.

use crate::error::Result;

/// Identifier of a vocabulary word.
pub type WordId = u64;

/// Words whose unweighted edit distance at insertion time is strictly below
/// this threshold are linked in the similarity graph.
pub const GRAPH_THRESHOLD: usize = 4;

/// Relative frequency assigned to a newly learned word.
pub const INITIAL_FREQUENCY: f64 = 0.01;

/// Lookup, frequency, range, and adjacency queries over a persisted word
/// list and its similarity graph, plus new-word and frequency-bump writes.
///
/// The similarity graph is a locality index, not ground truth: an edge means
/// the unweighted edit distance of the two words was below
/// [`GRAPH_THRESHOLD`] when the younger one was inserted, nothing more.
pub trait VocabularyStore: Send + Sync + std::fmt::Debug {
    /// Check whether a word is present.
    fn has(&self, word: &str) -> Result<bool>;

    /// Ids of all words whose character length lies in `[min, max]`.
    fn ids_by_length_range(&self, min: usize, max: usize) -> Result<Vec<WordId>>;

    /// Ids of all words whose character length lies in `[min, max]` and
    /// whose first character is `prefix`.
    fn ids_by_length_and_prefix(&self, min: usize, max: usize, prefix: char)
    -> Result<Vec<WordId>>;

    /// Text of the word with the given id.
    fn word_of(&self, id: WordId) -> Result<String>;

    /// Relative frequency of the word with the given id, in `[0, 1]`.
    fn frequency_of(&self, id: WordId) -> Result<f64>;

    /// Similarity-graph neighbors of the given id.
    fn neighbors_of(&self, id: WordId) -> Result<Vec<WordId>>;

    /// Insert a word and link it into the similarity graph, comparing it
    /// against the full vocabulary (cheap reads are bought with O(n)
    /// writes). `initial_frequency` is relative to the current total count.
    /// Returns the existing id unchanged if the word is already present.
    fn insert(&self, word: &str, initial_frequency: f64) -> Result<WordId>;

    /// Add `delta` to a word's raw count. The word must already be present.
    fn bump_frequency(&self, word: &str, delta: f64) -> Result<()>;
}
