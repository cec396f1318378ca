//! In-memory vocabulary store.
//!
//! Words are held in insertion order (the index is the [`WordId`]) behind a
//! read-write lock, with a text index rebuilt on load rather than
//! persisted. Two on-disk forms are supported: a plain `word count` text
//! file whose load re-derives the similarity graph, and a bincode snapshot
//! that preserves the graph exactly.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::distance::edit_distance_within;
use crate::error::{CorrigoError, Result};
use crate::vocabulary::store::{GRAPH_THRESHOLD, VocabularyStore, WordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WordEntry {
    text: String,
    count: f64,
    neighbors: Vec<WordId>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<WordEntry>,
    by_text: AHashMap<String, WordId>,
    total_count: f64,
}

/// On-disk snapshot layout. The text index is derivable and not stored.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    entries: Vec<WordEntry>,
    total_count: f64,
}

impl Inner {
    /// Insert a word known to be absent, linking it against every stored
    /// word whose unweighted distance is strictly below the graph
    /// threshold.
    fn insert_with_count(&mut self, word: String, count: f64) -> WordId {
        let id = self.entries.len() as WordId;
        let neighbors: Vec<WordId> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                edit_distance_within(&entry.text, &word, GRAPH_THRESHOLD - 1).is_some()
            })
            .map(|(i, _)| i as WordId)
            .collect();

        for &neighbor in &neighbors {
            self.entries[neighbor as usize].neighbors.push(id);
        }

        self.by_text.insert(word.clone(), id);
        self.entries.push(WordEntry {
            text: word,
            count,
            neighbors,
        });
        self.total_count += count;
        id
    }

    fn add_count(&mut self, word: String, count: f64) {
        match self.by_text.get(&word) {
            Some(&id) => {
                self.entries[id as usize].count += count;
                self.total_count += count;
            }
            None => {
                self.insert_with_count(word, count);
            }
        }
    }
}

/// An in-memory [`VocabularyStore`].
#[derive(Debug, Default)]
pub struct MemoryVocabulary {
    inner: RwLock<Inner>,
}

impl MemoryVocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        MemoryVocabulary::default()
    }

    /// Build a vocabulary from `(word, raw count)` pairs.
    pub fn from_counts<I>(words: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let vocabulary = MemoryVocabulary::new();
        {
            let mut inner = vocabulary.inner.write();
            for (word, count) in words {
                inner.add_count(word.to_lowercase(), count);
            }
        }
        vocabulary
    }

    /// Load a `word count` text file, one entry per line.
    ///
    /// Malformed lines are skipped. The similarity graph is rebuilt from
    /// scratch, which is quadratic in the vocabulary size.
    pub fn from_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let vocabulary = MemoryVocabulary::new();
        {
            let mut inner = vocabulary.inner.write();
            for line in reader.lines() {
                let line = line?;
                let mut parts = line.split_whitespace();
                if let (Some(word), Some(count)) = (parts.next(), parts.next())
                    && let Ok(count) = count.parse::<f64>()
                {
                    inner.add_count(word.to_lowercase(), count);
                }
            }
        }
        Ok(vocabulary)
    }

    /// Save as a `word count` text file, most frequent first.
    pub fn save_frequency_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let inner = self.inner.read();
        let mut entries: Vec<(&str, f64)> = inner
            .entries
            .iter()
            .map(|entry| (entry.text.as_str(), entry.count))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for (word, count) in entries {
            writeln!(writer, "{word} {count}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a bincode snapshot written by [`Self::save_snapshot`].
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let snapshot: Snapshot = bincode::deserialize_from(reader)
            .map_err(|e| CorrigoError::serialization(e.to_string()))?;

        let mut by_text = AHashMap::with_capacity(snapshot.entries.len());
        for (i, entry) in snapshot.entries.iter().enumerate() {
            by_text.insert(entry.text.clone(), i as WordId);
        }

        Ok(MemoryVocabulary {
            inner: RwLock::new(Inner {
                entries: snapshot.entries,
                by_text,
                total_count: snapshot.total_count,
            }),
        })
    }

    /// Save a bincode snapshot, preserving the similarity graph exactly.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let inner = self.inner.read();
        let snapshot = Snapshot {
            entries: inner.entries.clone(),
            total_count: inner.total_count,
        };

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &snapshot)
            .map_err(|e| CorrigoError::serialization(e.to_string()))
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Sum of all raw counts.
    pub fn total_count(&self) -> f64 {
        self.inner.read().total_count
    }

    /// Number of undirected similarity edges.
    pub fn edge_count(&self) -> usize {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .map(|entry| entry.neighbors.len())
            .sum::<usize>()
            / 2
    }

    /// The `limit` most frequent words with their raw counts.
    pub fn top_words(&self, limit: usize) -> Vec<(String, f64)> {
        let inner = self.inner.read();
        let mut words: Vec<(String, f64)> = inner
            .entries
            .iter()
            .map(|entry| (entry.text.clone(), entry.count))
            .collect();
        words.sort_by(|a, b| b.1.total_cmp(&a.1));
        words.truncate(limit);
        words
    }
}

impl VocabularyStore for MemoryVocabulary {
    fn has(&self, word: &str) -> Result<bool> {
        Ok(self
            .inner
            .read()
            .by_text
            .contains_key(&word.to_lowercase()))
    }

    fn ids_by_length_range(&self, min: usize, max: usize) -> Result<Vec<WordId>> {
        let inner = self.inner.read();
        Ok(inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let length = entry.text.chars().count();
                length >= min && length <= max
            })
            .map(|(i, _)| i as WordId)
            .collect())
    }

    fn ids_by_length_and_prefix(
        &self,
        min: usize,
        max: usize,
        prefix: char,
    ) -> Result<Vec<WordId>> {
        let inner = self.inner.read();
        Ok(inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let length = entry.text.chars().count();
                length >= min && length <= max && entry.text.chars().next() == Some(prefix)
            })
            .map(|(i, _)| i as WordId)
            .collect())
    }

    fn word_of(&self, id: WordId) -> Result<String> {
        let inner = self.inner.read();
        inner
            .entries
            .get(id as usize)
            .map(|entry| entry.text.clone())
            .ok_or_else(|| CorrigoError::store(format!("unknown word id {id}")))
    }

    fn frequency_of(&self, id: WordId) -> Result<f64> {
        let inner = self.inner.read();
        let entry = inner
            .entries
            .get(id as usize)
            .ok_or_else(|| CorrigoError::store(format!("unknown word id {id}")))?;
        if inner.total_count > 0.0 {
            Ok(entry.count / inner.total_count)
        } else {
            Ok(0.0)
        }
    }

    fn neighbors_of(&self, id: WordId) -> Result<Vec<WordId>> {
        let inner = self.inner.read();
        inner
            .entries
            .get(id as usize)
            .map(|entry| entry.neighbors.clone())
            .ok_or_else(|| CorrigoError::store(format!("unknown word id {id}")))
    }

    fn insert(&self, word: &str, initial_frequency: f64) -> Result<WordId> {
        let normalized = word.to_lowercase();
        if normalized.is_empty() {
            return Err(CorrigoError::invalid_input("empty word"));
        }

        let mut inner = self.inner.write();
        if let Some(&id) = inner.by_text.get(&normalized) {
            return Ok(id);
        }

        // The first word has no total to scale against.
        let count = if inner.total_count > 0.0 {
            inner.total_count * initial_frequency
        } else {
            1.0
        };
        Ok(inner.insert_with_count(normalized, count))
    }

    fn bump_frequency(&self, word: &str, delta: f64) -> Result<()> {
        let normalized = word.to_lowercase();
        let mut inner = self.inner.write();
        let id = match inner.by_text.get(&normalized) {
            Some(&id) => id,
            None => {
                return Err(CorrigoError::store(format!(
                    "cannot bump unknown word: {normalized}"
                )));
            }
        };
        inner.entries[id as usize].count += delta;
        inner.total_count += delta;
        Ok(())
    }
}
