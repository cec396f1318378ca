//! Weighted edit distance between words.
//!
//! The metric is a Damerau-Levenshtein distance with unit insert, delete,
//! and transposition costs, and substitution priced by keyboard proximity
//! through a [`CostMatrix`]. Distances are computed bottom-up over three
//! rolling rows (transpositions reach back two rows) and memoized in a
//! bounded LRU cache shared across callers.

use parking_lot::Mutex;

use crate::error::{CorrigoError, Result};
use crate::keyboard::CostMatrix;
use crate::util::lru::LruCache;

/// Entries retained in the shared distance cache.
const CACHE_CAPACITY: usize = 4096;

/// Cache key: both words plus the limit's exact bit pattern.
type CacheKey = (String, String, Option<u64>);

/// Unweighted Damerau-Levenshtein distance with a cutoff.
///
/// Insertions, deletions, substitutions, and adjacent transpositions all
/// cost 1. Returns `None` as soon as the distance provably exceeds
/// `threshold`. Used for building the vocabulary similarity graph, where
/// keyboard weighting is deliberately not applied.
pub fn edit_distance_within(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();
    let len1 = chars1.len();
    let len2 = chars2.len();

    // Every length-changing edit costs 1.
    if len1.abs_diff(len2) > threshold {
        return None;
    }
    if len1 == 0 {
        return (len2 <= threshold).then_some(len2);
    }
    if len2 == 0 {
        return (len1 <= threshold).then_some(len1);
    }

    let mut prev_prev = vec![0usize; len2 + 1];
    let mut prev: Vec<usize> = (0..=len2).collect();
    let mut curr = vec![0usize; len2 + 1];
    let mut min_in_prev = 0usize;

    for i in 1..=len1 {
        curr[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = if chars1[i - 1] == chars2[j - 1] { 0 } else { 1 };

            let mut best = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution

            if i > 1
                && j > 1
                && chars1[i - 1] == chars2[j - 2]
                && chars1[i - 2] == chars2[j - 1]
            {
                best = best.min(prev_prev[j - 2] + 1); // transposition
            }

            curr[j] = best;
            min_in_row = min_in_row.min(best);
        }

        // A transposition in a later row can still reach back through the
        // previous row, so both bounds must exceed the threshold.
        if min_in_row > threshold && min_in_prev + 1 > threshold {
            return None;
        }

        std::mem::swap(&mut prev_prev, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
        min_in_prev = min_in_row;
    }

    let distance = prev[len2];
    (distance <= threshold).then_some(distance)
}

/// Keyboard-weighted distance computation with a shared memoization cache.
#[derive(Debug)]
pub struct DistanceEngine {
    costs: CostMatrix,
    cache: Mutex<LruCache<CacheKey, f64>>,
}

impl DistanceEngine {
    /// Create an engine over the QWERTY cost matrix.
    pub fn new() -> Self {
        Self::with_matrix(CostMatrix::qwerty())
    }

    /// Create an engine over a caller-supplied cost matrix.
    pub fn with_matrix(costs: CostMatrix) -> Self {
        DistanceEngine {
            costs,
            cache: Mutex::new(LruCache::new(CACHE_CAPACITY)),
        }
    }

    /// The substitution cost matrix this engine consults.
    pub fn matrix(&self) -> &CostMatrix {
        &self.costs
    }

    /// Weighted distance between two words.
    ///
    /// Either word may be empty; any character outside the supported
    /// alphabet fails the whole call with `InvalidCharacter`.
    pub fn distance(&self, a: &str, b: &str) -> Result<f64> {
        self.compute(a, b, None)
    }

    /// Weighted distance, giving up once it provably exceeds `limit`.
    ///
    /// The limit is inclusive: whenever the true distance is at most
    /// `limit`, the exact value is returned; otherwise `None`.
    pub fn distance_within(&self, a: &str, b: &str, limit: f64) -> Result<Option<f64>> {
        let distance = self.compute(a, b, Some(limit))?;
        Ok(distance.is_finite().then_some(distance))
    }

    /// Cached distance with infinity standing in for "limit exceeded".
    fn compute(&self, a: &str, b: &str, limit: Option<f64>) -> Result<f64> {
        let ia = self.key_indices(a)?;
        let ib = self.key_indices(b)?;

        let key = (a.to_string(), b.to_string(), limit.map(f64::to_bits));
        if let Some(&cached) = self.cache.lock().get(&key) {
            return Ok(cached);
        }

        let distance = self.weighted(&ia, &ib, limit).unwrap_or(f64::INFINITY);
        self.cache.lock().insert(key, distance);
        Ok(distance)
    }

    /// Map a word to key indices, rejecting unsupported characters.
    fn key_indices(&self, word: &str) -> Result<Vec<usize>> {
        word.chars()
            .map(|ch| {
                self.costs
                    .index_of(ch)
                    .ok_or(CorrigoError::InvalidCharacter(ch))
            })
            .collect()
    }

    fn weighted(&self, a: &[usize], b: &[usize], limit: Option<f64>) -> Option<f64> {
        let len1 = a.len();
        let len2 = b.len();

        if let Some(limit) = limit
            && len1.abs_diff(len2) as f64 > limit
        {
            return None;
        }
        if len1 == 0 || len2 == 0 {
            let distance = len1.max(len2) as f64;
            return match limit {
                Some(limit) if distance > limit => None,
                _ => Some(distance),
            };
        }

        let mut prev_prev = vec![0.0f64; len2 + 1];
        let mut prev: Vec<f64> = (0..=len2).map(|j| j as f64).collect();
        let mut curr = vec![0.0f64; len2 + 1];
        let mut min_in_prev = 0.0f64;

        for i in 1..=len1 {
            curr[0] = i as f64;
            let mut min_in_row = curr[0];

            for j in 1..=len2 {
                let substitution = self.costs.cost_at(a[i - 1], b[j - 1]);

                let mut best = (prev[j] + 1.0) // deletion
                    .min(curr[j - 1] + 1.0) // insertion
                    .min(prev[j - 1] + substitution); // substitution or same

                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    best = best.min(prev_prev[j - 2] + 1.0); // transposition
                }

                curr[j] = best;
                min_in_row = min_in_row.min(best);
            }

            if let Some(limit) = limit
                && min_in_row > limit
                && min_in_prev + 1.0 > limit
            {
                return None;
            }

            std::mem::swap(&mut prev_prev, &mut prev);
            std::mem::swap(&mut prev, &mut curr);
            min_in_prev = min_in_row;
        }

        let distance = prev[len2];
        match limit {
            Some(limit) if distance > limit => None,
            _ => Some(distance),
        }
    }
}

impl Default for DistanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_within() {
        assert_eq!(edit_distance_within("", "", 0), Some(0));
        assert_eq!(edit_distance_within("ab", "ba", 2), Some(1));
        assert_eq!(edit_distance_within("search", "serach", 2), Some(1));
        assert_eq!(edit_distance_within("kitten", "sitting", 3), Some(3));
        assert_eq!(edit_distance_within("kitten", "sitting", 2), None);
        assert_eq!(edit_distance_within("a", "abc", 1), None);
        assert_eq!(edit_distance_within("hello", "jello", 3), Some(1));
        assert_eq!(edit_distance_within("hello", "help", 3), Some(2));
    }

    #[test]
    fn test_distance_identity() {
        let engine = DistanceEngine::new();
        for word in ["a", "hello", "it's", "well-known"] {
            assert_eq!(engine.distance(word, word).unwrap(), 0.0, "{word}");
        }
    }

    #[test]
    fn test_distance_transposition() {
        let engine = DistanceEngine::new();
        assert_eq!(engine.distance("ab", "ba").unwrap(), 1.0);
        assert_eq!(engine.distance("teh", "the").unwrap(), 1.0);
    }

    #[test]
    fn test_distance_insert_delete() {
        let engine = DistanceEngine::new();
        assert_eq!(engine.distance("cat", "cats").unwrap(), 1.0);
        assert_eq!(engine.distance("", "abc").unwrap(), 3.0);
        assert_eq!(engine.distance("abc", "").unwrap(), 3.0);
        assert_eq!(engine.distance("", "").unwrap(), 0.0);
    }

    #[test]
    fn test_adjacent_substitution_is_cheap() {
        let engine = DistanceEngine::new();
        // o and p are neighbors; o and m are not.
        assert_eq!(engine.distance("helo", "help").unwrap(), 0.5);
        assert!(engine.distance("helo", "helm").unwrap() > 0.5);
    }

    #[test]
    fn test_distance_mixed_edits() {
        let engine = DistanceEngine::new();
        // h->y substitution (0.5) plus two insertions.
        assert_eq!(engine.distance("helo", "yellow").unwrap(), 2.5);
        // One plain insertion.
        assert_eq!(engine.distance("helo", "hello").unwrap(), 1.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let engine = DistanceEngine::new();
        for (a, b) in [("helo", "hello"), ("kitten", "sitting"), ("ab", "ba")] {
            assert_eq!(
                engine.distance(a, b).unwrap(),
                engine.distance(b, a).unwrap(),
                "distance({a:?}, {b:?})"
            );
        }
    }

    #[test]
    fn test_limit_is_inclusive() {
        let engine = DistanceEngine::new();
        let exact = engine.distance("kitten", "sitting").unwrap();

        assert_eq!(
            engine.distance_within("kitten", "sitting", exact).unwrap(),
            Some(exact)
        );
        assert_eq!(
            engine
                .distance_within("kitten", "sitting", exact + 1.0)
                .unwrap(),
            Some(exact)
        );
        assert_eq!(
            engine
                .distance_within("kitten", "sitting", exact - 0.5)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_limited_and_unlimited_calls_do_not_collide() {
        let engine = DistanceEngine::new();
        assert_eq!(
            engine.distance_within("helo", "hello", 0.5).unwrap(),
            None
        );
        assert_eq!(engine.distance("helo", "hello").unwrap(), 1.0);
        assert_eq!(
            engine.distance_within("helo", "hello", 2.0).unwrap(),
            Some(1.0)
        );
        // Repeat the failing limit to exercise the cached sentinel.
        assert_eq!(
            engine.distance_within("helo", "hello", 0.5).unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_character_rejected() {
        let engine = DistanceEngine::new();
        assert!(engine.distance("hello", "Hello").is_err());
        assert!(engine.distance("héllo", "hello").is_err());
        assert!(engine.distance_within("a!", "ab", 3.0).is_err());
    }

    #[test]
    fn test_substitute_matrix() {
        // The engine works against any matrix, not a hidden global.
        let engine = DistanceEngine::with_matrix(CostMatrix::qwerty());
        assert_eq!(engine.distance("helo", "help").unwrap(), 0.5);
        assert!(engine.matrix().contains('q'));
    }
}
