//! Keyboard layout model and precomputed substitution costs.
//!
//! Substituting one character for a physically nearby key is a more likely
//! typo than reaching across the board, so substitution cost is modeled as
//! the shortest-path distance over the QWERTY adjacency graph, at 0.5 per
//! hop. The full all-pairs table is computed once at startup and is
//! immutable afterwards.

use crate::error::{CorrigoError, Result};

/// The supported alphabet, in keyboard order.
pub const ALPHABET: &str = "qwertyuiopasdfghjklzxcvbnm-'";

/// Number of supported keys.
pub(crate) const KEY_COUNT: usize = ALPHABET.len();

/// Cost of one hop between physically adjacent keys.
const STEP_COST: f64 = 0.5;

const INVALID_KEY: u8 = u8::MAX;

/// Physical neighbors of a key as laid out on a QWERTY board.
///
/// A few pairs are listed in one direction only; [`CostMatrix::qwerty`]
/// inserts every edge in both directions before computing costs.
fn listed_neighbors(ch: char) -> &'static [char] {
    match ch {
        'q' => &['w', 'a', 's'],
        'w' => &['q', 'a', 's', 'd', 'e'],
        'e' => &['w', 's', 'd', 'f', 'r'],
        'r' => &['e', 'd', 'f', 'g', 't'],
        't' => &['r', 'f', 'g', 'h', 'y'],
        'y' => &['t', 'g', 'h', 'j', 'u'],
        'u' => &['y', 'h', 'j', 'k', 'i'],
        'i' => &['u', 'j', 'k', 'l', 'o'],
        'o' => &['i', 'k', 'l', 'p'],
        'p' => &['o', 'l', '-', '\''],
        'a' => &['q', 'w', 's', 'x', 'z'],
        's' => &['q', 'a', 'z', 'x', 'c', 'd', 'e', 'w'],
        'd' => &['w', 's', 'x', 'c', 'v', 'f', 'r', 'e'],
        'f' => &['e', 'd', 'c', 'v', 'b', 'g', 't', 'r'],
        'g' => &['r', 'f', 'v', 'b', 'h', 'y', 't'],
        'h' => &['t', 'g', 'b', 'n', 'j', 'u', 'y'],
        'j' => &['y', 'h', 'n', 'm', 'k', 'i', 'u'],
        'k' => &['u', 'j', 'm', 'l', 'o', 'i'],
        'l' => &['i', 'k', 'o', 'p'],
        'z' => &['a', 's', 'x'],
        'x' => &['z', 's', 'd', 'c'],
        'c' => &['x', 'd', 'f', 'v'],
        'v' => &['c', 'f', 'g', 'b'],
        'b' => &['v', 'g', 'h', 'n'],
        'n' => &['b', 'h', 'j', 'm'],
        'm' => &['n', 'j', 'k', 'l'],
        '-' => &['p'],
        '\'' => &['p'],
        _ => &[],
    }
}

/// All-pairs substitution costs over the supported alphabet.
///
/// Symmetric by construction: adjacency is symmetrized before the
/// per-source relaxation runs, so `cost(a, b) == cost(b, a)` and
/// `cost(a, a) == 0.0` for every pair of supported characters.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    /// Row-major `KEY_COUNT * KEY_COUNT` cost table.
    costs: Vec<f64>,
    /// ASCII byte to key index, `INVALID_KEY` for unsupported characters.
    index: [u8; 128],
}

impl CostMatrix {
    /// Build the cost table for the QWERTY layout.
    ///
    /// Runs a single-source shortest-path relaxation from every key over
    /// the symmetrized adjacency graph, 0.5 per hop.
    pub fn qwerty() -> Self {
        let mut index = [INVALID_KEY; 128];
        for (i, key) in ALPHABET.chars().enumerate() {
            index[key as usize] = i as u8;
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); KEY_COUNT];
        for (i, key) in ALPHABET.chars().enumerate() {
            for &neighbor in listed_neighbors(key) {
                if let Some(j) = ALPHABET.chars().position(|c| c == neighbor) {
                    if !adjacency[i].contains(&j) {
                        adjacency[i].push(j);
                    }
                    if !adjacency[j].contains(&i) {
                        adjacency[j].push(i);
                    }
                }
            }
        }

        let mut costs = vec![f64::INFINITY; KEY_COUNT * KEY_COUNT];
        for source in 0..KEY_COUNT {
            let row = &mut costs[source * KEY_COUNT..(source + 1) * KEY_COUNT];
            Self::relax_from(source, &adjacency, row);
        }

        CostMatrix { costs, index }
    }

    /// Single-source pass: repeatedly settle the cheapest unvisited key and
    /// relax its still-unvisited neighbors.
    fn relax_from(source: usize, adjacency: &[Vec<usize>], row: &mut [f64]) {
        row[source] = 0.0;
        let mut unvisited: Vec<usize> = (0..row.len()).collect();

        while let Some(pos) =
            (0..unvisited.len()).min_by(|&x, &y| row[unvisited[x]].total_cmp(&row[unvisited[y]]))
        {
            let current = unvisited.swap_remove(pos);
            for &next in &adjacency[current] {
                if unvisited.contains(&next) {
                    let relaxed = row[current] + STEP_COST;
                    if relaxed < row[next] {
                        row[next] = relaxed;
                    }
                }
            }
        }
    }

    /// Check whether a character belongs to the supported alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// Reject any word containing a character outside the alphabet.
    pub fn validate(&self, word: &str) -> Result<()> {
        for ch in word.chars() {
            if !self.contains(ch) {
                return Err(CorrigoError::InvalidCharacter(ch));
            }
        }
        Ok(())
    }

    /// Substitution cost between two characters.
    ///
    /// Zero for identical characters, 0.5 for physical neighbors, growing
    /// with keyboard distance otherwise.
    pub fn cost(&self, a: char, b: char) -> Result<f64> {
        let ia = self.index_of(a).ok_or(CorrigoError::InvalidCharacter(a))?;
        let ib = self.index_of(b).ok_or(CorrigoError::InvalidCharacter(b))?;
        Ok(self.cost_at(ia, ib))
    }

    /// Key index for a character, `None` for unsupported characters.
    pub(crate) fn index_of(&self, ch: char) -> Option<usize> {
        let code = ch as usize;
        if code < self.index.len() {
            let idx = self.index[code];
            (idx != INVALID_KEY).then_some(idx as usize)
        } else {
            None
        }
    }

    /// Cost lookup by key index. Indices must come from [`Self::index_of`].
    pub(crate) fn cost_at(&self, a: usize, b: usize) -> f64 {
        self.costs[a * KEY_COUNT + b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_cost_is_zero() {
        let matrix = CostMatrix::qwerty();
        for ch in ALPHABET.chars() {
            assert_eq!(matrix.cost(ch, ch).unwrap(), 0.0, "cost({ch:?}, {ch:?})");
        }
    }

    #[test]
    fn test_cost_matrix_is_symmetric() {
        let matrix = CostMatrix::qwerty();
        for a in ALPHABET.chars() {
            for b in ALPHABET.chars() {
                let ab = matrix.cost(a, b).unwrap();
                let ba = matrix.cost(b, a).unwrap();
                assert_eq!(ab, ba, "cost({a:?}, {b:?}) != cost({b:?}, {a:?})");
                assert!(ab.is_finite(), "cost({a:?}, {b:?}) unreachable");
            }
        }
    }

    #[test]
    fn test_adjacent_keys_cost_half() {
        let matrix = CostMatrix::qwerty();
        assert_eq!(matrix.cost('o', 'p').unwrap(), 0.5);
        assert_eq!(matrix.cost('q', 'w').unwrap(), 0.5);
        assert_eq!(matrix.cost('h', 'y').unwrap(), 0.5);
        assert_eq!(matrix.cost('h', 'j').unwrap(), 0.5);
    }

    #[test]
    fn test_one_directional_pairs_are_symmetrized() {
        // These neighbor relations appear in one direction only in the
        // layout data and must still cost a single hop both ways.
        let matrix = CostMatrix::qwerty();
        for (a, b) in [('a', 'x'), ('s', 'c'), ('d', 'v'), ('f', 'b'), ('m', 'l')] {
            assert_eq!(matrix.cost(a, b).unwrap(), 0.5, "cost({a:?}, {b:?})");
            assert_eq!(matrix.cost(b, a).unwrap(), 0.5, "cost({b:?}, {a:?})");
        }
    }

    #[test]
    fn test_two_hop_neighbors() {
        let matrix = CostMatrix::qwerty();
        // q-w-e and a-s-d: two hops each.
        assert_eq!(matrix.cost('q', 'e').unwrap(), 1.0);
        assert_eq!(matrix.cost('a', 'd').unwrap(), 1.0);
    }

    #[test]
    fn test_punctuation_keys_reachable() {
        let matrix = CostMatrix::qwerty();
        assert_eq!(matrix.cost('-', 'p').unwrap(), 0.5);
        assert_eq!(matrix.cost('\'', 'p').unwrap(), 0.5);
        // Hyphen and apostrophe connect only through 'p'.
        assert_eq!(matrix.cost('-', '\'').unwrap(), 1.0);
        assert!(matrix.cost('q', '\'').unwrap().is_finite());
    }

    #[test]
    fn test_cross_board_distance() {
        let matrix = CostMatrix::qwerty();
        // Shortest route from 'q' to 'p' takes eight hops.
        assert_eq!(matrix.cost('q', 'p').unwrap(), 4.0);
    }

    #[test]
    fn test_contains_rejects_unsupported_characters() {
        let matrix = CostMatrix::qwerty();
        assert!(matrix.contains('a'));
        assert!(matrix.contains('\''));
        assert!(matrix.contains('-'));
        assert!(!matrix.contains('A'));
        assert!(!matrix.contains('1'));
        assert!(!matrix.contains('é'));
    }

    #[test]
    fn test_validate() {
        let matrix = CostMatrix::qwerty();
        assert!(matrix.validate("hello").is_ok());
        assert!(matrix.validate("it's-fine").is_ok());

        match matrix.validate("héllo") {
            Err(CorrigoError::InvalidCharacter('é')) => {}
            other => panic!("expected InvalidCharacter, got {other:?}"),
        }
    }

    #[test]
    fn test_cost_rejects_unsupported_characters() {
        let matrix = CostMatrix::qwerty();
        assert!(matrix.cost('a', '!').is_err());
        assert!(matrix.cost('?', 'a').is_err());
    }
}
