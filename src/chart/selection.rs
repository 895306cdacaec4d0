//! Element selection: letters without replacement, thumbnails with replacement

use crate::io::configuration::LetterScope;
use crate::io::error::{ChartError, Result};
use rand::Rng;
use rand::seq::SliceRandom;

/// Distinct candidate letters for letter rings
///
/// The pool itself is never consumed. Every draw shuffles a working copy,
/// so each ring starts from the full alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPool {
    letters: Vec<char>,
}

impl LetterPool {
    /// Build a pool keeping the first occurrence of each letter
    pub fn new(alphabet: impl IntoIterator<Item = char>) -> Self {
        let mut letters: Vec<char> = Vec::new();
        for letter in alphabet {
            if !letters.contains(&letter) {
                letters.push(letter);
            }
        }
        Self { letters }
    }

    /// Number of distinct letters
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the pool has no letters at all
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in insertion order
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Draw `count` distinct letters by shuffling a working copy and taking a prefix
    ///
    /// # Errors
    ///
    /// Returns `InsufficientPool` if the pool holds fewer than `count` letters
    pub fn draw_distinct<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<char>> {
        if count > self.letters.len() {
            return Err(ChartError::InsufficientPool {
                available: self.letters.len(),
                required: count,
            });
        }

        let mut working = self.letters.clone();
        working.shuffle(rng);
        working.truncate(count);
        Ok(working)
    }
}

/// Assign letters to every slot of every ring according to `scope`
///
/// `Ring` reshuffles the full pool for each ring; `Chart` shuffles once and
/// deals consecutive chunks so no letter appears twice on the chart.
///
/// # Errors
///
/// Returns `InsufficientPool` if the pool cannot cover the requested scope
pub fn assign_letters<R: Rng + ?Sized>(
    pool: &LetterPool,
    rings: usize,
    per_ring: usize,
    scope: LetterScope,
    rng: &mut R,
) -> Result<Vec<Vec<char>>> {
    match scope {
        LetterScope::Ring => (0..rings)
            .map(|_| pool.draw_distinct(per_ring, rng))
            .collect(),
        LetterScope::Chart => {
            let all = pool.draw_distinct(per_ring.saturating_mul(rings), rng)?;
            if per_ring == 0 {
                return Ok(vec![Vec::new(); rings]);
            }
            Ok(all.chunks(per_ring).map(<[char]>::to_vec).collect())
        }
    }
}

/// Pick `count` indices into a pool of `pool_len` items, independently and uniformly
///
/// # Errors
///
/// Returns `EmptyImagePool` if there is nothing to pick from
pub fn pick_with_replacement<R: Rng + ?Sized>(
    pool_len: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if pool_len == 0 {
        return Err(ChartError::EmptyImagePool { attempted: 0 });
    }
    Ok((0..count).map(|_| rng.random_range(0..pool_len)).collect())
}
