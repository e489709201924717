// src/combinatorics.rs
// ============================================================================
// Module: Combinatorics
// Description: Lazy enumeration of fixed-size subsets.
// Purpose: Replace the source language's recursive subset generator with a
//          streaming iterator, bounding memory during wide searches.
// Dependencies: none (std only)
// ============================================================================

//! ## Overview
//! [`Combinations`] yields every size-`k` combination of a slice's indices,
//! in lexicographic order, without materializing the full combination list
//! up front.

// ============================================================================
// SECTION: Combinations
// ============================================================================

/// A lazy iterator over the size-`k` index combinations of `0..len`.
///
/// Each item is a `Vec<usize>` of `k` strictly increasing indices. Mirrors
/// the shape of the recursive generator this crate's combinatorial search
/// was grounded on, but as a streaming iterator rather than a recursive
/// generator, so a caller that stops early (for example, once a match is
/// found) never pays for the unexplored combinations.
pub(crate) struct Combinations {
    len: usize,
    k: usize,
    state: Option<Vec<usize>>,
    started: bool,
}

impl Combinations {
    /// Iterates the size-`k` combinations of indices `0..len`.
    ///
    /// Yields nothing if `k` is zero or `k > len`, except that `k == 0`
    /// yields a single empty combination, matching the base case of the
    /// generator this was grounded on.
    pub(crate) fn new(len: usize, k: usize) -> Self {
        let state = if k <= len { Some((0..k).collect()) } else { None };
        Self {
            len,
            k,
            state,
            started: false,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.state.as_mut()?;

        if self.k == 0 {
            self.state = None;
            return Some(Vec::new());
        }

        if !self.started {
            self.started = true;
            return Some(indices.clone());
        }

        // Find the rightmost index that can still be advanced.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.state = None;
                return None;
            }
            i -= 1;
            if indices[i] != i + self.len - self.k {
                break;
            }
        }

        indices[i] += 1;
        for j in (i + 1)..self.k {
            indices[j] = indices[j - 1] + 1;
        }
        Some(indices.clone())
    }
}
