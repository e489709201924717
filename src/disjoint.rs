// src/disjoint.rs
// ============================================================================
// Module: Disjoint Evaluator
// Description: Minimal-matching-subset search deciding whether a group can
//              be partitioned into non-overlapping subsets, one per
//              conjunct, that each satisfy their conjunct.
// Purpose: The hard part of this crate. Exhaustive, with two pruning
//          optimizations carried over from the source algorithm.
// Dependencies: none (std only)
// ============================================================================

//! ## Overview
//! Disjointness is enforced only across the direct children of an `All`
//! node. An `Any` node's alternatives, and anything nested under one, are
//! always evaluated by [`crate::eval::evaluate`] instead — disjointness
//! does not propagate through `Any` (see [`check_satisfies`]).
//!
//! The search is built around **minimal matching subsets** (MMS): every
//! subset of the group that satisfies a criterion and from which no member
//! can be dropped while still satisfying it. [`matching_minimal_subsets`]
//! enumerates them; a criterion is satisfiable in disjoint mode exactly
//! when that list is non-empty.
//!
//! One quirk is deliberately preserved rather than "fixed": the `Any` and
//! nested-`All` branches below flatten every matching subset they find into
//! a single unioned answer, rather than keeping each witness distinct. This
//! mirrors the source algorithm's behavior exactly (fewer, larger candidate
//! subsets than a from-scratch design might produce) and is a known
//! conservative limitation, not a bug introduced here.

// ============================================================================
// SECTION: Minimal Matching Subsets
// ============================================================================

use std::collections::BTreeSet;

use crate::combinatorics::Combinations;
use crate::criterion::Criterion;
use crate::eval::evaluate;
use crate::principal::Principal;

type IndexSet = BTreeSet<usize>;

fn flatten_to_single_set(sets: &[IndexSet]) -> IndexSet {
    let mut flat = IndexSet::new();
    for set in sets {
        flat.extend(set.iter().copied());
    }
    flat
}

/// Returns every minimal subset of `group` (given as indices into
/// `principals`) that satisfies `criterion`.
///
/// An empty result means `criterion` cannot be satisfied by any subset of
/// `group`. This is the core of the disjoint-mode evaluator; see the module
/// documentation for the flatten-to-union behavior preserved for `Any` and
/// nested `All`.
pub(crate) fn matching_minimal_subsets(
    principals: &[Principal],
    group: &IndexSet,
    criterion: &Criterion,
) -> Vec<IndexSet> {
    if group.is_empty() {
        return Vec::new();
    }

    match criterion {
        Criterion::Id(id) => group
            .iter()
            .filter(|&&i| principals[i].id() == Some(id.as_str()))
            .map(|&i| IndexSet::from([i]))
            .collect(),

        Criterion::Role { role, n } => {
            let with_role: Vec<usize> = group
                .iter()
                .copied()
                .filter(|&i| principals[i].has_role(role))
                .collect();
            Combinations::new(with_role.len(), *n as usize)
                .map(|combo| combo.into_iter().map(|j| with_role[j]).collect())
                .collect()
        }

        Criterion::Any { children, n } => {
            let matches: Vec<IndexSet> = children
                .iter()
                .filter_map(|child| {
                    let subsets = matching_minimal_subsets(principals, group, child);
                    (!subsets.is_empty()).then(|| flatten_to_single_set(&subsets))
                })
                .collect();

            if matches.is_empty() {
                return Vec::new();
            }
            if *n == 1 {
                return matches;
            }
            Combinations::new(matches.len(), *n as usize)
                .map(|combo| {
                    let chosen: Vec<IndexSet> = combo.into_iter().map(|j| matches[j].clone()).collect();
                    flatten_to_single_set(&chosen)
                })
                .collect()
        }

        Criterion::All(children) => {
            let Some(first) = children.first() else {
                return Vec::new();
            };
            let subsets = matching_minimal_subsets(principals, group, first);

            // Optimization 1: a singleton conjunction delegates directly.
            if children.len() == 1 {
                return subsets;
            }
            if subsets.is_empty() {
                return Vec::new();
            }

            let rest: Criterion = if children.len() > 2 {
                Criterion::All(children[1..].to_vec())
            } else {
                children[1].clone()
            };
            let min_remainder_size = rest.min_group_size();

            let mut answer = Vec::new();
            for subset in &subsets {
                // Optimization 2: skip remainders too small to ever satisfy `rest`.
                if group.len() - subset.len() < min_remainder_size {
                    continue;
                }
                let remainder: IndexSet = group.difference(subset).copied().collect();
                if remainder.is_empty() {
                    continue;
                }
                let subsets_for_remainder = matching_minimal_subsets(principals, &remainder, &rest);
                if !subsets_for_remainder.is_empty() {
                    let solution: Vec<IndexSet> = subsets_for_remainder
                        .iter()
                        .map(|x| x.union(subset).copied().collect())
                        .collect();
                    answer.push(flatten_to_single_set(&solution));
                }
            }
            answer
        }
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Evaluates `criterion` against `group`, enforcing disjointness across the
/// direct children of any `All` node when `disjoint` is true.
///
/// `Id`, `Role`, and `Any` criteria behave identically regardless of
/// `disjoint`: only `All` branches on it. This mirrors the source
/// algorithm's recursion, where an `Any` node always evaluates its children
/// non-disjointly even when the outer call requested disjoint evaluation.
pub(crate) fn check_satisfies(
    principals: &[Principal],
    group: &IndexSet,
    criterion: &Criterion,
    disjoint: bool,
) -> bool {
    match criterion {
        Criterion::Id(_) | Criterion::Role { .. } | Criterion::Any { .. } => {
            evaluate(principals, group, criterion)
        }
        Criterion::All(_) => {
            if disjoint {
                !matching_minimal_subsets(principals, group, criterion).is_empty()
            } else {
                evaluate(principals, group, criterion)
            }
        }
    }
}
