// src/eval.rs
// ============================================================================
// Module: Non-disjoint Evaluator
// Description: Recursive tree walk that allows the same principal to satisfy
//              more than one conjunct.
// Purpose: The simpler of the two evaluation modes; also the mode every
//          Any branch always uses for its own children, even when the
//          enclosing call asked for disjoint evaluation.
// Dependencies: none (std only)
// ============================================================================

//! ## Overview
//! Implements the "easy" half of criterion satisfaction: a group of
//! principals satisfies an `All` node here simply when every child is
//! independently satisfied by the *whole* group — no bookkeeping over which
//! principal "used up" which conjunct. This is also the only mode an `Any`
//! node's alternatives are ever evaluated in, regardless of whether the
//! caller asked for disjoint evaluation: disjointness is a property only
//! `All` enforces, and only among its own direct children.

// ============================================================================
// SECTION: Evaluation
// ============================================================================

use std::collections::BTreeSet;

use crate::criterion::Criterion;
use crate::principal::Principal;

/// Evaluates `criterion` against `group` without enforcing disjointness
/// between sibling conjuncts of any `All` node.
///
/// `group` is a set of indices into `principals`, so that the same backing
/// slice can be reused across recursive calls without copying principals.
pub(crate) fn evaluate(principals: &[Principal], group: &BTreeSet<usize>, criterion: &Criterion) -> bool {
    match criterion {
        Criterion::Id(id) => group.iter().any(|&i| principals[i].id() == Some(id.as_str())),
        Criterion::Role { role, n } => {
            let mut remaining = *n;
            for &i in group {
                if principals[i].has_role(role) {
                    remaining -= 1;
                    if remaining == 0 {
                        return true;
                    }
                }
            }
            false
        }
        Criterion::Any { children, n } => {
            let mut remaining = *n;
            for child in children {
                if evaluate(principals, group, child) {
                    remaining -= 1;
                    if remaining == 0 {
                        return true;
                    }
                }
            }
            false
        }
        Criterion::All(children) => children.iter().all(|child| evaluate(principals, group, child)),
    }
}
