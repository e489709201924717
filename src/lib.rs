// src/lib.rs
// ============================================================================
// Module: Grant Language
// Description: Evaluator for a small declarative authorization grant
//              language: principals, criteria, and rules.
// Purpose: Decide whether a group of principals satisfies a rule, under
//          either non-disjoint or disjoint-subset evaluation.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate evaluates a small declarative authorization language. A
//! caller supplies a group of [`Principal`]s (each identified by an `id`
//! and/or a set of roles) and a [`Rule`] — or bare [`Criterion`] —
//! describing who is authorized, and asks [`satisfies`] whether the group
//! qualifies.
//!
//! The only non-trivial engineering here is the *disjoint-subset*
//! evaluator for conjunctive (`All`) criteria: deciding whether the group
//! can be partitioned into non-overlapping subsets, one per conjunct, such
//! that each conjunct is satisfied by its assigned subset. See
//! [`disjoint`] for the search and its pruning.
//!
//! This crate does no I/O, holds no state between calls, and never logs:
//! every call is a pure function of its arguments.
//!
//! ```
//! use grant_lang::{satisfies, Criterion, Principal};
//!
//! let bob = Principal::with_id("Bob")?;
//! let rule = Criterion::id("Bob")?;
//! assert!(satisfies(bob, rule)?);
//! # Ok::<(), grant_lang::PreconditionViolation>(())
//! ```


mod api;
mod codec;
mod combinatorics;
mod criterion;
mod disjoint;
mod error;
mod eval;
mod principal;
mod rule;

pub use api::{satisfies, satisfies_with_mode, GroupInput, RuleInput};
pub use codec::DictCodec;
pub use criterion::Criterion;
pub use error::{GrantResult, PreconditionViolation};
pub use principal::Principal;
pub use rule::Rule;

// ============================================================================
// SECTION: Construction macro
// ============================================================================

/// Builds a [`Criterion`] from a small tree notation, returning
/// [`GrantResult<Criterion>`].
///
/// ```
/// use grant_lang::criterion;
///
/// let c = criterion!(all [
///     criterion!(id("Bob")),
///     criterion!(role("parent", 2)),
/// ])?;
/// # Ok::<(), grant_lang::PreconditionViolation>(())
/// ```
#[macro_export]
macro_rules! criterion {
    (id($id:expr)) => {
        $crate::Criterion::id($id)
    };
    (role($role:expr)) => {
        $crate::Criterion::role($role)
    };
    (role($role:expr, $n:expr)) => {
        $crate::Criterion::role_with_count($role, $n)
    };
    (all [$($child:expr),+ $(,)?]) => {{
        let children: $crate::GrantResult<::std::vec::Vec<$crate::Criterion>> =
            [$($child),+].into_iter().collect();
        children.and_then($crate::Criterion::all)
    }};
    (any [$($child:expr),+ $(,)?]) => {{
        let children: $crate::GrantResult<::std::vec::Vec<$crate::Criterion>> =
            [$($child),+].into_iter().collect();
        children.and_then($crate::Criterion::any)
    }};
    (any($n:expr) [$($child:expr),+ $(,)?]) => {{
        let children: $crate::GrantResult<::std::vec::Vec<$crate::Criterion>> =
            [$($child),+].into_iter().collect();
        children.and_then(|cs| $crate::Criterion::any_with_count(cs, $n))
    }};
}
