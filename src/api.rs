// src/api.rs
// ============================================================================
// Module: Public Entry Point
// Description: Input coercion and the satisfies() / satisfies_with_mode()
//              functions callers actually reach for.
// Purpose: Normalize the several accepted shapes of "group" and "rule" into
//          the evaluator's internal representation, enforcing preconditions
//          once at the boundary.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`satisfies`] and [`satisfies_with_mode`] are the only functions most
//! callers need. They accept a group in any of three shapes and a rule or
//! criterion in any of three shapes, coerce both, and dispatch to the
//! evaluator.

// ============================================================================
// SECTION: Input coercion
// ============================================================================

use std::collections::{BTreeSet, HashSet};

use serde_json::Value;

use crate::codec::DictCodec;
use crate::criterion::Criterion;
use crate::disjoint::check_satisfies;
use crate::error::{precondition, GrantResult, PreconditionViolation};
use crate::principal::Principal;
use crate::rule::Rule;

/// The accepted shapes for the `group` argument of [`satisfies`].
pub enum GroupInput {
    /// A single principal.
    One(Principal),
    /// Several principals; must be non-empty.
    Many(Vec<Principal>),
    /// A single principal given as a JSON dictionary.
    Dict(Value),
}

impl From<Principal> for GroupInput {
    fn from(principal: Principal) -> Self {
        Self::One(principal)
    }
}

impl From<Vec<Principal>> for GroupInput {
    fn from(principals: Vec<Principal>) -> Self {
        Self::Many(principals)
    }
}

impl From<Value> for GroupInput {
    fn from(value: Value) -> Self {
        Self::Dict(value)
    }
}

/// The accepted shapes for the `rule` argument of [`satisfies`].
pub enum RuleInput {
    /// An already-built rule; its `when` criterion is used.
    Rule(Rule),
    /// A criterion, evaluated directly.
    Criterion(Criterion),
    /// A JSON dictionary. If it has a non-empty `when` key, that key is
    /// parsed as the criterion (the dictionary is treated as a `Rule`);
    /// otherwise the whole dictionary is parsed as a `Criterion`.
    Dict(Value),
}

impl From<Rule> for RuleInput {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl From<Criterion> for RuleInput {
    fn from(criterion: Criterion) -> Self {
        Self::Criterion(criterion)
    }
}

impl From<Value> for RuleInput {
    fn from(value: Value) -> Self {
        Self::Dict(value)
    }
}

fn resolve_group(input: GroupInput) -> GrantResult<Vec<Principal>> {
    let principals = match input {
        GroupInput::Dict(value) => {
            precondition(!value.is_null(), "\"group\" cannot be empty.")?;
            vec![Principal::from_dict(value)?]
        }
        GroupInput::One(principal) => vec![principal],
        GroupInput::Many(principals) => {
            precondition(!principals.is_empty(), "\"group\" cannot be empty.")?;
            principals
        }
    };

    let mut seen = HashSet::with_capacity(principals.len());
    let mut unique = Vec::with_capacity(principals.len());
    for principal in principals {
        if seen.insert(principal.clone()) {
            unique.push(principal);
        }
    }
    Ok(unique)
}

fn resolve_criterion(input: RuleInput) -> GrantResult<Criterion> {
    match input {
        RuleInput::Rule(rule) => Ok(rule.when().clone()),
        RuleInput::Criterion(criterion) => Ok(criterion),
        RuleInput::Dict(value) => {
            precondition(!value.is_null(), "\"rule\" cannot be empty.")?;
            let when = value.get("when").filter(|v| !v.is_null());
            match when {
                Some(when) => Criterion::from_dict(when.clone()),
                None => Criterion::from_dict(value),
            }
        }
    }
}

// ============================================================================
// SECTION: satisfies
// ============================================================================

/// Decides whether `group` satisfies `rule`, using disjoint-subset
/// evaluation for conjunctions (the default the source language uses).
///
/// `group` may be a single [`Principal`], a non-empty `Vec<Principal>`, or
/// a JSON dictionary describing one principal. `rule` may be a [`Rule`], a
/// [`Criterion`], or a JSON dictionary (treated as a `Rule` if it has a
/// `when` key, otherwise as a `Criterion`).
///
/// # Errors
/// Returns a [`PreconditionViolation`] if `group` is empty, or if `rule`
/// cannot be coerced to a `Criterion`.
pub fn satisfies(group: impl Into<GroupInput>, rule: impl Into<RuleInput>) -> GrantResult<bool> {
    satisfies_with_mode(group, rule, true)
}

/// As [`satisfies`], but lets the caller choose whether conjunctions
/// (`All` criteria) must be satisfied by disjoint subsets of the group.
///
/// # Errors
/// Returns a [`PreconditionViolation`] if `group` is empty, or if `rule`
/// cannot be coerced to a `Criterion`.
pub fn satisfies_with_mode(
    group: impl Into<GroupInput>,
    rule: impl Into<RuleInput>,
    disjoint: bool,
) -> GrantResult<bool> {
    let principals = resolve_group(group.into())?;
    let criterion = resolve_criterion(rule.into())?;
    let all_indices: BTreeSet<usize> = (0..principals.len()).collect();
    Ok(check_satisfies(&principals, &all_indices, &criterion, disjoint))
}
