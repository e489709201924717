// src/criterion.rs
// ============================================================================
// Module: Criterion
// Description: The who-is-authorized tree: identity match, role threshold,
//              conjunction, and disjunction.
// Purpose: Validated, immutable construction of the authorization language's
//          core expression type.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Criterion`] is a tagged tree with exactly one of four shapes per
//! node: [`Criterion::Id`], [`Criterion::Role`], [`Criterion::All`], or
//! [`Criterion::Any`]. The shapes are mutually exclusive by construction —
//! there is no representable state with zero or more than one shape, unlike
//! the "struct with four optional fields" the language was originally
//! specified with.

// ============================================================================
// SECTION: Criterion
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::DictCodec;
use crate::error::{precondition, GrantResult, PreconditionViolation};

/// A node in the authorization tree.
///
/// Every variant is reachable only through a validating constructor
/// ([`Criterion::id`], [`Criterion::role`], [`Criterion::role_with_count`],
/// [`Criterion::all`], [`Criterion::any`], [`Criterion::any_with_count`]),
/// so a `Criterion` value is always well-formed: `All`/`Any` children are
/// non-empty, and `Role`/`Any` thresholds are positive integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCriterion", into = "RawCriterion")]
pub enum Criterion {
    /// Matches any principal whose `id` equals the given string.
    Id(String),
    /// Matches when at least `n` principals in the evaluated set carry
    /// `role`.
    Role {
        /// The role name to look for.
        role: String,
        /// How many principals must carry it. Always a positive integer.
        n: u32,
    },
    /// Matches when every child criterion matches (conjunction).
    All(Vec<Criterion>),
    /// Matches when at least `n` of the children match (disjunction).
    Any {
        /// The alternative criteria.
        children: Vec<Criterion>,
        /// How many alternatives must match. Always a positive integer.
        n: u32,
    },
}

impl Criterion {
    /// Builds an id-match criterion.
    ///
    /// # Errors
    /// Returns a violation if `id` is empty.
    pub fn id(id: impl Into<String>) -> GrantResult<Self> {
        let id = id.into();
        precondition(!id.is_empty(), "\"id\" must be a non-empty str.")?;
        Ok(Self::Id(id))
    }

    /// Builds a role-threshold criterion requiring a single matching
    /// principal.
    ///
    /// # Errors
    /// Returns a violation if `role` is empty.
    pub fn role(role: impl Into<String>) -> GrantResult<Self> {
        Self::role_with_count(role, 1)
    }

    /// Builds a role-threshold criterion requiring `n` matching principals.
    ///
    /// # Errors
    /// Returns a violation if `role` is empty or `n` is not a positive
    /// integer.
    pub fn role_with_count(role: impl Into<String>, n: u32) -> GrantResult<Self> {
        let role = role.into();
        precondition(!role.is_empty(), "\"role\" must be a non-empty str.")?;
        precondition(n > 0, "\"n\" must be a positive integer.")?;
        Ok(Self::Role { role, n })
    }

    /// Builds a conjunction over a non-empty sequence of children.
    ///
    /// # Errors
    /// Returns a violation if `children` is empty.
    pub fn all(children: impl IntoIterator<Item = Criterion>) -> GrantResult<Self> {
        let children: Vec<Criterion> = children.into_iter().collect();
        precondition(
            !children.is_empty(),
            "\"all\" must be a non-empty sequence of Criterion.",
        )?;
        Ok(Self::All(children))
    }

    /// Builds a disjunction requiring any one of a non-empty sequence of
    /// children.
    ///
    /// # Errors
    /// Returns a violation if `children` is empty.
    pub fn any(children: impl IntoIterator<Item = Criterion>) -> GrantResult<Self> {
        Self::any_with_count(children, 1)
    }

    /// Builds a disjunction requiring `n` of a non-empty sequence of
    /// children.
    ///
    /// # Errors
    /// Returns a violation if `children` is empty or `n` is not a positive
    /// integer.
    pub fn any_with_count(
        children: impl IntoIterator<Item = Criterion>,
        n: u32,
    ) -> GrantResult<Self> {
        let children: Vec<Criterion> = children.into_iter().collect();
        precondition(
            !children.is_empty(),
            "\"any\" must be a non-empty sequence of Criterion.",
        )?;
        precondition(n > 0, "\"n\" must be a positive integer.")?;
        Ok(Self::Any { children, n })
    }

    /// The minimum group size that could possibly satisfy this criterion.
    ///
    /// Used by the disjoint evaluator to prune searches early: if fewer
    /// principals remain than this lower bound, no subset of the remainder
    /// can satisfy the criterion.
    #[must_use]
    pub(crate) fn min_group_size(&self) -> usize {
        match self {
            Self::Id(_) => 1,
            Self::Role { n, .. } => *n as usize,
            Self::Any { children, .. } => children
                .iter()
                .map(Self::min_group_size)
                .min()
                .unwrap_or(0),
            Self::All(children) => children.iter().map(Self::min_group_size).sum(),
        }
    }
}

impl DictCodec for Criterion {
    fn from_dict(value: Value) -> GrantResult<Self> {
        let raw: RawCriterion = serde_json::from_value(value)
            .map_err(|err| PreconditionViolation::new(format!("\"value\" must be a dict: {err}")))?;
        Self::try_from(raw)
    }

    fn to_dict(&self) -> Value {
        match self {
            Self::Id(id) => {
                let mut map = serde_json::Map::new();
                map.insert("id".to_owned(), Value::String(id.clone()));
                Value::Object(map)
            }
            Self::Role { role, n } => {
                let mut map = serde_json::Map::new();
                map.insert("role".to_owned(), Value::String(role.clone()));
                if *n != 1 {
                    map.insert("n".to_owned(), Value::from(*n));
                }
                Value::Object(map)
            }
            Self::All(children) => {
                let mut map = serde_json::Map::new();
                map.insert(
                    "all".to_owned(),
                    Value::Array(children.iter().map(DictCodec::to_dict).collect()),
                );
                Value::Object(map)
            }
            Self::Any { children, n } => {
                let mut map = serde_json::Map::new();
                map.insert(
                    "any".to_owned(),
                    Value::Array(children.iter().map(DictCodec::to_dict).collect()),
                );
                if *n != 1 {
                    map.insert("n".to_owned(), Value::from(*n));
                }
                Value::Object(map)
            }
        }
    }
}

/// Converts a JSON number (integer or integer-valued float) into a
/// threshold, per §9's fractional-`n` rule: fractional values are accepted
/// only when they carry no fractional part.
fn threshold_from_raw(n: Option<f64>) -> GrantResult<u32> {
    let Some(n) = n else {
        return Ok(1);
    };
    precondition(
        n.fract() == 0.0,
        "\"n\" must be castable to int without losing precision.",
    )?;
    precondition(
        n > 0.0 && n <= f64::from(u32::MAX),
        "\"n\" must be a positive integer.",
    )?;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "fract() == 0.0 and bounds were just checked above"
    )]
    Ok(n as u32)
}

/// Unvalidated proxy used only at the serde boundary; see
/// [`DictCodec::from_dict`] for the validating entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCriterion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    all: Option<Vec<RawCriterion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    any: Option<Vec<RawCriterion>>,
}

impl TryFrom<RawCriterion> for Criterion {
    type Error = PreconditionViolation;

    fn try_from(raw: RawCriterion) -> Result<Self, Self::Error> {
        let has_id = raw.id.as_deref().is_some_and(|s| !s.is_empty());
        let has_role = raw.role.as_deref().is_some_and(|s| !s.is_empty());
        let has_all = raw.all.as_deref().is_some_and(|c| !c.is_empty());
        let has_any = raw.any.as_deref().is_some_and(|c| !c.is_empty());
        let specified = [has_id, has_role, has_all, has_any]
            .into_iter()
            .filter(|b| *b)
            .count();
        precondition(
            specified == 1,
            "the \"id\", \"role\", \"all\", and \"any\" fields are mutually exclusive, and exactly one must be specified.",
        )?;

        if let (true, Some(id)) = (has_id, raw.id) {
            return Criterion::id(id);
        }
        if let (true, Some(role)) = (has_role, raw.role) {
            let n = threshold_from_raw(raw.n)?;
            return Criterion::role_with_count(role, n);
        }
        if let (true, Some(all)) = (has_all, raw.all) {
            let children: GrantResult<Vec<Criterion>> =
                all.into_iter().map(Criterion::try_from).collect();
            return Criterion::all(children?);
        }
        let (true, Some(any)) = (has_any, raw.any) else {
            return Err(PreconditionViolation::new(
                "internal error: exactly-one-of check passed but no field was set.",
            ));
        };
        let n = threshold_from_raw(raw.n)?;
        let children: GrantResult<Vec<Criterion>> =
            any.into_iter().map(Criterion::try_from).collect();
        Criterion::any_with_count(children?, n)
    }
}

impl From<Criterion> for RawCriterion {
    fn from(criterion: Criterion) -> Self {
        match criterion {
            Criterion::Id(id) => Self {
                id: Some(id),
                role: None,
                n: None,
                all: None,
                any: None,
            },
            Criterion::Role { role, n } => Self {
                id: None,
                role: Some(role),
                n: if n == 1 { None } else { Some(f64::from(n)) },
                all: None,
                any: None,
            },
            Criterion::All(children) => Self {
                id: None,
                role: None,
                n: None,
                all: Some(children.into_iter().map(Into::into).collect()),
                any: None,
            },
            Criterion::Any { children, n } => Self {
                id: None,
                role: None,
                n: if n == 1 { None } else { Some(f64::from(n)) },
                all: None,
                any: Some(children.into_iter().map(Into::into).collect()),
            },
        }
    }
}
