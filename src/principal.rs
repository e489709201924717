// src/principal.rs
// ============================================================================
// Module: Principal
// Description: An actor in an evaluated group, identified by id and/or roles.
// Purpose: Validated, canonical, value-typed construction of group members.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Principal`] is identified by an `id`, a set of role strings, or both.
//! At least one must be present. `roles` is always stored sorted and
//! deduplicated, so equality and hashing are purely structural: two
//! principals are the same principal exactly when their `(id, roles)` pairs
//! match after canonicalization.

// ============================================================================
// SECTION: Principal
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::DictCodec;
use crate::error::{precondition, GrantResult, PreconditionViolation};

/// An actor in an evaluated group.
///
/// Construct with [`Principal::with_id`], [`Principal::with_roles`], or
/// [`Principal::new`]. Every constructor validates and canonicalizes;
/// there is no way to observe a `Principal` with unsorted or duplicated
/// roles, or with neither `id` nor `roles` set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrincipal", into = "RawPrincipal")]
pub struct Principal {
    id: Option<String>,
    roles: Option<Vec<String>>,
}

impl Principal {
    /// Builds a principal from an optional id and an optional role set.
    ///
    /// # Errors
    /// Returns a violation unless at least one of `id`/`roles` is present
    /// and non-empty, or if any role string is empty.
    pub fn new(
        id: Option<impl Into<String>>,
        roles: Option<impl IntoIterator<Item = impl Into<String>>>,
    ) -> GrantResult<Self> {
        let id = id.map(Into::into);
        let roles: Option<Vec<String>> =
            roles.map(|r| r.into_iter().map(Into::into).collect());
        Self::from_parts(id, roles)
    }

    /// Builds a principal identified only by `id`.
    ///
    /// # Errors
    /// Returns a violation if `id` is empty.
    pub fn with_id(id: impl Into<String>) -> GrantResult<Self> {
        Self::from_parts(Some(id.into()), None)
    }

    /// Builds a principal identified only by a non-empty set of roles.
    ///
    /// # Errors
    /// Returns a violation if `roles` is empty or contains an empty string.
    pub fn with_roles(roles: impl IntoIterator<Item = impl Into<String>>) -> GrantResult<Self> {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        Self::from_parts(None, Some(roles))
    }

    fn from_parts(id: Option<String>, roles: Option<Vec<String>>) -> GrantResult<Self> {
        let has_id = id.as_deref().is_some_and(|s| !s.is_empty());
        let has_roles = roles.as_deref().is_some_and(|r| !r.is_empty());
        precondition(
            has_id || has_roles,
            "either \"id\" or \"roles\" must have a meaningful value.",
        )?;

        let id = if has_id { id } else { None };
        let roles = if has_roles {
            let roles = roles.unwrap_or_default();
            for role in &roles {
                precondition(!role.is_empty(), "\"roles\" must be a non-empty sequence of non-empty str.")?;
            }
            let mut canonical = roles;
            canonical.sort();
            canonical.dedup();
            Some(canonical)
        } else {
            None
        };

        Ok(Self { id, roles })
    }

    /// This principal's id, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// This principal's canonical (sorted, deduplicated) roles, if it has
    /// any.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.roles.as_deref().unwrap_or(&[])
    }

    /// Whether this principal carries `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|r| r == role)
    }
}

impl DictCodec for Principal {
    fn from_dict(value: Value) -> GrantResult<Self> {
        let raw: RawPrincipal = serde_json::from_value(value)
            .map_err(|err| PreconditionViolation::new(format!("\"value\" must be a dict: {err}")))?;
        Self::try_from(raw)
    }

    fn to_dict(&self) -> Value {
        let mut map = serde_json::Map::new();
        if let Some(id) = &self.id {
            map.insert("id".to_owned(), Value::String(id.clone()));
        }
        if let Some(roles) = &self.roles {
            map.insert(
                "roles".to_owned(),
                Value::Array(roles.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(map)
    }
}

/// Unvalidated proxy used only at the serde boundary; see
/// [`DictCodec::from_dict`] for the validating entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPrincipal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<String>>,
}

impl TryFrom<RawPrincipal> for Principal {
    type Error = PreconditionViolation;

    fn try_from(raw: RawPrincipal) -> Result<Self, Self::Error> {
        Self::from_parts(raw.id, raw.roles)
    }
}

impl From<Principal> for RawPrincipal {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            roles: principal.roles,
        }
    }
}
