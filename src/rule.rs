// src/rule.rs
// ============================================================================
// Module: Rule
// Description: A grant of privileges, conditioned on a Criterion.
// Purpose: Validated, immutable pairing of a privilege set and a who-is-
//          authorized expression.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Rule`] pairs a non-empty, canonical (sorted, deduplicated) set of
//! granted privileges with a single [`Criterion`] describing who is
//! authorized to receive them.

// ============================================================================
// SECTION: Rule
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::DictCodec;
use crate::criterion::Criterion;
use crate::error::{precondition, GrantResult, PreconditionViolation};

/// A grant of privileges to whoever satisfies a [`Criterion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct Rule {
    grant: Vec<String>,
    when: Criterion,
}

impl Rule {
    /// Builds a rule from a non-empty sequence of privileges and a
    /// criterion.
    ///
    /// # Errors
    /// Returns a violation if `grant` is empty or contains an empty string.
    pub fn new(
        grant: impl IntoIterator<Item = impl Into<String>>,
        when: Criterion,
    ) -> GrantResult<Self> {
        let grant: Vec<String> = grant.into_iter().map(Into::into).collect();
        precondition(
            !grant.is_empty(),
            "\"grant\" must be a non-empty sequence of str.",
        )?;
        for priv_name in &grant {
            precondition(
                !priv_name.is_empty(),
                "\"grant\" must be a non-empty sequence of non-empty str.",
            )?;
        }
        let mut canonical = grant;
        canonical.sort();
        canonical.dedup();
        Ok(Self {
            grant: canonical,
            when,
        })
    }

    /// The canonical (sorted, deduplicated) set of granted privileges.
    #[must_use]
    pub fn grant(&self) -> &[String] {
        &self.grant
    }

    /// The criterion describing who is authorized.
    #[must_use]
    pub fn when(&self) -> &Criterion {
        &self.when
    }
}

impl DictCodec for Rule {
    fn from_dict(value: Value) -> GrantResult<Self> {
        let raw: RawRule = serde_json::from_value(value)
            .map_err(|err| PreconditionViolation::new(format!("\"value\" must be a dict: {err}")))?;
        Self::try_from(raw)
    }

    fn to_dict(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "grant".to_owned(),
            Value::Array(self.grant.iter().cloned().map(Value::String).collect()),
        );
        map.insert("when".to_owned(), self.when.to_dict());
        Value::Object(map)
    }
}

/// Unvalidated proxy used only at the serde boundary; see
/// [`DictCodec::from_dict`] for the validating entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    #[serde(default)]
    grant: Option<Vec<String>>,
    #[serde(default)]
    when: Option<Value>,
}

impl TryFrom<RawRule> for Rule {
    type Error = PreconditionViolation;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let grant = raw
            .grant
            .ok_or_else(|| PreconditionViolation::new("\"grant\" must be present."))?;
        let when_value = raw
            .when
            .ok_or_else(|| PreconditionViolation::new("\"when\" must be present."))?;
        let when = Criterion::from_dict(when_value)?;
        Self::new(grant, when)
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        Self {
            grant: Some(rule.grant),
            when: Some(rule.when.to_dict()),
        }
    }
}
