// src/codec.rs
// ============================================================================
// Module: Dictionary Codec
// Description: Uniform dynamic-dictionary / JSON surface shared by the data
//              model types.
// Purpose: Give Principal, Criterion, and Rule the same from_dict/to_dict/
//          from_json/to_json vocabulary, independent of their internal shape.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Mirrors the `from_dict`/`to_dict`/`from_json`/`to_json` free functions
//! each data-model type exposes, giving callers one trait to reach for
//! regardless of which type they're converting.

use serde_json::Value;

use crate::error::{precondition, GrantResult, PreconditionViolation};

// ============================================================================
// SECTION: DictCodec
// ============================================================================

/// A type that can be built from, and rendered to, a dynamic JSON-like
/// dictionary.
///
/// Implementors validate at the boundary: [`DictCodec::from_dict`] and
/// [`DictCodec::from_json`] return a [`crate::error::PreconditionViolation`]
/// for malformed input rather than panicking. Unknown object keys are
/// accepted and ignored, so readers of a newer schema tolerate an older one.
pub trait DictCodec: Sized {
    /// Builds a value from a parsed JSON dictionary.
    ///
    /// # Errors
    /// Returns a violation if `value` does not have the shape this type
    /// requires, or violates one of its construction invariants.
    fn from_dict(value: Value) -> GrantResult<Self>;

    /// Renders this value back to a JSON dictionary, in canonical form.
    fn to_dict(&self) -> Value;

    /// Parses `json_text` and builds a value from it.
    ///
    /// # Errors
    /// Returns a violation if `json_text` is empty, is not valid JSON, or
    /// does not have the shape this type requires.
    fn from_json(json_text: &str) -> GrantResult<Self> {
        precondition(!json_text.is_empty(), "\"json_text\" must be non-empty.")?;
        let value: Value = serde_json::from_str(json_text)
            .map_err(|err| PreconditionViolation::new(format!("invalid JSON: {err}")))?;
        Self::from_dict(value)
    }

    /// Renders this value to a JSON string, in canonical form.
    fn to_json(&self) -> String {
        self.to_dict().to_string()
    }
}
