//! Placeholder substitution inside spec values.
//!
//! A spec may carry placeholder strings in value positions; materialization
//! resolves them against a caller-supplied binding table. Lookup is
//! whole-string: `"accent"` resolves when the table binds `accent`,
//! `"color: accent"` never does. There is no interpolation syntax.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Placeholder-to-value bindings consulted during materialization.
pub type Substitutions = HashMap<String, Value>;

/// Maximum depth substitution will descend into a structured value.
///
/// Spliced bindings are not rescanned, so lookups cannot cycle; the limit
/// bounds plain recursion through pathologically nested input. Subtrees
/// past it are kept unchanged.
const MAX_SUBSTITUTION_DEPTH: u32 = 32;

/// Raised when a binding cannot fill the position that named it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstituteError {
    /// The bound value has structure that a scalar slot cannot hold.
    #[error("value for '{key}' is not a scalar and cannot be assigned here")]
    UnassignableValue {
        /// The placeholder or property name whose value was rejected.
        key: String,
    },
}

/// Resolves one text position against the binding table.
///
/// An unbound string passes through unchanged. Strings, numbers, and
/// booleans fill a text position (numbers and booleans in their display
/// form); `null`, arrays, and objects do not, and the caller decides
/// whether to keep the original text or fail.
///
/// # Errors
///
/// [`SubstituteError::UnassignableValue`] when the bound value is not a
/// scalar.
#[allow(clippy::implicit_hasher)]
pub fn try_substitute_text(
    text: &str,
    substitutions: &Substitutions,
) -> Result<String, SubstituteError> {
    match substitutions.get(text) {
        None => Ok(text.to_owned()),
        Some(Value::String(replacement)) => Ok(replacement.clone()),
        Some(Value::Number(replacement)) => Ok(replacement.to_string()),
        Some(Value::Bool(replacement)) => Ok(replacement.to_string()),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) => {
            Err(SubstituteError::UnassignableValue {
                key: text.to_owned(),
            })
        }
    }
}

/// Resolves placeholder strings anywhere inside a property value.
///
/// Strings are looked up exactly as in [`try_substitute_text`], but any
/// bound value may be spliced in, structure and all. Objects and arrays
/// are walked member by member; spliced values are not walked again, so
/// a binding can neither chain into another nor loop.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn substitute_value(value: &Value, substitutions: &Substitutions) -> Value {
    substitute_at_depth(value, substitutions, 0)
}

fn substitute_at_depth(value: &Value, substitutions: &Substitutions, depth: u32) -> Value {
    if depth > MAX_SUBSTITUTION_DEPTH {
        return value.clone();
    }
    match value {
        Value::String(text) => substitutions.get(text).unwrap_or(value).clone(),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_at_depth(item, substitutions, depth + 1))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, entry)| {
                    (name.clone(), substitute_at_depth(entry, substitutions, depth + 1))
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
