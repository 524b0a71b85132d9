//! Crate-wide error taxonomy.
//!
//! Per the error handling design: this core favors data-shaped results over
//! control-flow exceptions. Only two classes of failure are modeled as
//! `Result::Err` anywhere in this crate:
//!
//! - [`ConfigError`]: boundary validation of injected config/weight/input
//!   values (`SCHEMA_VALIDATION_FAILED`).
//! - [`crate::edit::EditError`]: safe-edit target resolution and version
//!   conflicts.
//!
//! Everything else described as an "error" in the design notes
//! (`UNKNOWN_MODEL`, `TRUNCATION_BUDGET_EXCEEDED`, `EMPTY_CANDIDATE_SET`,
//! `DECAY_MATH_DEGENERATE`) is a silent fallback or an empty/zeroed result,
//! never an `Err`, and is documented on the function that produces it.

/// A value failed validation at a crate boundary.
///
/// Carries the path of the first failing field so callers can report it
/// without re-deriving which value was invalid.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
#[error("schema validation failed at `{path}`: {reason}")]
pub struct ConfigError {
    /// Dotted path to the first failing field, e.g. `weights.semantic`.
    pub path: String,
    /// Human-readable reason.
    pub reason: String,
}

impl ConfigError {
    /// Build a new validation error.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
