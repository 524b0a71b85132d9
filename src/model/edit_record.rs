//! Edit requests, operations, and the append-only edit-history record
//! (spec §3, §4.10).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::Modifier;

/// How an edit target is resolved against a node's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EditTarget {
    BlockId { block_id: String },
    Heading { heading: String },
    Position { position: EditPosition },
    Search { query: String },
    Full,
}

/// Which end of the body a `position` target anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditPosition {
    Start,
    End,
}

/// What to do at the resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Replace,
    Insert,
    Append,
    Delete,
}

/// A single edit operation: where, what action, and the new content (when
/// the action needs one).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOperation {
    pub target: EditTarget,
    pub action: EditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A safe-edit request: an operation plus the version the caller last
/// observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditRequest {
    pub expected_version: u64,
    pub operation: EditOperation,
    #[serde(default)]
    pub conflict_resolution: ConflictResolution,
}

/// How a caller wants version conflicts handled on undo/retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    #[default]
    Abort,
    Retry,
}

/// A single changed path within an edit (spec §3: "path/before/after").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// An append-only record of a single successful edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecord {
    pub id: String,
    pub node_id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: Modifier,
    pub from_version: u64,
    pub to_version: u64,
    pub operation: EditOperation,
    pub changes: Vec<FieldChange>,
    pub undoable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undo_expires: Option<DateTime<Utc>>,
    pub reverse_operation: EditOperation,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub dependents: Vec<String>,
}
