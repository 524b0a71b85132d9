//! Safe-edit engine: versioned, target-anchored content edits (spec §4.10).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::config::RetentionPolicy;
use crate::model::{
    new_edit_id, BlockType, ConflictResolution, ContentBlock, EditAction, EditOperation,
    EditPosition, EditRecord, EditRequest, EditTarget, FieldChange, Modifier, Node,
};

/// Failure modes for [`safe_edit`]. Carries enough context for the caller
/// to report the conflict without re-reading the node.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum EditError {
    #[error("version mismatch: expected {expected}, node is at {actual} (last modified by {last_modifier:?} at {last_modified})")]
    VersionMismatch {
        expected: u64,
        actual: u64,
        last_modifier: Modifier,
        last_modified: DateTime<Utc>,
    },
    #[error("block not found: {block_id}")]
    BlockNotFound { block_id: String },
    #[error("heading not found: {heading}")]
    HeadingNotFound { heading: String },
    #[error("search text not found: {query}")]
    SearchNotFound { query: String },
}

/// The successful result of applying an edit.
#[derive(Debug, Clone)]
pub struct SafeEditOutcome {
    pub updated_node: Node,
    pub edit_record: EditRecord,
}

/// 32-bit rolling hash of a string: `h = (h << 5) - h + c` per codepoint,
/// initial `0`, absolute value, modulo `2^32`, rendered as zero-padded
/// 8-char lowercase hex (spec §6 "Persisted shapes").
///
/// The accumulator is `i32`, not a wider integer narrowed at the end:
/// `|h|` only commutes with reduction mod `2^32` if every step already
/// happened in 32-bit space, so this keeps the shift/sub/add chain itself
/// in `i32` (wrapping, to match the spec's modular arithmetic) rather than
/// computing in a wider type and truncating after the fact.
pub fn rolling_checksum(s: &str) -> String {
    let mut h: i32 = 0;
    for c in s.chars() {
        h = (h << 5).wrapping_sub(h).wrapping_add(c as i32);
    }
    format!("{:08x}", h.unsigned_abs())
}

fn checksum_of_content(node: &Node) -> String {
    let serialized = serde_json::to_string(&node.content).unwrap_or_default();
    rolling_checksum(&serialized)
}

fn find_heading_block<'a>(blocks: &'a [ContentBlock], heading: &str) -> Option<&'a ContentBlock> {
    for b in blocks {
        if b.block_type == BlockType::Heading && b.text.eq_ignore_ascii_case(heading) {
            return Some(b);
        }
        if let Some(found) = find_heading_block(&b.children, heading) {
            return Some(found);
        }
    }
    None
}

fn find_block_mut<'a>(blocks: &'a mut [ContentBlock], id: &str) -> Option<&'a mut ContentBlock> {
    blocks.iter_mut().find_map(|b| b.find_mut(id))
}

fn apply_to_block(block: &mut ContentBlock, action: EditAction, content: &Option<String>) {
    let text = content.clone().unwrap_or_default();
    match action {
        EditAction::Replace => block.text = text,
        EditAction::Insert => block.text = format!("{text}\n{}", block.text),
        EditAction::Append => block.text = format!("{}\n{text}", block.text),
        EditAction::Delete => block.text = String::new(),
    }
    block.modified_at = Utc::now();
}

fn apply_to_body(body: &str, action: EditAction, content: &Option<String>) -> String {
    let text = content.clone().unwrap_or_default();
    match action {
        EditAction::Replace => text,
        EditAction::Insert => format!("{text}\n\n{body}"),
        EditAction::Append => format!("{body}\n\n{text}"),
        EditAction::Delete => String::new(),
    }
}

fn apply_at_position(body: &str, position: EditPosition, action: EditAction, content: &Option<String>) -> String {
    let text = content.clone().unwrap_or_default();
    match (position, action) {
        (_, EditAction::Delete) => body.to_string(),
        (EditPosition::Start, _) => format!("{text}{body}"),
        (EditPosition::End, _) => format!("{body}{text}"),
    }
}

fn apply_search(body: &str, query: &str, action: EditAction, content: &Option<String>) -> Result<String, EditError> {
    let lower_body = body.to_lowercase();
    let lower_query = query.to_lowercase();
    let Some(byte_pos) = lower_body.find(&lower_query) else {
        return Err(EditError::SearchNotFound { query: query.to_string() });
    };
    let text = content.clone().unwrap_or_default();
    let match_end = byte_pos + query.len();

    Ok(match action {
        EditAction::Replace => format!("{}{text}{}", &body[..byte_pos], &body[match_end..]),
        EditAction::Insert => format!("{}{text}{}", &body[..byte_pos], &body[byte_pos..]),
        EditAction::Append => format!("{}{text}{}", &body[..match_end], &body[match_end..]),
        EditAction::Delete => format!("{}{}", &body[..byte_pos], &body[match_end..]),
    })
}

/// Resolve the target's reverse-content for diffing/undo purposes and
/// apply the operation against a cloned node.
fn apply_operation(node: &mut Node, operation: &EditOperation) -> Result<Vec<FieldChange>, EditError> {
    let mut changes = Vec::new();

    match &operation.target {
        EditTarget::BlockId { block_id } => {
            let blocks = node.content.blocks.as_mut().ok_or_else(|| EditError::BlockNotFound { block_id: block_id.clone() })?;
            let block = find_block_mut(blocks, block_id).ok_or_else(|| EditError::BlockNotFound { block_id: block_id.clone() })?;
            let before = block.text.clone();
            apply_to_block(block, operation.action, &operation.content);
            changes.push(FieldChange {
                path: format!("blocks.{block_id}"),
                before: Some(before),
                after: Some(block.text.clone()),
            });
        }
        EditTarget::Heading { heading } => {
            let blocks = node.content.blocks.as_ref().ok_or_else(|| EditError::HeadingNotFound { heading: heading.clone() })?;
            let block_id = find_heading_block(blocks, heading)
                .ok_or_else(|| EditError::HeadingNotFound { heading: heading.clone() })?
                .id
                .clone();
            let blocks_mut = node.content.blocks.as_mut().expect("checked above");
            let block = find_block_mut(blocks_mut, &block_id).expect("resolved above");
            let before = block.text.clone();
            apply_to_block(block, operation.action, &operation.content);
            changes.push(FieldChange {
                path: format!("blocks.{block_id}"),
                before: Some(before),
                after: Some(block.text.clone()),
            });
        }
        EditTarget::Position { position } => {
            let before = node.content.body.clone().unwrap_or_default();
            let after = apply_at_position(&before, *position, operation.action, &operation.content);
            node.content.body = Some(after.clone());
            changes.push(FieldChange { path: "body".to_string(), before: Some(before), after: Some(after) });
        }
        EditTarget::Search { query } => {
            let before = node.content.body.clone().unwrap_or_default();
            let after = apply_search(&before, query, operation.action, &operation.content)?;
            node.content.body = Some(after.clone());
            changes.push(FieldChange { path: "body".to_string(), before: Some(before), after: Some(after) });
        }
        EditTarget::Full => {
            let before = node.content.body.clone().unwrap_or_default();
            let after = apply_to_body(&before, operation.action, &operation.content);
            node.content.body = Some(after.clone());
            changes.push(FieldChange { path: "body".to_string(), before: Some(before), after: Some(after) });
        }
    }

    Ok(changes)
}

/// Reverse-op synthesis. At `Position`/`Search`/`Full` targets: `replace`
/// reverses to `replace` with the prior content, `insert`/`append` reverse
/// to `delete` of what was inserted, `delete` reverses to `insert` of what
/// was removed. At block-level targets (`BlockId`/`Heading`), every action
/// reverses to `replace` of the recorded prior text (see the comment
/// below for why).
fn synthesize_reverse(operation: &EditOperation, changes: &[FieldChange]) -> EditOperation {
    let prior = changes.first().and_then(|c| c.before.clone());

    // Block-level targets (`BlockId`, and `Heading` which delegates to its
    // resolved block) replace the block's *entire* text with whatever
    // `apply_to_block` computes for the action, rather than mutating a
    // sub-span of it. An insert/append/delete reverse built from the same
    // action-to-action mapping used for body edits re-derives a *new*
    // string from the forward op's own content instead of restoring the
    // prior one byte-for-byte (e.g. reversing a block delete with an
    // insert of the deleted text re-adds it with an extra newline, not the
    // original block text). Reversing to a `Replace` of the recorded
    // `before` is exact for every action, including `Replace` itself.
    let is_block_level = matches!(operation.target, EditTarget::BlockId { .. } | EditTarget::Heading { .. });
    if is_block_level {
        return EditOperation {
            target: operation.target.clone(),
            action: EditAction::Replace,
            content: prior,
        };
    }

    let reverse_action = match operation.action {
        EditAction::Replace => EditAction::Replace,
        EditAction::Insert | EditAction::Append => EditAction::Delete,
        EditAction::Delete => EditAction::Insert,
    };

    let reverse_content = match operation.action {
        EditAction::Replace => prior,
        EditAction::Insert | EditAction::Append => operation.content.clone(),
        EditAction::Delete => prior,
    };

    EditOperation {
        target: operation.target.clone(),
        action: reverse_action,
        content: reverse_content,
    }
}

/// Apply a safe edit to `node`, returning the updated node and its audit
/// record. Never mutates `node` in place; the caller persists
/// `updated_node` itself.
///
/// 1. Reject a stale `expected_version` with [`EditError::VersionMismatch`].
/// 2. Resolve the target against current content; an unresolvable target
///    fails with the matching not-found variant.
/// 3. Apply the operation to a clone of the content.
/// 4. Bump version, `last_modified`, `last_modifier`, and checksum.
/// 5. Synthesize the reverse operation and build the [`EditRecord`].
pub fn safe_edit(node: &Node, request: &EditRequest, now: DateTime<Utc>, modifier: Modifier) -> Result<SafeEditOutcome, EditError> {
    if node.versioning.version != request.expected_version {
        return Err(EditError::VersionMismatch {
            expected: request.expected_version,
            actual: node.versioning.version,
            last_modifier: node.versioning.last_modifier,
            last_modified: node.versioning.last_modified,
        });
    }

    let mut updated = node.clone();
    let changes = apply_operation(&mut updated, &request.operation)?;

    updated.versioning.version += 1;
    updated.versioning.last_modified = now;
    updated.versioning.last_modifier = modifier;
    updated.versioning.checksum = Some(checksum_of_content(&updated));

    let reverse_operation = synthesize_reverse(&request.operation, &changes);

    let edit_record = EditRecord {
        id: new_edit_id(),
        node_id: node.id.clone(),
        timestamp: now,
        actor: modifier,
        from_version: node.versioning.version,
        to_version: updated.versioning.version,
        operation: request.operation.clone(),
        changes,
        undoable: true,
        undo_expires: Some(now + Duration::hours(24)),
        reverse_operation,
        depends_on: Vec::new(),
        dependents: Vec::new(),
    };

    Ok(SafeEditOutcome { updated_node: updated, edit_record })
}

fn affected_block_ids(target: &EditTarget, node: &Node) -> HashSet<String> {
    match target {
        EditTarget::BlockId { block_id } => [block_id.clone()].into_iter().collect(),
        EditTarget::Heading { heading } => node
            .content
            .blocks
            .as_ref()
            .and_then(|blocks| find_heading_block(blocks, heading))
            .map(|b| [b.id.clone()].into_iter().collect())
            .unwrap_or_default(),
        EditTarget::Position { .. } | EditTarget::Search { .. } | EditTarget::Full => HashSet::new(),
    }
}

/// Whether two concurrent edits against the same node can auto-merge:
/// neither targets the whole document, and their affected block-id sets
/// are disjoint.
pub fn can_auto_merge(node: &Node, a: &EditOperation, b: &EditOperation) -> bool {
    let a_is_full = matches!(a.target, EditTarget::Full);
    let b_is_full = matches!(b.target, EditTarget::Full);
    if a_is_full || b_is_full {
        return false;
    }
    let a_ids = affected_block_ids(&a.target, node);
    let b_ids = affected_block_ids(&b.target, node);
    a_ids.is_disjoint(&b_ids)
}

/// Whether an edit record is still eligible for undo: undoable, within its
/// undo window, and nothing downstream depends on it.
pub fn is_undo_eligible(record: &EditRecord, now: DateTime<Utc>) -> bool {
    record.undoable && record.undo_expires.is_some_and(|exp| now <= exp) && record.dependents.is_empty()
}

/// Build the [`EditRequest`] that would undo `record`, if it's still
/// eligible. The request replays the record's synthesized reverse
/// operation with `conflictResolution = abort`.
pub fn build_undo_request(record: &EditRecord, now: DateTime<Utc>) -> Option<EditRequest> {
    if !is_undo_eligible(record, now) {
        return None;
    }
    Some(EditRequest {
        expected_version: record.to_version,
        operation: record.reverse_operation.clone(),
        conflict_resolution: ConflictResolution::Abort,
    })
}

/// Prune an edit-history log: drop records whose age exceeds
/// `retention.max_age_days` *and* whose undo window has expired, then cap
/// the remainder to `retention.max_edits` (newest kept).
pub fn prune(records: &[EditRecord], now: DateTime<Utc>, retention: &RetentionPolicy) -> Vec<EditRecord> {
    let max_age = Duration::days(retention.max_age_days);

    let mut kept: Vec<EditRecord> = records
        .iter()
        .cloned()
        .filter(|r| {
            let age_expired = now - r.timestamp > max_age;
            let undo_expired = r.undo_expires.map_or(true, |exp| now > exp);
            !(age_expired && undo_expired)
        })
        .collect();

    kept.sort_by_key(|r| r.timestamp);
    if kept.len() > retention.max_edits {
        let excess = kept.len() - retention.max_edits;
        kept.drain(0..excess);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AuthoringLifecycle, BlockType, ContentBlock, EditPosition, ExtractionDepth, Modifier,
        NeuralState, NodeContent, NodeState, NodeType, Provenance, ProvenanceSource, TemporalMeta,
        TypeSpecific, Versioning,
    };

    fn base_node(body: &str) -> Node {
        let now = Utc::now();
        Node {
            id: crate::model::new_node_id(),
            node_type: NodeType::Note,
            subtype: None,
            content: NodeContent::new("title", Some(body.to_string())),
            embedding: None,
            temporal: TemporalMeta::ingested_now(),
            neural: NeuralState::fresh(NodeType::Note, now),
            provenance: Provenance { source: ProvenanceSource::Manual, parent_id: None, confidence: 1.0 },
            state: NodeState { extraction_depth: ExtractionDepth::Full, lifecycle: AuthoringLifecycle::Active },
            versioning: Versioning::fresh(now, Modifier::User),
            type_specific: TypeSpecific::None,
            chunk: None,
            parent: None,
        }
    }

    fn node_with_block(block_text: &str) -> (Node, String) {
        let mut node = base_node("body");
        let block = ContentBlock::new(BlockType::Paragraph, block_text);
        let block_id = block.id.clone();
        node.content.blocks = Some(vec![block]);
        (node, block_id)
    }

    #[test]
    fn block_id_insert_round_trips() {
        let (node, block_id) = node_with_block("orig");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation {
                target: EditTarget::BlockId { block_id: block_id.clone() },
                action: EditAction::Insert,
                content: Some("new".to_string()),
            },
            conflict_resolution: ConflictResolution::Abort,
        };
        let now = Utc::now();
        let outcome = safe_edit(&node, &request, now, Modifier::User).unwrap();
        let block = outcome.updated_node.content.blocks.as_ref().unwrap()[0].clone();
        assert_eq!(block.text, "new\norig");

        let undo_request = EditRequest {
            expected_version: 2,
            operation: outcome.edit_record.reverse_operation.clone(),
            conflict_resolution: ConflictResolution::Abort,
        };
        let undone = safe_edit(&outcome.updated_node, &undo_request, now, Modifier::User).unwrap();
        let restored = &undone.updated_node.content.blocks.as_ref().unwrap()[0];
        assert_eq!(restored.id, block_id);
        assert_eq!(restored.text, "orig");
    }

    #[test]
    fn block_id_delete_round_trips() {
        let (node, block_id) = node_with_block("orig");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation {
                target: EditTarget::BlockId { block_id: block_id.clone() },
                action: EditAction::Delete,
                content: None,
            },
            conflict_resolution: ConflictResolution::Abort,
        };
        let now = Utc::now();
        let outcome = safe_edit(&node, &request, now, Modifier::User).unwrap();
        let block = outcome.updated_node.content.blocks.as_ref().unwrap()[0].clone();
        assert_eq!(block.text, "");

        let undo_request = EditRequest {
            expected_version: 2,
            operation: outcome.edit_record.reverse_operation.clone(),
            conflict_resolution: ConflictResolution::Abort,
        };
        let undone = safe_edit(&outcome.updated_node, &undo_request, now, Modifier::User).unwrap();
        let restored = &undone.updated_node.content.blocks.as_ref().unwrap()[0];
        assert_eq!(restored.id, block_id);
        assert_eq!(restored.text, "orig");
    }

    #[test]
    fn safe_edit_round_trip_scenario() {
        // spec §8 scenario 6.
        let node = base_node("foo");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: Some("bar".to_string()) },
            conflict_resolution: ConflictResolution::Abort,
        };
        let now = Utc::now();
        let outcome = safe_edit(&node, &request, now, Modifier::User).unwrap();
        assert_eq!(outcome.updated_node.versioning.version, 2);
        assert_eq!(outcome.updated_node.content.body.as_deref(), Some("bar"));

        let undo_request = EditRequest {
            expected_version: 2,
            operation: outcome.edit_record.reverse_operation.clone(),
            conflict_resolution: ConflictResolution::Abort,
        };
        let undone = safe_edit(&outcome.updated_node, &undo_request, now, Modifier::User).unwrap();
        assert_eq!(undone.updated_node.versioning.version, 3);
        assert_eq!(undone.updated_node.content.body.as_deref(), Some("foo"));
    }

    #[test]
    fn version_mismatch_carries_context() {
        let node = base_node("foo");
        let request = EditRequest {
            expected_version: 99,
            operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: Some("bar".to_string()) },
            conflict_resolution: ConflictResolution::Abort,
        };
        let err = safe_edit(&node, &request, Utc::now(), Modifier::User).unwrap_err();
        match err {
            EditError::VersionMismatch { expected, actual, .. } => {
                assert_eq!(expected, 99);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn search_not_found_is_reported() {
        let node = base_node("foo bar baz");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation {
                target: EditTarget::Search { query: "nonexistent".to_string() },
                action: EditAction::Replace,
                content: Some("x".to_string()),
            },
            conflict_resolution: ConflictResolution::Abort,
        };
        let err = safe_edit(&node, &request, Utc::now(), Modifier::User).unwrap_err();
        assert!(matches!(err, EditError::SearchNotFound { .. }));
    }

    #[test]
    fn search_replace_is_case_insensitive() {
        let node = base_node("Foo Bar Baz");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation {
                target: EditTarget::Search { query: "bar".to_string() },
                action: EditAction::Replace,
                content: Some("QUX".to_string()),
            },
            conflict_resolution: ConflictResolution::Abort,
        };
        let outcome = safe_edit(&node, &request, Utc::now(), Modifier::User).unwrap();
        assert_eq!(outcome.updated_node.content.body.as_deref(), Some("Foo QUX Baz"));
    }

    #[test]
    fn position_start_prepends_to_body() {
        let node = base_node("world");
        let request = EditRequest {
            expected_version: 1,
            operation: EditOperation {
                target: EditTarget::Position { position: EditPosition::Start },
                action: EditAction::Insert,
                content: Some("hello ".to_string()),
            },
            conflict_resolution: ConflictResolution::Abort,
        };
        let outcome = safe_edit(&node, &request, Utc::now(), Modifier::User).unwrap();
        assert_eq!(outcome.updated_node.content.body.as_deref(), Some("hello world"));
    }

    #[test]
    fn rolling_checksum_is_deterministic_and_8_hex_chars() {
        let a = rolling_checksum("hello");
        let b = rolling_checksum("hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn auto_merge_disjoint_block_targets() {
        let node = base_node("body");
        let a = EditOperation { target: EditTarget::BlockId { block_id: "b_one".to_string() }, action: EditAction::Replace, content: None };
        let b = EditOperation { target: EditTarget::BlockId { block_id: "b_two".to_string() }, action: EditAction::Replace, content: None };
        assert!(can_auto_merge(&node, &a, &b));
    }

    #[test]
    fn auto_merge_rejects_full_target() {
        let node = base_node("body");
        let a = EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: None };
        let b = EditOperation { target: EditTarget::BlockId { block_id: "b_two".to_string() }, action: EditAction::Replace, content: None };
        assert!(!can_auto_merge(&node, &a, &b));
    }

    #[test]
    fn auto_merge_rejects_overlapping_block_ids() {
        let node = base_node("body");
        let a = EditOperation { target: EditTarget::BlockId { block_id: "b_one".to_string() }, action: EditAction::Replace, content: None };
        let b = EditOperation { target: EditTarget::BlockId { block_id: "b_one".to_string() }, action: EditAction::Replace, content: None };
        assert!(!can_auto_merge(&node, &a, &b));
    }

    #[test]
    fn undo_eligibility_requires_unexpired_window_and_no_dependents() {
        let record = EditRecord {
            id: "edit_abc123456789".to_string(),
            node_id: "n_abc123456789".to_string(),
            timestamp: Utc::now(),
            actor: Modifier::User,
            from_version: 1,
            to_version: 2,
            operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: Some("x".to_string()) },
            changes: vec![],
            undoable: true,
            undo_expires: Some(Utc::now() + Duration::hours(24)),
            reverse_operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: Some("y".to_string()) },
            depends_on: vec![],
            dependents: vec![],
        };
        assert!(is_undo_eligible(&record, Utc::now()));
        assert!(build_undo_request(&record, Utc::now()).is_some());

        let mut expired = record.clone();
        expired.undo_expires = Some(Utc::now() - Duration::hours(1));
        assert!(!is_undo_eligible(&expired, Utc::now()));

        let mut depended = record;
        depended.dependents = vec!["edit_other0000".to_string()];
        assert!(!is_undo_eligible(&depended, Utc::now()));
    }

    #[test]
    fn prune_drops_expired_records_beyond_retention() {
        let now = Utc::now();
        let retention = RetentionPolicy { max_edits: 100, max_age_days: 30, undo_window_hours: 24 };

        let old_expired = EditRecord {
            id: "edit_old00000001".to_string(),
            node_id: "n_abc123456789".to_string(),
            timestamp: now - Duration::days(40),
            actor: Modifier::User,
            from_version: 1,
            to_version: 2,
            operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: None },
            changes: vec![],
            undoable: true,
            undo_expires: Some(now - Duration::days(39)),
            reverse_operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: None },
            depends_on: vec![],
            dependents: vec![],
        };
        let recent = EditRecord { timestamp: now, id: "edit_new00000001".to_string(), ..old_expired.clone() };

        let pruned = prune(&[old_expired, recent], now, &retention);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].id, "edit_new00000001");
    }

    #[test]
    fn prune_caps_to_max_edits_keeping_newest() {
        let now = Utc::now();
        let retention = RetentionPolicy { max_edits: 2, max_age_days: 30, undo_window_hours: 24 };
        let make = |i: i64| EditRecord {
            id: format!("edit_{i:012}"),
            node_id: "n_abc123456789".to_string(),
            timestamp: now - Duration::hours(i),
            actor: Modifier::User,
            from_version: 1,
            to_version: 2,
            operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: None },
            changes: vec![],
            undoable: true,
            undo_expires: Some(now + Duration::hours(1)),
            reverse_operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: None },
            depends_on: vec![],
            dependents: vec![],
        };
        let records: Vec<EditRecord> = (0..5).map(make).collect();
        let pruned = prune(&records, now, &retention);
        assert_eq!(pruned.len(), 2);
        // newest records have the smallest `i` (closest to `now`).
        assert!(pruned.iter().all(|r| r.id == "edit_000000000000" || r.id == "edit_000000000001"));
    }
}
