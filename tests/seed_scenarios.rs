//! Crate-root integration coverage for the spec §8 seed scenarios.
//!
//! These exercise the public API end-to-end, one test per scenario, as a
//! companion to the colocated `#[cfg(test)]` unit tests that check each
//! module's internals in isolation.

use chrono::{TimeZone, Utc};

use engram_core::config::{BudgetParams, DecayParams, RerankWeights};
use engram_core::decay::{decay_state, derive_lifecycle, retrievability, stability_on_access, DecayLifecycle};
use engram_core::edit::safe_edit;
use engram_core::external::{ModelInfo, ModelRegistry};
use engram_core::model::{
    AuthoringLifecycle, ConflictResolution, EditAction, EditOperation, EditRequest, EditTarget,
    ExtractionDepth, Modifier, NeuralState, Node, NodeContent, NodeState, NodeType, Provenance,
    ProvenanceSource, TemporalMeta, TypeSpecific, Versioning,
};
use engram_core::pack::attention_reorder;
use engram_core::reranker::{rerank, CandidateSignals, GraphMetrics};
use engram_core::budget::{allocate, AllocationAction, AllocationRequest};

struct FixtureRegistry(Vec<ModelInfo>);

impl ModelRegistry for FixtureRegistry {
    fn lookup(&self, model_id: &str) -> Option<ModelInfo> {
        self.0.iter().find(|m| m.id == model_id).cloned()
    }
    fn all(&self) -> Vec<ModelInfo> {
        self.0.clone()
    }
}

fn registry() -> FixtureRegistry {
    FixtureRegistry(vec![
        ModelInfo {
            id: "claude-sonnet-4".into(),
            provider: "anthropic".into(),
            context_window: 200_000,
            response_buffer_tokens: Some(16_000),
        },
        ModelInfo {
            id: "gpt-4o".into(),
            provider: "openai".into(),
            context_window: 128_000,
            response_buffer_tokens: Some(12_000),
        },
    ])
}

fn base_node(body: &str) -> Node {
    let now = Utc::now();
    Node {
        id: engram_core::model::new_node_id(),
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

/// Scenario 1: decay milestone. stability=7, last_accessed=now-7 days ->
/// R ~= exp(-1), lifecycle WEAK (above the WEAK floor, below ACTIVE); after
/// an access at difficulty 0.3, stability grows to 14.875 and R resets to 1.0.
#[test]
fn scenario_1_decay_milestone() {
    let params = DecayParams::default();
    let (r, lifecycle) = decay_state(7.0, 7.0, &params);
    assert!((r - std::f64::consts::E.recip()).abs() < 1e-9);
    assert_eq!(lifecycle, DecayLifecycle::Weak);

    let grown = stability_on_access(7.0, 0.3);
    assert!((grown - 14.875).abs() < 1e-9);
    assert!((retrievability(0.0, grown) - 1.0).abs() < 1e-9);
    assert_eq!(derive_lifecycle(1.0, 0.0, &params), DecayLifecycle::Active);
}

/// Scenario 2: rerank stability. Two candidates differing only in semantic
/// score score apart by exactly `0.30 * (0.9 - 0.5)` under default weights.
#[test]
fn scenario_2_rerank_stability() {
    let now = Utc::now();
    let candidate = |id: &str, semantic: f32| CandidateSignals {
        id: id.to_string(),
        semantic_score: Some(semantic),
        bm25_score: 0.0,
        graph_score: Some(0.0),
        last_accessed: now - chrono::Duration::days(30),
        created_at: now - chrono::Duration::days(30),
        access_count: 0,
        inbound_edge_count: 0,
        subtype: None,
    };

    let results = rerank(
        &[candidate("a", 0.9), candidate("b", 0.5)],
        GraphMetrics { avg_inbound_edges: 0.0 },
        Some(RerankWeights::default()),
        now,
    );
    let score_a = results.iter().find(|r| r.id == "a").unwrap().score;
    let score_b = results.iter().find(|r| r.id == "b").unwrap().score;
    assert!((score_a - score_b - 0.30 * 0.4).abs() < 1e-9);
}

/// Scenario 3: attention reorder of a 5-element priority-sorted list.
#[test]
fn scenario_3_attention_reorder() {
    let input = ["n1", "n2", "n3", "n4", "n5"];
    assert_eq!(attention_reorder(&input), ["n2", "n3", "n4", "n5", "n1"]);
}

/// Scenario 4: budget allocate for claude-sonnet-4 under the worked
/// request; both retrieved and history usage fit their computed splits,
/// so the action is `proceed`.
#[test]
fn scenario_4_budget_allocate_claude_sonnet_4() {
    let reg = registry();
    let params = BudgetParams::default();
    let request = AllocationRequest {
        model_id: "claude-sonnet-4",
        user_tokens: 2500,
        retrieved_tokens: 80_000,
        history_tokens: 45_000,
    };
    let alloc = allocate(&request, &reg, &params).unwrap();
    assert_eq!(alloc.action, AllocationAction::Proceed);
    assert_eq!(alloc.retrieved_alloc, 80_000);
    assert_eq!(alloc.history_alloc, 45_000);
}

/// Scenario 5: sparse retrieval widens the response buffer by 4000 tokens
/// and recomputes the split without mutating the original budget.
#[test]
fn scenario_5_sparse_retrieval() {
    let reg = registry();
    let params = BudgetParams::default();
    let budget = engram_core::budget::model_budget("gpt-4o", &reg, &params).unwrap();
    let original_buffer = budget.response_buffer_tokens;

    let widened = engram_core::budget::sparse_reallocate(&budget);
    assert_eq!(widened.response_buffer_tokens, original_buffer + 4000);
    assert_eq!(budget.response_buffer_tokens, original_buffer);
}

/// Scenario 6: safe-edit round-trip. A full-body replace bumps the
/// version and can be undone by replaying the synthesized reverse
/// operation, restoring the original content and bumping the version again.
#[test]
fn scenario_6_safe_edit_round_trip() {
    let node = base_node("foo");
    let request = EditRequest {
        expected_version: 1,
        operation: EditOperation { target: EditTarget::Full, action: EditAction::Replace, content: Some("bar".to_string()) },
        conflict_resolution: ConflictResolution::Abort,
    };
    let now = Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap();
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
