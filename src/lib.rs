//! # engram-core
//!
//! Algorithmic core of a personal knowledge-memory engine: given a graph of
//! typed nodes and edges maintained by a caller-supplied persistence layer,
//! this crate derives what decays, what's worth retrieving, and what fits in
//! a model's context window.
//!
//! Every function here is pure — no network calls, no disk access, no
//! clock reads baked into the math (callers pass `now` explicitly wherever
//! it matters). The three collaborators this core assumes but never
//! implements — model metadata, embeddings/similarity, and node/edge
//! storage — are named as plain traits in [`external`]; the embedding
//! application wires concrete implementations up to them.
//!
//! ## Modules
//!
//! - [`model`] — the typed node/edge/block/edit-record shapes everything
//!   else operates on.
//! - [`config`] — canonical weights, thresholds, and budgets as small
//!   `Default` value types.
//! - [`decay`] — FSRS-derived retrievability, stability growth, lifecycle
//!   derivation, and cascade edge decay.
//! - [`reranker`] — six-signal weighted reranking with section-specific
//!   weight profiles.
//! - [`ssa`] — bounded spreading activation over the node graph.
//! - [`tps`] — natural-language time expression parsing.
//! - [`chunk`] — document chunking and retrieval-time chunk expansion.
//! - [`budget`] — per-model context-window budget derivation and allocation.
//! - [`pack`] — node prioritization, critical-first packing, and the
//!   Lost-in-the-Middle attention reorder.
//! - [`truncate`] — the four-tier truncation ladder.
//! - [`history`] — conversation-history windowing.
//! - [`edit`] — the versioned, conflict-checked safe-edit engine.
//! - [`external`] — trait seams for persistence, embeddings, and model
//!   metadata.
//!
//! ## Quick start
//!
//! ```
//! use engram_core::decay::{retrievability, derive_lifecycle};
//! use engram_core::config::DecayParams;
//!
//! let params = DecayParams::default();
//! let r = retrievability(10.0, 21.0);
//! let lifecycle = derive_lifecycle(r, 10.0, &params);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod model;

pub mod budget;
pub mod chunk;
pub mod decay;
pub mod edit;
pub mod external;
pub mod history;
pub mod pack;
pub mod reranker;
pub mod ssa;
pub mod tps;
pub mod truncate;

mod error;

pub use error::ConfigError;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persisted-aggregate schema version (spec §6), re-exported here since
/// several modules' persisted shapes share it.
pub const SCHEMA_VERSION: u32 = budget::SCHEMA_VERSION;

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage.
pub mod prelude {
    pub use crate::budget::{allocate, model_budget, Allocation, AllocationAction, AllocationRequest, ModelBudget};
    pub use crate::chunk::{retrieval_action, RetrievalAction};
    pub use crate::config::{BudgetParams, DecayParams, PriorityWeights, RerankWeights, RetentionPolicy, SsaParams, TruncationParams};
    pub use crate::decay::{decay_state, derive_lifecycle, retrievability, DecayLifecycle};
    pub use crate::edit::{safe_edit, EditError, SafeEditOutcome};
    pub use crate::external::{EmbeddingOracle, ModelInfo, ModelRegistry, PersistenceAdapter};
    pub use crate::history::{window, HistoryWindow};
    pub use crate::model::{Edge, EdgeType, Node, NodeContent, NodeType};
    pub use crate::pack::{attention_reorder, pack, PackCandidate, PackedContext};
    pub use crate::reranker::{rerank, CandidateSignals, GraphMetrics, RerankResult};
    pub use crate::ssa::{spread, ActivatedNode, OutEdge};
    pub use crate::tps::{parse, TemporalExpression};
    pub use crate::truncate::{select_tier, Tier};
}
