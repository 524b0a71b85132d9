//! Trait contracts consumed, not implemented, by this crate (spec §6).
//!
//! Persistence, embedding generation, and model metadata are external
//! collaborators per spec.md §1; the embedding application wires concrete
//! implementations up to these traits. Mirrors the way the teacher crate
//! separates its `storage`/`embeddings` modules from the pure algorithmic
//! core, except here those modules don't exist — only their seams do.

use crate::model::{Edge, Node};

/// What a model registry knows about one model id.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub id: String,
    pub provider: String,
    pub context_window: u32,
    /// `None` when the registry doesn't carry a model-specific response
    /// buffer; callers fall back to [`crate::config::BudgetParams::fallback_response_buffer`].
    pub response_buffer_tokens: Option<u32>,
}

/// Resolves a model id to its registry metadata. Unknown ids are handled
/// by the caller (spec §6: "unknown id → caller substitutes a default"),
/// not by this trait.
pub trait ModelRegistry {
    fn lookup(&self, model_id: &str) -> Option<ModelInfo>;
    /// All known models, used to find a fallback when a requested model
    /// id isn't registered.
    fn all(&self) -> Vec<ModelInfo>;

    /// The model with the smallest context window, used as the fallback
    /// budget for an unrecognized model id.
    fn smallest(&self) -> Option<ModelInfo> {
        self.all().into_iter().min_by_key(|m| m.context_window)
    }
}

/// Given text, produce an embedding vector; given two vectors, produce a
/// cosine similarity in `[0, 1]`. Not implemented in the core (spec §6).
pub trait EmbeddingOracle {
    fn embed(&self, text: &str) -> Vec<f32>;
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Primitive node/edge storage and a BM25 candidate search, consumed by
/// the core rather than implemented by it.
pub trait PersistenceAdapter {
    fn get_node(&self, id: &str) -> Option<Node>;
    fn put_node(&self, node: &Node);
    fn edges_from(&self, node_id: &str) -> Vec<Edge>;
    fn edges_to(&self, node_id: &str) -> Vec<Edge>;
    /// BM25 candidates for a text query, already scored by the adapter.
    fn bm25_candidates(&self, query: &str, limit: usize) -> Vec<(String, f32)>;
}
