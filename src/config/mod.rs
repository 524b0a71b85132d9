//! Canonical weights, thresholds, and budgets.
//!
//! Every tunable named in the spec tables lives here as a small `Copy`
//! value type with a `Default` impl carrying the canonical constant, plus a
//! `validate()` that runs only at the boundary (construction from untrusted
//! input) — never on the hot path. Tests may build any of these by value to
//! inject overrides, matching the teacher's `RerankerConfig`/
//! `ActivationConfig` pattern.

mod budget_params;
mod chunk_params;
mod decay_params;
mod priority_weights;
mod rerank_weights;
mod retention_policy;
mod ssa_params;
mod truncation_params;

pub use budget_params::{BudgetParams, ProviderRatio};
pub use chunk_params::ChunkParams;
pub use decay_params::{initial_difficulty, initial_stability, DecayParams};
pub use priority_weights::PriorityWeights;
pub use rerank_weights::{RerankWeights, SectionProfile};
pub use retention_policy::RetentionPolicy;
pub use ssa_params::{AggregationMode, SsaParams};
pub use truncation_params::TruncationParams;

use crate::error::ConfigError;

/// A set of named weights that must sum to 1.0 (within tolerance).
///
/// Implemented by every weight-vector config type (reranker, priority) so
/// the `|sum(W) - 1| < 1e-3` invariant (spec §8) has one shared check.
pub trait WeightVector {
    /// The individual weights, in a stable order, for summation.
    fn weights(&self) -> Vec<(&'static str, f64)>;

    /// Validate that the weights sum to ~1.0.
    fn validate_sum(&self, path_prefix: &str) -> Result<(), ConfigError> {
        let sum: f64 = self.weights().iter().map(|(_, w)| *w).sum();
        if (sum - 1.0).abs() >= 1e-3 {
            return Err(ConfigError::new(
                path_prefix,
                format!("weights must sum to 1.0 (within 1e-3), got {sum}"),
            ));
        }
        Ok(())
    }
}
