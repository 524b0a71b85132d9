//! Context-window priority factor weights.

use super::WeightVector;
use crate::error::ConfigError;

/// Weights for the five node-priority factors. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityWeights {
    /// Retrieval (reranker) score weight.
    pub retrieval_score: f64,
    /// Whether the node is explicitly mentioned in the query.
    pub query_mentioned: f64,
    /// Recency weight.
    pub recency: f64,
    /// Graph connectivity to already-included nodes.
    pub connectivity: f64,
    /// Caller-assigned intrinsic importance.
    pub importance: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            retrieval_score: 0.40,
            query_mentioned: 0.25,
            recency: 0.15,
            connectivity: 0.10,
            importance: 0.10,
        }
    }
}

impl WeightVector for PriorityWeights {
    fn weights(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("retrieval_score", self.retrieval_score),
            ("query_mentioned", self.query_mentioned),
            ("recency", self.recency),
            ("connectivity", self.connectivity),
            ("importance", self.importance),
        ]
    }
}

impl PriorityWeights {
    /// Validate this weight vector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in self.weights() {
            if w < 0.0 {
                return Err(ConfigError::new(format!("priority.{name}"), "weight must be non-negative"));
            }
        }
        self.validate_sum("priority")
    }
}
