//! Graph edges (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::new_node_id;

/// The kind of relationship an edge expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    RelatesTo,
    PartOf,
    Causes,
    Precedes,
    SimilarTo,
    MentionedIn,
    DerivedFrom,
    Contradicts,
    Supersedes,
    UserLinked,
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub edge_type: EdgeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub source_id: String,
    pub target_id: String,
    /// `0..=1`, subject to cascade decay; floored at `0.1` (spec §4.1).
    pub neural_weight: f32,
    pub strength: f32,
    pub confidence: f32,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    /// Construct a new edge with a freshly-generated id and full weight.
    pub fn new(edge_type: EdgeType, source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            id: format!("e_{}", &new_node_id()[2..]),
            edge_type,
            subtype: None,
            source_id: source_id.into(),
            target_id: target_id.into(),
            neural_weight: 1.0,
            strength: 1.0,
            confidence: 1.0,
            created_at: Utc::now(),
        }
    }
}

/// Index of a node's inbound edges, derivable from the full edge set
/// (spec §3: "a node's inbound set is derivable").
pub fn inbound_edges<'a>(edges: &'a [Edge], node_id: &str) -> Vec<&'a Edge> {
    edges.iter().filter(|e| e.target_id == node_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_edges_filters_by_target() {
        let edges = vec![
            Edge::new(EdgeType::RelatesTo, "a", "b"),
            Edge::new(EdgeType::Causes, "c", "b"),
            Edge::new(EdgeType::Causes, "b", "d"),
        ];
        let inbound = inbound_edges(&edges, "b");
        assert_eq!(inbound.len(), 2);
    }
}
