//! The universal knowledge node (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::ContentBlock;
use crate::error::ConfigError;

// ============================================================================
// NODE TYPE
// ============================================================================

/// The kind of knowledge a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Concept,
    Episode,
    Document,
    Section,
    Chunk,
    Note,
    Raw,
}

impl NodeType {
    /// Concepts and episodes require a non-empty subtype (spec §3 invariant).
    pub fn requires_subtype(&self) -> bool {
        matches!(self, NodeType::Concept | NodeType::Episode)
    }
}

// ============================================================================
// CONTENT
// ============================================================================

/// A node's content payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<ContentBlock>>,
}

impl NodeContent {
    /// Construct content from a title and plain-text body only.
    pub fn new(title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            title: title.into(),
            body,
            summary: None,
            blocks: None,
        }
    }
}

// ============================================================================
// EMBEDDING
// ============================================================================

/// Dense-vector embedding metadata. The vector and similarity math live
/// behind the [`crate::external`] embedding/similarity oracle contract —
/// this is only the persisted metadata shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingMeta {
    pub vector: Vec<f32>,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// TEMPORAL
// ============================================================================

/// Where an event timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTimeSource {
    Explicit,
    Inferred,
    UserStated,
}

/// A resolved event time with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub time: DateTime<Utc>,
    pub confidence: f64,
    pub source: EventTimeSource,
}

/// A time expression found in the node's content, resolved to an absolute
/// instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeReference {
    pub text: String,
    pub resolved: DateTime<Utc>,
    pub confidence: f64,
}

/// Temporal metadata: when the node entered the graph, and what it says
/// about time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalMeta {
    pub ingestion_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<EventTime>,
    #[serde(default)]
    pub time_references: Vec<TimeReference>,
}

impl TemporalMeta {
    /// Construct metadata for a node ingested right now, with no event time.
    pub fn ingested_now() -> Self {
        Self {
            ingestion_time: Utc::now(),
            event_time: None,
            time_references: Vec::new(),
        }
    }
}

// ============================================================================
// NEURAL STATE
// ============================================================================

/// FSRS-derived neural fields driving the decay engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuralState {
    /// Stability in days, `>= 0`, capped at 365.
    pub stability: f64,
    /// Retrievability, `0..=1`.
    pub retrievability: f64,
    /// Difficulty, `0..=1`.
    pub difficulty: f64,
    pub access_count: u32,
    pub last_accessed: DateTime<Utc>,
}

impl NeuralState {
    /// A freshly-ingested node's neural state for the given algorithmic type.
    pub fn fresh(node_type: NodeType, now: DateTime<Utc>) -> Self {
        Self {
            stability: crate::config::initial_stability(node_type).min(365.0),
            retrievability: 1.0,
            difficulty: crate::config::initial_difficulty(node_type),
            access_count: 0,
            last_accessed: now,
        }
    }

    /// `true` if every field is within its declared range.
    pub fn is_valid(&self) -> bool {
        (0.0..=365.0).contains(&self.stability)
            && (0.0..=1.0).contains(&self.retrievability)
            && (0.0..=1.0).contains(&self.difficulty)
    }
}

// ============================================================================
// PROVENANCE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceSource {
    Extraction,
    Manual,
    Inference,
    Import,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source: ProvenanceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub confidence: f64,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionDepth {
    Summary,
    Section,
    Full,
}

/// Authoring lifecycle — distinct from the decay engine's derived
/// [`crate::decay::DecayLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoringLifecycle {
    Working,
    Active,
    Superseded,
    Dormant,
    Archived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    pub extraction_depth: ExtractionDepth,
    pub lifecycle: AuthoringLifecycle,
}

// ============================================================================
// VERSIONING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    User,
    Ai,
    System,
    Sync,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    pub version: u64,
    pub last_modified: DateTime<Utc>,
    pub last_modifier: Modifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl Versioning {
    pub fn fresh(now: DateTime<Utc>, modifier: Modifier) -> Self {
        Self {
            version: 1,
            last_modified: now,
            last_modifier: modifier,
            checksum: None,
        }
    }
}

// ============================================================================
// TYPE-SPECIFIC BAGS
// ============================================================================

/// The source/granularity/interpretation confidence product for an
/// episode's temporal claim (spec §3 invariant:
/// `temporal_confidence.combined = source * granularity * interpretation`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalConfidenceQuad {
    pub source: f64,
    pub granularity: f64,
    pub interpretation: f64,
    pub combined: f64,
}

impl TemporalConfidenceQuad {
    pub fn new(source: f64, granularity: f64, interpretation: f64) -> Self {
        Self {
            source,
            granularity,
            interpretation,
            combined: source * granularity * interpretation,
        }
    }

    /// `true` if `combined` actually equals the product of the three factors.
    pub fn is_consistent(&self) -> bool {
        (self.combined - self.source * self.granularity * self.interpretation).abs() < 1e-9
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSpecific {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub concept_links: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    pub temporal_confidence: TemporalConfidenceQuad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Pending,
    Partial,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSpecific {
    pub format: String,
    pub word_count: u32,
    #[serde(default)]
    pub sections: Vec<String>,
    pub extraction_status: ExtractionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpecific {
    pub document_id: String,
    pub heading: String,
    pub position: u32,
    #[serde(default)]
    pub concepts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecific {
    pub content_type: String,
    pub file_size: u64,
    pub extraction_status: ExtractionStatus,
}

/// The type-specific attribute bag, discriminated by [`NodeType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeSpecific {
    Episode(EpisodeSpecific),
    Document(DocumentSpecific),
    Section(SectionSpecific),
    Raw(RawSpecific),
    None,
}

/// Fields present on chunk nodes (spec §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkFields {
    pub parent_id: String,
    pub chunk_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_chunk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_chunk_id: Option<String>,
    pub token_count: u32,
}

/// Fields present on parent (chunked-document) nodes (spec §4.8).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentFields {
    pub is_parent: bool,
    pub child_ids: Vec<String>,
    pub total_tokens: u32,
    pub total_chunks: u32,
    pub document_type: String,
}

// ============================================================================
// NODE
// ============================================================================

/// A node in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub content: NodeContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingMeta>,
    pub temporal: TemporalMeta,
    pub neural: NeuralState,
    pub provenance: Provenance,
    pub state: NodeState,
    pub versioning: Versioning,
    pub type_specific: TypeSpecific,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<ChunkFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentFields>,
}

impl Node {
    /// `true` if this is a concept/episode with a non-empty subtype, or a
    /// node type that doesn't require one.
    pub fn has_valid_subtype(&self) -> bool {
        if self.node_type.requires_subtype() {
            self.subtype.as_deref().is_some_and(|s| !s.trim().is_empty())
        } else {
            true
        }
    }

    /// Validate the node-level invariants from spec §3.
    ///
    /// Does not validate block-id uniqueness against sibling nodes — that's
    /// scoped to a single node's own block forest, checked separately via
    /// [`super::block::ids_are_unique`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.has_valid_subtype() {
            return Err(ConfigError::new("subtype", "concept/episode nodes require a non-empty subtype"));
        }
        if !self.neural.is_valid() {
            return Err(ConfigError::new("neural", "neural fields out of declared range"));
        }
        if !(0.0..=1.0).contains(&self.provenance.confidence) {
            return Err(ConfigError::new("provenance.confidence", "must be in [0, 1]"));
        }
        if let Some(blocks) = &self.content.blocks {
            if !super::block::ids_are_unique(blocks) {
                return Err(ConfigError::new("content.blocks", "block ids must be unique within a node"));
            }
        }
        if let TypeSpecific::Episode(e) = &self.type_specific {
            if !e.temporal_confidence.is_consistent() {
                return Err(ConfigError::new(
                    "type_specific.temporal_confidence",
                    "combined must equal source * granularity * interpretation",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_node(node_type: NodeType, subtype: Option<&str>) -> Node {
        let now = Utc::now();
        Node {
            id: super::super::ids::new_node_id(),
            node_type,
            subtype: subtype.map(str::to_string),
            content: NodeContent::new("title", None),
            embedding: None,
            temporal: TemporalMeta::ingested_now(),
            neural: NeuralState::fresh(node_type, now),
            provenance: Provenance {
                source: ProvenanceSource::Manual,
                parent_id: None,
                confidence: 1.0,
            },
            state: NodeState {
                extraction_depth: ExtractionDepth::Full,
                lifecycle: AuthoringLifecycle::Active,
            },
            versioning: Versioning::fresh(now, Modifier::User),
            type_specific: TypeSpecific::None,
            chunk: None,
            parent: None,
        }
    }

    #[test]
    fn concept_without_subtype_is_invalid() {
        let node = base_node(NodeType::Concept, None);
        assert!(node.validate().is_err());
    }

    #[test]
    fn concept_with_subtype_is_valid() {
        let node = base_node(NodeType::Concept, Some("architecture"));
        assert!(node.validate().is_ok());
    }

    #[test]
    fn note_does_not_require_subtype() {
        let node = base_node(NodeType::Note, None);
        assert!(node.validate().is_ok());
    }

    #[test]
    fn temporal_confidence_quad_checks_product() {
        let q = TemporalConfidenceQuad::new(0.9, 0.85, 0.9);
        assert!(q.is_consistent());
        let mut bad = q;
        bad.combined += 0.5;
        assert!(!bad.is_consistent());
    }
}
