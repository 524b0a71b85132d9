//! Typed graph entities: nodes, edges, content blocks, and edit records.
//!
//! Spec §3. Duck-typed nested content is re-expressed as a tagged-variant
//! block tree with stable ids (see [`block`]); global constant tables
//! become the `Default` value types in [`crate::config`]; everything here
//! is plain data — validation happens at the boundary via
//! [`Node::validate`], never inline in getters.

mod block;
mod edge;
mod edit_record;
mod ids;
mod node;

pub use block::{ids_are_unique, BlockType, ContentBlock};
pub use edge::{inbound_edges, Edge, EdgeType};
pub use edit_record::{
    ConflictResolution, EditAction, EditOperation, EditPosition, EditRecord, EditRequest,
    EditTarget, FieldChange,
};
pub use ids::{is_valid_id, new_block_id, new_edit_id, new_node_id};
pub use node::{
    AuthoringLifecycle, ChunkFields, DocumentSpecific, EmbeddingMeta, EpisodeSpecific,
    EventTime, EventTimeSource, ExtractionDepth, ExtractionStatus, Modifier, NeuralState, Node,
    NodeContent, NodeState, NodeType, ParentFields, Provenance, ProvenanceSource, RawSpecific,
    SectionSpecific, TemporalConfidenceQuad, TemporalMeta, TimeReference, TypeSpecific,
    Versioning,
};
