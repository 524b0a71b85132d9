//! Decay engine constants: per-type initial stability/difficulty.

use crate::model::NodeType;

/// Per-type initial stability (days) and difficulty, plus the decay math
/// constants used to derive difficulty updates and stability growth.
///
/// Spec §4.1. `NodeType::Chunk`/`Section`/`Raw` reuse `Document`'s
/// profile — they are document-derived content, not distinct algorithmic
/// types, and the spec's initial-value table only names the seven listed
/// here.
#[derive(Debug, Clone, Copy)]
pub struct DecayParams {
    /// Edge weight floor after cascade decay.
    pub edge_floor: f32,
    /// Multiplier applied to an edge's weight on each cascade-decay evaluation.
    pub cascade_factor: f32,
    /// Retrievability threshold below which an edge's endpoint triggers cascade decay.
    pub cascade_trigger_r: f64,
    /// Lifecycle boundary: R above this is ACTIVE.
    pub active_threshold: f64,
    /// Lifecycle boundary: R above this (but below `active_threshold`) is WEAK.
    pub weak_threshold: f64,
    /// Dormancy-day boundaries for DORMANT (twice-banded) / COMPRESS / ARCHIVE.
    pub dormant_band_days: f64,
    pub compress_after_days: f64,
    pub archive_after_days: f64,
}

impl Default for DecayParams {
    fn default() -> Self {
        Self {
            edge_floor: 0.1,
            cascade_factor: 0.8,
            cascade_trigger_r: 0.1,
            active_threshold: 0.5,
            weak_threshold: 0.1,
            dormant_band_days: 60.0,
            compress_after_days: 120.0,
            archive_after_days: 240.0,
        }
    }
}

/// Initial stability in days for a freshly-created node of a given
/// algorithmic type.
pub fn initial_stability(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Note => 30.0,
        NodeType::Concept => 21.0,
        NodeType::Episode => 10.0,
        NodeType::Document | NodeType::Section | NodeType::Chunk | NodeType::Raw => 7.0,
    }
}

/// Initial difficulty (0..=1) for a freshly-created node of a given
/// algorithmic type.
///
/// The spec's base-difficulty table is given per "algorithmic type"
/// (person 0.?, fact, concept, event, note, document, preference); this
/// crate's [`NodeType`] models content kind, not those exact labels, so we
/// anchor `concept`/`note`/`document`/`episode` (event) directly and give
/// the remaining types the spec's `fact`-equivalent baseline (0.3).
pub fn initial_difficulty(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Concept => 0.4,
        NodeType::Note => 0.2,
        NodeType::Document | NodeType::Section | NodeType::Chunk | NodeType::Raw => 0.3,
        NodeType::Episode => 0.35,
    }
}
