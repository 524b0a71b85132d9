//! Spreading-activation traversal parameters.

/// How activation is combined when a node is reached by more than one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// Accumulate activation across all paths that reach a node.
    Sum,
    /// Keep only the strongest path's activation.
    Max,
}

/// Bounded-traversal parameters for [`crate::ssa`].
///
/// The canonical hop-decay default is `0.5` (the value in the spec's
/// `ALGORITHM_PARAMS` table); `0.80` appears in some test fixtures as an
/// alternative "aggressive spread" profile, not as the default — see
/// [`SsaParams::aggressive`] and DESIGN.md's Open Questions resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsaParams {
    /// Activation assigned to seed nodes.
    pub initial_activation: f64,
    /// Multiplier applied to activation per traversed hop.
    pub hop_decay: f64,
    /// Activation below this value is not propagated further.
    pub min_threshold: f64,
    /// Maximum traversal depth from any seed.
    pub max_hops: u32,
    /// Maximum number of distinct nodes visited.
    pub max_nodes: usize,
    /// Aggregation strategy for nodes reached via multiple paths.
    pub aggregation: AggregationMode,
}

impl Default for SsaParams {
    fn default() -> Self {
        Self {
            initial_activation: 1.0,
            hop_decay: 0.5,
            min_threshold: 0.01,
            max_hops: 3,
            max_nodes: 500,
            aggregation: AggregationMode::Sum,
        }
    }
}

impl SsaParams {
    /// The alternate "aggressive spread" profile (hop decay 0.80, looser
    /// threshold) seen in some fixtures — not the default.
    pub fn aggressive() -> Self {
        Self {
            hop_decay: 0.80,
            min_threshold: 0.05,
            ..Self::default()
        }
    }
}
