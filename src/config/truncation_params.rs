//! Truncation-tier latency/ceiling constants (spec §4.7).

/// Expected latency (ms) per truncation tier, plus the hard per-operation
/// ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationParams {
    pub use_summary_ms: u32,
    pub semantic_truncation_ms: u32,
    pub extract_relevant_ms: u32,
    pub hard_truncation_ms: u32,
    /// Hard ceiling on any single truncation operation.
    pub ceiling_ms: u32,
}

impl Default for TruncationParams {
    fn default() -> Self {
        Self {
            use_summary_ms: 0,
            semantic_truncation_ms: 10,
            extract_relevant_ms: 80,
            hard_truncation_ms: 1,
            ceiling_ms: 100,
        }
    }
}
