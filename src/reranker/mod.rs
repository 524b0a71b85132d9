//! Six-signal weighted reranker (spec §4.2).

use chrono::{DateTime, Utc};

use crate::config::{RerankWeights, SectionProfile};

/// Per-candidate inputs to the reranker.
#[derive(Debug, Clone)]
pub struct CandidateSignals {
    pub id: String,
    pub semantic_score: Option<f32>,
    pub bm25_score: f32,
    pub graph_score: Option<f32>,
    pub last_accessed: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub access_count: u32,
    pub inbound_edge_count: u32,
    pub subtype: Option<String>,
}

/// The six computed signal values for one candidate, each in `[0, 1]`
/// except `keyword`/`graph` which share that range by construction here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBreakdown {
    pub semantic: f64,
    pub keyword: f64,
    pub graph: f64,
    pub recency: f64,
    pub authority: f64,
    pub affinity: f64,
}

impl SignalBreakdown {
    fn contributions(&self, weights: &RerankWeights) -> [(&'static str, f64); 6] {
        [
            ("semantic", weights.semantic * self.semantic),
            ("keyword", weights.keyword * self.keyword),
            ("graph", weights.graph * self.graph),
            ("recency", weights.recency * self.recency),
            ("authority", weights.authority * self.authority),
            ("affinity", weights.affinity * self.affinity),
        ]
    }
}

/// A scored, explained reranker result.
#[derive(Debug, Clone)]
pub struct RerankResult {
    pub id: String,
    pub score: f64,
    pub signals: SignalBreakdown,
    /// Name of the signal with the highest `weight * signal` contribution.
    pub top_signal: &'static str,
}

/// Global graph statistics the reranker needs beyond a single candidate.
#[derive(Debug, Clone, Copy)]
pub struct GraphMetrics {
    pub avg_inbound_edges: f64,
}

/// Recency signal: `exp(-days / 30)`, half-life ~30 days.
pub fn recency_signal(days_since: f64) -> f64 {
    (-days_since / 30.0).exp()
}

/// Authority signal: `min((inbound / avg) / 2, 1)`; `0.5` if `avg == 0`.
pub fn authority_signal(inbound_edges: u32, avg_inbound: f64) -> f64 {
    if avg_inbound == 0.0 {
        return 0.5;
    }
    ((inbound_edges as f64 / avg_inbound) / 2.0).min(1.0)
}

/// Affinity signal: `tanh(access_count / 10) * recency + new_content_boost`,
/// boost `0.2` if `age_days < 7` else `0`, result capped at `1.0`.
pub fn affinity_signal(access_count: u32, recency: f64, age_days: f64) -> f64 {
    let frequency_term = (access_count as f64 / 10.0).tanh() * recency;
    let boost = if age_days < 7.0 { 0.2 } else { 0.0 };
    (frequency_term + boost).min(1.0)
}

/// Normalize BM25 scores into keyword signals across a full candidate set.
///
/// `max(keyword) <= 1.0`; a single candidate always gets `1.0`; an all-zero
/// set gets `0.5` for every candidate.
fn keyword_signals(bm25_scores: &[f32]) -> Vec<f64> {
    if bm25_scores.len() == 1 {
        return vec![1.0];
    }
    let max = bm25_scores.iter().cloned().fold(0.0_f32, f32::max);
    if max <= 0.0 {
        return vec![0.5; bm25_scores.len()];
    }
    bm25_scores.iter().map(|&s| (s / max) as f64).collect()
}

/// Score and rank a candidate set.
///
/// An empty `candidates` slice returns an empty result vector (spec §7:
/// `EMPTY_CANDIDATE_SET` is not an error). Ties are broken by stable input
/// order (`sort_by` is stable and never reorders equal-score elements).
pub fn rerank(
    candidates: &[CandidateSignals],
    metrics: GraphMetrics,
    weights_override: Option<RerankWeights>,
    now: DateTime<Utc>,
) -> Vec<RerankResult> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let bm25: Vec<f32> = candidates.iter().map(|c| c.bm25_score).collect();
    let keyword = keyword_signals(&bm25);

    let mut results: Vec<RerankResult> = candidates
        .iter()
        .zip(keyword)
        .map(|(c, keyword)| {
            let weights = weights_override
                .unwrap_or_else(|| SectionProfile::for_subtype(c.subtype.as_deref()).weights());

            let recency_days = (now - c.last_accessed).num_seconds() as f64 / 86_400.0;
            let age_days = (now - c.created_at).num_seconds() as f64 / 86_400.0;
            let recency = recency_signal(recency_days.max(0.0));

            let signals = SignalBreakdown {
                semantic: c.semantic_score.unwrap_or(0.0) as f64,
                keyword,
                graph: c.graph_score.unwrap_or(0.0) as f64,
                recency,
                authority: authority_signal(c.inbound_edge_count, metrics.avg_inbound_edges),
                affinity: affinity_signal(c.access_count, recency, age_days.max(0.0)),
            };

            let contributions = signals.contributions(&weights);
            let score: f64 = contributions.iter().map(|(_, v)| v).sum();
            let top_signal = contributions
                .iter()
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(name, _)| *name)
                .unwrap_or("semantic");

            RerankResult {
                id: c.id.clone(),
                score,
                signals,
                top_signal,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results
}
