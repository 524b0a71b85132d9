//! Node prioritization, critical-first packing, and Lost-in-the-Middle
//! attention reorder (spec §4.6).

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::PriorityWeights;

/// The five inputs to a node's priority score, each expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePriorityFactors {
    pub retrieval_score: f64,
    pub query_mentioned: f64,
    pub recency: f64,
    pub connectivity: f64,
    pub importance: f64,
}

/// Weighted sum of the five priority factors.
pub fn priority_score(factors: &NodePriorityFactors, weights: &PriorityWeights) -> f64 {
    factors.retrieval_score * weights.retrieval_score
        + factors.query_mentioned * weights.query_mentioned
        + factors.recency * weights.recency
        + factors.connectivity * weights.connectivity
        + factors.importance * weights.importance
}

/// Recency supporting score: `exp(-days / (20 * 1.4427))`, half-life ~20 days.
pub fn recency_score(days_since: f64) -> f64 {
    (-days_since / (20.0 * 1.4427)).exp()
}

/// Connectivity supporting score: `min(1.0, connected_included_count * 0.3)`.
/// Negative counts clamp to `0`.
pub fn connectivity_score(connected_included_count: f64) -> f64 {
    (connected_included_count.max(0.0) * 0.3).min(1.0)
}

/// One packable unit of context.
#[derive(Debug, Clone, PartialEq)]
pub struct PackCandidate {
    pub id: String,
    pub tokens: u32,
    pub priority_score: f64,
    pub was_truncated: bool,
}

/// The result of packing a candidate set into a token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedContext {
    pub included: Vec<PackCandidate>,
    pub excluded: Vec<PackCandidate>,
    pub used_tokens: u32,
    pub budget_tokens: u32,
    pub excluded_count: u32,
    pub truncated_count: u32,
}

/// Greedy critical-first packing.
///
/// 1. Partition candidates into critical (`id` in `critical_ids`) and
///    non-critical, each keeping its relative input order.
/// 2. Include each critical node in input order while it fits; critical
///    nodes never displace earlier critical nodes.
/// 3. Sort non-critical candidates by `priority_score` descending (stable,
///    so equal scores keep their input order).
/// 4. Greedily include each while it fits.
///
/// Invariants: `used_tokens <= budget_tokens`; `included` and `excluded`
/// together account for every input candidate exactly once; any critical
/// node that fits appears before all non-critical nodes in `included`.
pub fn pack(candidates: &[PackCandidate], budget_tokens: u32, critical_ids: &[String]) -> PackedContext {
    let critical_set: HashSet<&str> = critical_ids.iter().map(|s| s.as_str()).collect();
    let (critical, non_critical): (Vec<PackCandidate>, Vec<PackCandidate>) =
        candidates.iter().cloned().partition(|c| critical_set.contains(c.id.as_str()));

    let mut used = 0u32;
    let mut included = Vec::with_capacity(candidates.len());
    let mut excluded = Vec::new();

    for c in critical {
        if used + c.tokens <= budget_tokens {
            used += c.tokens;
            included.push(c);
        } else {
            excluded.push(c);
        }
    }

    let mut sorted_non_critical = non_critical;
    sorted_non_critical.sort_by(|a, b| b.priority_score.partial_cmp(&a.priority_score).unwrap_or(Ordering::Equal));

    for c in sorted_non_critical {
        if used + c.tokens <= budget_tokens {
            used += c.tokens;
            included.push(c);
        } else {
            excluded.push(c);
        }
    }

    let truncated_count = included.iter().filter(|c| c.was_truncated).count() as u32;
    let excluded_count = excluded.len() as u32;

    PackedContext {
        included,
        excluded,
        used_tokens: used,
        budget_tokens,
        excluded_count,
        truncated_count,
    }
}

/// Lost-in-the-Middle attention reorder: given items already sorted by
/// priority descending, produce `[2nd, 3rd, ..., nth, 1st]` so both the
/// most- and second-most-relevant items land at the attended ends. `n<=1`
/// returns the input unchanged; `n=2` returns `[second, first]`. Never
/// mutates its input.
pub fn attention_reorder<T: Clone>(sorted_desc: &[T]) -> Vec<T> {
    if sorted_desc.len() <= 1 {
        return sorted_desc.to_vec();
    }
    let mut out = Vec::with_capacity(sorted_desc.len());
    out.extend_from_slice(&sorted_desc[1..]);
    out.push(sorted_desc[0].clone());
    out
}
