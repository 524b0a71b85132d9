//! FSRS-derived decay engine (spec §4.1).
//!
//! Decay is computed on read: every function here is a pure function of a
//! node's stored fields and the current time. Stores only mutate when a
//! node is actually accessed (see [`stability_on_access`]).

use crate::config::DecayParams;
use crate::model::{Edge, NodeType};

/// Retrievability `R(t, S) = exp(-t/S)`, `0` if `S <= 0` (spec: "decay math
/// degenerate" is not an error — it's a defined zero).
pub fn retrievability(days_since_access: f64, stability: f64) -> f64 {
    if stability <= 0.0 {
        return 0.0;
    }
    (-days_since_access / stability).exp()
}

/// Updated difficulty after observing a node's content length and inbound
/// edge count.
///
/// `base(type) + min(len/5000, 1) * 0.15 + (concept ? 0.1 : 0) -
/// min(edges/40, 1) * 0.15`, clamped to `[0, 1]`.
pub fn difficulty_update(node_type: NodeType, content_len: usize, edge_count: usize) -> f64 {
    let base = crate::config::initial_difficulty(node_type);
    let len_term = (content_len as f64 / 5000.0).min(1.0) * 0.15;
    let concept_term = if node_type == NodeType::Concept { 0.1 } else { 0.0 };
    let edge_term = (edge_count as f64 / 40.0).min(1.0) * 0.15;
    (base + len_term + concept_term - edge_term).clamp(0.0, 1.0)
}

/// Stability growth on successful access: `S' = min(S * 2.5 * (1 - 0.5 *
/// difficulty), 365)`.
pub fn stability_on_access(stability: f64, difficulty: f64) -> f64 {
    (stability * 2.5 * (1.0 - 0.5 * difficulty)).min(365.0)
}

/// Decay-derived lifecycle state, distinct from [`crate::model::AuthoringLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayLifecycle {
    Active,
    Weak,
    Dormant,
    Compress,
    Archive,
}

/// Derive the decay lifecycle from retrievability and days since the node
/// last crossed into sub-WEAK territory.
///
/// `DORMANT` is emitted for both `< 60d` and `< 120d` bands (spec
/// preserves this; see SPEC_FULL.md Open Questions) — both map to the same
/// variant here since the spec gives them no distinct behavior, only a
/// restated boundary.
pub fn derive_lifecycle(retrievability: f64, days_dormant: f64, params: &DecayParams) -> DecayLifecycle {
    if retrievability > params.active_threshold {
        return DecayLifecycle::Active;
    }
    if retrievability > params.weak_threshold {
        return DecayLifecycle::Weak;
    }
    if days_dormant < params.compress_after_days {
        // Covers both the <60d and the restated <120d band.
        DecayLifecycle::Dormant
    } else if days_dormant < params.archive_after_days {
        DecayLifecycle::Compress
    } else {
        DecayLifecycle::Archive
    }
}

/// Convenience: retrievability + lifecycle for a node observed
/// `days_since_access` days after its last access, with the given stability.
pub fn decay_state(
    stability: f64,
    days_since_access: f64,
    params: &DecayParams,
) -> (f64, DecayLifecycle) {
    let r = retrievability(days_since_access, stability);
    let lifecycle = derive_lifecycle(r, days_since_access, params);
    (r, lifecycle)
}

/// Apply cascade decay to an edge whose endpoint retrievability is below
/// the trigger threshold: multiply weight by `cascade_factor`, floored at
/// `edge_floor`.
pub fn cascade_decay_weight(current_weight: f32, endpoint_r: f64, params: &DecayParams) -> f32 {
    if endpoint_r < params.cascade_trigger_r {
        (current_weight * params.cascade_factor).max(params.edge_floor)
    } else {
        current_weight
    }
}

/// Apply cascade decay across an edge set given a lookup from node id to
/// current retrievability. Edges whose endpoints are missing from `r_of`
/// are left untouched.
pub fn cascade_decay_edges(
    edges: &mut [Edge],
    params: &DecayParams,
    r_of: impl Fn(&str) -> Option<f64>,
) {
    for edge in edges.iter_mut() {
        let source_r = r_of(&edge.source_id);
        let target_r = r_of(&edge.target_id);
        let min_r = match (source_r, target_r) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => continue,
        };
        edge.neural_weight = cascade_decay_weight(edge.neural_weight, min_r, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeType;

    #[test]
    fn retrievability_at_zero_elapsed_is_one() {
        assert!((retrievability(0.0, 20.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn retrievability_degenerate_stability_is_zero() {
        assert_eq!(retrievability(5.0, 0.0), 0.0);
        assert_eq!(retrievability(5.0, -1.0), 0.0);
    }

    #[test]
    fn retrievability_strictly_decreasing_in_t() {
        let s = 20.0;
        let mut prev = retrievability(0.0, s);
        for t in 1..50 {
            let r = retrievability(t as f64, s);
            assert!(r < prev);
            prev = r;
        }
    }

    #[test]
    fn retrievability_half_life_reference_point() {
        // R(20, 20) ~= exp(-1) ~= 0.3679
        let r = retrievability(20.0, 20.0);
        assert!((r - std::f64::consts::E.recip()).abs() < 1e-9);
    }

    #[test]
    fn decay_milestone_scenario() {
        // spec §8 scenario 1: stability=7, t=7 days -> R ~= exp(-1) -> WEAK
        let params = DecayParams::default();
        let (r, lifecycle) = decay_state(7.0, 7.0, &params);
        assert!((r - std::f64::consts::E.recip()).abs() < 1e-9);
        assert_eq!(lifecycle, DecayLifecycle::Weak);

        // after an access at difficulty 0.3: S' = 7 * 2.5 * (1 - 0.15) = 14.875
        let new_stability = stability_on_access(7.0, 0.3);
        assert!((new_stability - 14.875).abs() < 1e-9);
        // immediately after access, t=0 -> R=1.0
        assert!((retrievability(0.0, new_stability) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lifecycle_boundaries() {
        let params = DecayParams::default();
        assert_eq!(derive_lifecycle(0.6, 0.0, &params), DecayLifecycle::Active);
        assert_eq!(derive_lifecycle(0.5, 0.0, &params), DecayLifecycle::Weak);
        assert_eq!(derive_lifecycle(0.2, 0.0, &params), DecayLifecycle::Weak);
        assert_eq!(derive_lifecycle(0.05, 50.0, &params), DecayLifecycle::Dormant);
        assert_eq!(derive_lifecycle(0.05, 119.0, &params), DecayLifecycle::Dormant);
        assert_eq!(derive_lifecycle(0.05, 150.0, &params), DecayLifecycle::Compress);
        assert_eq!(derive_lifecycle(0.05, 300.0, &params), DecayLifecycle::Archive);
    }

    #[test]
    fn difficulty_update_clamped() {
        let d = difficulty_update(NodeType::Concept, 50_000, 0);
        assert!((0.0..=1.0).contains(&d));
        // huge content + concept + no edges should hit the ceiling contribution
        assert!(d >= crate::config::initial_difficulty(NodeType::Concept));
    }

    #[test]
    fn cascade_decay_floors_at_edge_floor() {
        let params = DecayParams::default();
        let mut w = 1.0_f32;
        for _ in 0..100 {
            w = cascade_decay_weight(w, 0.0, &params);
        }
        assert!((w - params.edge_floor).abs() < 1e-6);
    }

    #[test]
    fn cascade_decay_untouched_above_trigger() {
        let params = DecayParams::default();
        assert_eq!(cascade_decay_weight(0.9, 0.5, &params), 0.9);
    }

    #[test]
    fn cascade_decay_edges_uses_min_endpoint_retrievability() {
        let params = DecayParams::default();
        let mut edges = vec![Edge::new(EdgeType::RelatesTo, "a", "b")];
        cascade_decay_edges(&mut edges, &params, |id| match id {
            "a" => Some(0.9),
            "b" => Some(0.02),
            _ => None,
        });
        assert!(edges[0].neural_weight < 1.0);
    }
}
