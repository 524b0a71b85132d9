//! Reranker signal weights and section profiles.

use super::WeightVector;
use crate::error::ConfigError;

/// Weights for the six reranker signals. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankWeights {
    /// Dense-embedding similarity weight.
    pub semantic: f64,
    /// BM25/keyword weight.
    pub keyword: f64,
    /// Graph-connectivity weight.
    pub graph: f64,
    /// Exponential recency weight.
    pub recency: f64,
    /// Inbound-edge authority weight.
    pub authority: f64,
    /// Access-frequency + new-content affinity weight.
    pub affinity: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            semantic: 0.30,
            keyword: 0.15,
            graph: 0.20,
            recency: 0.15,
            authority: 0.10,
            affinity: 0.10,
        }
    }
}

impl WeightVector for RerankWeights {
    fn weights(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("semantic", self.semantic),
            ("keyword", self.keyword),
            ("graph", self.graph),
            ("recency", self.recency),
            ("authority", self.authority),
            ("affinity", self.affinity),
        ]
    }
}

impl RerankWeights {
    /// Validate this weight vector (sums to 1.0 within tolerance, all non-negative).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in self.weights() {
            if w < 0.0 {
                return Err(ConfigError::new(
                    format!("weights.{name}"),
                    "weight must be non-negative",
                ));
            }
        }
        self.validate_sum("weights")
    }
}

/// Per-section weight profile. Unknown subtypes fall back to `Knowledge`.
///
/// Profiles are selected by subtype prefix (see [`SectionProfile::for_subtype`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionProfile {
    /// Default weighting, used as the fallback for unrecognized subtypes.
    Knowledge,
    /// Favors recency heavily — for live signals/alerts-style content.
    Signals,
    /// How-to / procedural content.
    Procedural,
    /// Episodic / event content.
    Episodic,
}

impl SectionProfile {
    /// Map a node subtype string to a section profile by prefix.
    ///
    /// Unknown or absent subtypes fall back to [`SectionProfile::Knowledge`]
    /// per spec §4.2.
    pub fn for_subtype(subtype: Option<&str>) -> Self {
        match subtype.map(|s| s.to_ascii_lowercase()) {
            Some(s) if s.starts_with("signal") => SectionProfile::Signals,
            Some(s) if s.starts_with("procedure") || s.starts_with("howto") => {
                SectionProfile::Procedural
            }
            Some(s) if s.starts_with("episode") || s.starts_with("event") => {
                SectionProfile::Episodic
            }
            _ => SectionProfile::Knowledge,
        }
    }

    /// The weight vector for this profile.
    pub fn weights(&self) -> RerankWeights {
        match self {
            SectionProfile::Knowledge => RerankWeights {
                semantic: 0.35,
                keyword: 0.15,
                graph: 0.15,
                recency: 0.10,
                authority: 0.20,
                affinity: 0.05,
            },
            SectionProfile::Signals => RerankWeights {
                semantic: 0.15,
                keyword: 0.10,
                graph: 0.10,
                recency: 0.45,
                authority: 0.10,
                affinity: 0.10,
            },
            SectionProfile::Procedural => RerankWeights {
                semantic: 0.30,
                keyword: 0.20,
                graph: 0.15,
                recency: 0.05,
                authority: 0.10,
                affinity: 0.20,
            },
            SectionProfile::Episodic => RerankWeights {
                semantic: 0.25,
                keyword: 0.10,
                graph: 0.15,
                recency: 0.30,
                authority: 0.05,
                affinity: 0.15,
            },
        }
    }
}
