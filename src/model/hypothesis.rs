//! Hypotheses, their evidence, and the derived worth-mentioning projection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::FeatureId;

/// Unique identifier for a hypothesis.
pub type HypothesisId = u32;

/// Direction of an evidence item relative to its hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    /// Supports the hypothesis
    Positive,
    /// Opposes the hypothesis
    Negative,
    /// Exactly-zero evidence weight; the classifier emits this when a
    /// feature neither supports nor opposes
    Zero,
}

/// Strength of evidence, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Soe {
    #[serde(rename = "Not worth mentioning")]
    NotWorthMentioning,
    Substantial,
    Strong,
    Decisive,
}

impl Soe {
    /// Get the display name for this strength, matching the wire format.
    pub fn name(&self) -> &'static str {
        match self {
            Soe::NotWorthMentioning => "Not worth mentioning",
            Soe::Substantial => "Substantial",
            Soe::Strong => "Strong",
            Soe::Decisive => "Decisive",
        }
    }

    /// All strengths in ascending order.
    pub fn all() -> &'static [Soe] {
        &[
            Soe::NotWorthMentioning,
            Soe::Substantial,
            Soe::Strong,
            Soe::Decisive,
        ]
    }

    /// Whether this evidence clears the lowest tier.
    pub fn is_worth_mentioning(&self) -> bool {
        *self != Soe::NotWorthMentioning
    }
}

/// A single evidence item tying a feature to a hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub feature_id: FeatureId,
    pub feature_name: String,
    pub evidence_type: EvidenceType,
    pub soe: Soe,
}

/// A candidate classification label with probability and evidence.
///
/// Immutable once received; `evidence` keeps the classifier's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub hypothesis_id: HypothesisId,
    pub hypothesis_name: String,
    /// Posterior probability in `[0, 1]`
    pub probability: f64,
    pub evidence: Vec<Evidence>,
}

/// Evidence for one selected hypothesis with the lowest tier filtered out.
///
/// Rebuilt wholesale from the immutable hypotheses on every toggle, never
/// patched incrementally, so it cannot go stale against its source.
#[derive(Debug, Clone, PartialEq)]
pub struct WorthEvidenceEntry {
    pub hypothesis_id: HypothesisId,
    pub hypothesis_name: String,
    pub filtered_evidence: Vec<Evidence>,
}

impl WorthEvidenceEntry {
    /// Build the entry for `hypothesis`, keeping only worth-mentioning
    /// evidence.
    pub fn from_hypothesis(hypothesis: &Hypothesis) -> Self {
        Self {
            hypothesis_id: hypothesis.hypothesis_id,
            hypothesis_name: hypothesis.hypothesis_name.clone(),
            filtered_evidence: hypothesis
                .evidence
                .iter()
                .filter(|e| e.soe.is_worth_mentioning())
                .cloned()
                .collect(),
        }
    }
}

/// Look up a hypothesis by id.
pub fn find_hypothesis(hypotheses: &[Hypothesis], id: HypothesisId) -> Option<&Hypothesis> {
    hypotheses.iter().find(|h| h.hypothesis_id == id)
}

/// Sort hypotheses by probability, highest first.
///
/// The sort is stable: equal (or unordered) probabilities keep their
/// original response order, which makes ingestion deterministic.
pub fn sort_by_probability(hypotheses: &mut [Hypothesis]) {
    hypotheses.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
}
