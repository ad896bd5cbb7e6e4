//! Data model for classifier results.

mod feature;
mod hypothesis;

pub use feature::{Feature, FeatureId, find_feature};
pub use hypothesis::{
    Evidence, EvidenceType, Hypothesis, HypothesisId, Soe, WorthEvidenceEntry, find_hypothesis,
    sort_by_probability,
};
