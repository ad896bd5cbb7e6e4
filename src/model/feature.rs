//! Spatially-localized feature regions returned by the classifier.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Unique identifier for a feature region.
pub type FeatureId = u32;

/// A spatial region of interest in the image with a stable identifier.
///
/// `area_coordinates` are image-native pixels, exactly as returned by the
/// classifier. Features are immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub feature_id: FeatureId,
    pub feature_name: String,
    pub area_coordinates: Rect,
}

/// Look up a feature by id.
pub fn find_feature(features: &[Feature], id: FeatureId) -> Option<&Feature> {
    features.iter().find(|f| f.feature_id == id)
}
