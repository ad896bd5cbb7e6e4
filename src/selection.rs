//! Selection state and worth-mentioning evidence derivation.
//!
//! Feature selection is single-select and keeps the highlight overlay in
//! lockstep: the highlight exists exactly when a feature is selected.
//! Hypothesis selection is multi-select; the derived worth-mentioning
//! evidence collection is rebuilt wholesale from the selected set on every
//! toggle.

use crate::error::LookupError;
use crate::geometry::{Point, Rect};
use crate::model::{
    Feature, FeatureId, Hypothesis, HypothesisId, WorthEvidenceEntry, find_feature,
    find_hypothesis,
};

/// Owned selection state.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Currently selected feature, if any
    pub selected_feature: Option<FeatureId>,
    /// Highlight box in image-native pixels with the pan offset baked in;
    /// present exactly when a feature is selected
    pub highlight_area: Option<Rect>,
    /// Selected hypothesis ids in selection order, duplicate-free
    pub selected_hypotheses: Vec<HypothesisId>,
    /// One derived entry per selected hypothesis, same order
    pub worth_evidence: Vec<WorthEvidenceEntry>,
}

/// The selection and evidence derivation engine.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection state snapshot.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Currently selected feature id.
    pub fn selected_feature(&self) -> Option<FeatureId> {
        self.state.selected_feature
    }

    /// Current highlight box, if a feature is selected.
    pub fn highlight_area(&self) -> Option<Rect> {
        self.state.highlight_area
    }

    /// Selected hypothesis ids in selection order.
    pub fn selected_hypotheses(&self) -> &[HypothesisId] {
        &self.state.selected_hypotheses
    }

    /// Derived worth-mentioning evidence, one entry per selected hypothesis.
    pub fn worth_evidence(&self) -> &[WorthEvidenceEntry] {
        &self.state.worth_evidence
    }

    /// Select a feature, or clear the selection with `None`.
    ///
    /// The highlight becomes the feature's rect translated by the current
    /// pan, anchoring it to the image. An id absent from `features` clears
    /// both fields, same as `None`.
    pub fn select_feature(
        &mut self,
        features: &[Feature],
        id: Option<FeatureId>,
        image_position: Point,
    ) {
        match id.and_then(|id| find_feature(features, id)) {
            Some(feature) => {
                self.state.selected_feature = Some(feature.feature_id);
                self.state.highlight_area = Some(
                    feature
                        .area_coordinates
                        .translated(image_position.x, image_position.y),
                );
            }
            None => {
                if let Some(id) = id {
                    log::debug!("feature {id} not in current data, clearing selection");
                }
                self.state.selected_feature = None;
                self.state.highlight_area = None;
            }
        }
    }

    /// Toggle a hypothesis in the selected set.
    ///
    /// Strict flip: a present id is removed, an absent one added. An id not
    /// in `hypotheses` fails with [`LookupError::HypothesisNotFound`] and
    /// changes nothing. The worth-mentioning collection is rebuilt from the
    /// selected set afterwards. Returns whether the hypothesis is now
    /// selected.
    pub fn toggle_hypothesis(
        &mut self,
        hypotheses: &[Hypothesis],
        id: HypothesisId,
    ) -> Result<bool, LookupError> {
        if find_hypothesis(hypotheses, id).is_none() {
            return Err(LookupError::HypothesisNotFound { id });
        }

        let position = self.state.selected_hypotheses.iter().position(|&h| h == id);
        let selected = match position {
            Some(index) => {
                self.state.selected_hypotheses.remove(index);
                false
            }
            None => {
                self.state.selected_hypotheses.push(id);
                true
            }
        };
        log::debug!(
            "hypothesis {id} {}",
            if selected { "selected" } else { "deselected" }
        );

        self.rebuild_worth_evidence(hypotheses);
        Ok(selected)
    }

    /// Shift an active highlight by an applied pan delta. No-op when no
    /// feature is selected.
    pub fn shift_highlight(&mut self, dx: f32, dy: f32) {
        if let Some(area) = &mut self.state.highlight_area {
            *area = area.translated(dx, dy);
        }
    }

    /// Clear all selection and derived state.
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }

    /// Rebuild the derived collection from scratch so it can never go stale
    /// against the immutable source evidence.
    fn rebuild_worth_evidence(&mut self, hypotheses: &[Hypothesis]) {
        self.state.worth_evidence = self
            .state
            .selected_hypotheses
            .iter()
            .filter_map(|&id| find_hypothesis(hypotheses, id))
            .map(WorthEvidenceEntry::from_hypothesis)
            .collect();
    }
}
