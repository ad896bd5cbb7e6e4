//! Input event messages for the viewer core.
//!
//! Every mutation enters through a discrete message dispatched by
//! [`crate::app::WoeViewApp::update`]; the render layer reads the resulting
//! state as snapshots.

use crate::classifier::ClassifierResponse;
use crate::error::TransportError;
use crate::model::{FeatureId, HypothesisId};
use crate::viewport::PointerButton;

/// Messages that can be sent to update viewer state.
#[derive(Debug)]
pub enum Message {
    // Viewport
    /// The viewport element was resized
    ContainerResized { width: f32, height: f32 },
    /// Zoom slider moved (percent; the engine snaps it)
    ZoomChanged(u32),
    /// Pointer button pressed over the viewport
    PointerPressed {
        x: f32,
        y: f32,
        button: PointerButton,
    },
    /// Pointer moved over the viewport
    PointerMoved { x: f32, y: f32 },
    /// Pointer button released
    PointerReleased,
    /// Pointer left the viewport surface; handled like a release so the
    /// drag machine cannot stick mid-drag
    PointerLeft,

    // Selection
    /// Feature selection changed (`None` clears)
    FeatureSelected(Option<FeatureId>),
    /// Hypothesis checkbox toggled
    HypothesisToggled(HypothesisId),

    // Network completion
    /// Outcome of the in-flight classification request
    ResponseReceived(Result<ClassifierResponse, TransportError>),
}
