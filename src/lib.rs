//! WoeView - weight-of-evidence image viewer core.
//!
//! The headless state core of an interactive image-annotation surface: a
//! user uploads an image, a remote classifier returns ranked hypotheses and
//! spatially-localized features, and the user pans/zooms the image while
//! toggling hypotheses to inspect the supporting/opposing evidence.
//!
//! The crate owns the viewport transform (zoom, pan, drag tracking, the
//! feature-highlight overlay) and the selection/evidence derivation.
//! Rendering and networking are external collaborators: the render layer
//! paints from read-only state snapshots, and the network layer moves a
//! [`SubmitRequest`] out and a [`ClassifierResponse`] back in.

pub mod app;
pub mod classifier;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod message;
pub mod model;
pub mod selection;
pub mod viewport;

pub use app::{LoadedImage, WoeViewApp};
pub use classifier::{Classifier, ClassifierResponse, SubmitRequest, parse_response};
pub use error::{LookupError, TransportError, UserInputError};
pub use message::Message;
pub use selection::{SelectionEngine, SelectionState};
pub use viewport::{PointerButton, ViewportEngine, ViewportState};
