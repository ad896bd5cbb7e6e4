//! Error types for the viewer core.
//!
//! Three small taxonomies, one per boundary: user input at submission time,
//! the classifier transport, and id lookups against the current data. Every
//! error is recovered where it occurs; none propagate past the core.

use thiserror::Error;

use crate::model::{FeatureId, HypothesisId};

/// Errors caused by user input; they block the operation and leave state
/// unchanged.
#[derive(Error, Debug)]
pub enum UserInputError {
    /// Submission requested with no image loaded
    #[error("no image selected")]
    NoImageSelected,

    /// Submission requested while another request is outstanding
    #[error("a submission is already in flight")]
    SubmissionPending,

    /// Upload is a decodable image but not a format the classifier accepts
    #[error("unsupported image format, expected PNG or JPEG")]
    UnsupportedImageFormat,

    /// Upload could not be decoded at all
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Errors from the classifier request/response boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request itself failed in the network layer
    #[error("request failed: {0}")]
    Request(String),

    /// The response body matched neither wire shape
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The classifier answered with an error payload
    #[error("{message}")]
    Classifier {
        /// Error text supplied by the classifier
        message: String,
    },
}

/// Lookups of ids not present in the current data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// Feature id absent from the current feature set
    #[error("feature not found: {id}")]
    FeatureNotFound {
        /// The missing feature id
        id: FeatureId,
    },

    /// Hypothesis id absent from the current hypothesis set
    #[error("hypothesis not found: {id}")]
    HypothesisNotFound {
        /// The missing hypothesis id
        id: HypothesisId,
    },
}
