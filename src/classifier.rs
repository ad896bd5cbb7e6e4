//! The classifier request/response boundary.
//!
//! The core treats "submit image, get JSON result" as opaque: it hands the
//! network layer a [`SubmitRequest`] and takes back either a parsed
//! [`ClassifierResponse`] or a [`TransportError`]. The transport encoding
//! itself (multipart POST with `file`, `container_width` and
//! `container_height` fields) belongs to that layer, not to the core.

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::model::{Feature, Hypothesis};

/// A classification request handed to the network layer.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Name of the uploaded file
    pub file_name: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Pixel width of the viewport element at submission time
    pub container_width: f32,
    /// Pixel height of the viewport element at submission time
    pub container_height: f32,
}

/// A successful classification result.
///
/// Hypotheses arrive in classifier order; ingestion re-ranks them by
/// probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    pub recommendation: String,
    pub hypotheses: Vec<Hypothesis>,
    pub features: Vec<Feature>,
}

/// The two wire shapes a classifier can answer with.
///
/// `Failure` is tried first so a payload carrying an `error` field reports
/// as an error even when it also happens to carry result fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponsePayload {
    Failure { error: String },
    Success(ClassifierResponse),
}

/// Parse a raw response body into a classification result.
///
/// A payload with an `error` field surfaces as
/// [`TransportError::Classifier`] even if the transport itself succeeded;
/// a body matching neither shape is a malformed response.
pub fn parse_response(body: &str) -> Result<ClassifierResponse, TransportError> {
    match serde_json::from_str::<ResponsePayload>(body)? {
        ResponsePayload::Success(response) => Ok(response),
        ResponsePayload::Failure { error } => Err(TransportError::Classifier { message: error }),
    }
}

/// The opaque classification boundary.
///
/// Implemented by the excluded networking layer; tests and the inspect
/// binary provide synchronous stand-ins.
pub trait Classifier {
    /// Classify the submitted image.
    fn classify(&self, request: &SubmitRequest) -> Result<ClassifierResponse, TransportError>;
}
