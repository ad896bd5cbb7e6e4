//! The viewer application state and message dispatch.
//!
//! [`WoeViewApp`] owns the loaded image, the latest classifier result, and
//! the two engines. All mutation happens inside [`WoeViewApp::update`] or
//! the submission methods; the render layer paints from read-only
//! snapshots.

use crate::classifier::{Classifier, ClassifierResponse, SubmitRequest};
use crate::error::{TransportError, UserInputError};
use crate::geometry::Point;
use crate::message::Message;
use crate::model::{Feature, FeatureId, Hypothesis, HypothesisId, sort_by_probability};
use crate::selection::SelectionEngine;
use crate::viewport::ViewportEngine;

/// An uploaded image with its decoded pixel dimensions.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Filename of the image
    pub name: String,
    /// Raw image data bytes
    pub data: Vec<u8>,
    /// Native pixel width
    pub width: u32,
    /// Native pixel height
    pub height: u32,
}

/// The viewer core.
#[derive(Debug)]
pub struct WoeViewApp {
    /// The currently loaded image, if any
    image: Option<LoadedImage>,
    /// Recommendation text of the latest result (or its error text)
    recommendation: Option<String>,
    /// Hypotheses of the latest result, ranked by probability
    hypotheses: Vec<Hypothesis>,
    /// Feature regions of the latest result
    features: Vec<Feature>,
    /// Whether a classification request is outstanding
    loading: bool,

    viewport: ViewportEngine,
    selection: SelectionEngine,
}

impl WoeViewApp {
    /// Create a viewer for a container of the given pixel size.
    pub fn new(container_width: f32, container_height: f32) -> Self {
        Self {
            image: None,
            recommendation: None,
            hypotheses: Vec::new(),
            features: Vec::new(),
            loading: false,
            viewport: ViewportEngine::new(container_width, container_height),
            selection: SelectionEngine::new(),
        }
    }

    /// The currently loaded image.
    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Recommendation text to display, if a result (or failure) arrived.
    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    /// Hypotheses of the latest result, highest probability first.
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Feature regions of the latest result.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Whether a classification request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The viewport transform engine.
    pub fn viewport(&self) -> &ViewportEngine {
        &self.viewport
    }

    /// The selection and evidence engine.
    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    /// Load a new image, resetting all viewer state unconditionally.
    ///
    /// Only PNG and JPEG uploads are accepted, matching the classifier's
    /// own validation; the decoded dimensions feed the pan clamp. A
    /// rejected upload changes nothing.
    pub fn load_image(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<(), UserInputError> {
        let name = name.into();
        let format = image::guess_format(&data)?;
        if !matches!(format, image::ImageFormat::Png | image::ImageFormat::Jpeg) {
            return Err(UserInputError::UnsupportedImageFormat);
        }
        let mut reader = image::ImageReader::new(std::io::Cursor::new(&data));
        reader.set_format(format);
        let (width, height) = reader.into_dimensions()?;
        log::info!("loaded image '{name}' ({width}x{height})");

        self.image = Some(LoadedImage {
            name,
            data,
            width,
            height,
        });
        self.recommendation = None;
        self.hypotheses.clear();
        self.features.clear();
        self.loading = false;
        self.viewport.reset();
        self.viewport.set_image_size(width as f32, height as f32);
        self.selection.reset();
        Ok(())
    }

    /// Gate and construct the next classification request.
    ///
    /// Fails with [`UserInputError::NoImageSelected`] when nothing is
    /// loaded and with [`UserInputError::SubmissionPending`] while a
    /// request is outstanding; both leave state untouched. On success the
    /// in-flight flag is set and the request is handed to the network
    /// layer; its completion comes back through
    /// [`Message::ResponseReceived`] or [`WoeViewApp::finish_submission`].
    pub fn begin_submission(&mut self) -> Result<SubmitRequest, UserInputError> {
        if self.loading {
            return Err(UserInputError::SubmissionPending);
        }
        let Some(image) = &self.image else {
            return Err(UserInputError::NoImageSelected);
        };

        self.loading = true;
        log::debug!("submitting '{}' for classification", image.name);
        Ok(SubmitRequest {
            file_name: image.name.clone(),
            bytes: image.data.clone(),
            container_width: self.viewport.container_width(),
            container_height: self.viewport.container_height(),
        })
    }

    /// Complete the in-flight submission with the classifier's outcome.
    ///
    /// A failure surfaces its text as the recommendation and leaves prior
    /// hypotheses/features in place; they are cleared at image-change time
    /// only.
    pub fn finish_submission(&mut self, outcome: Result<ClassifierResponse, TransportError>) {
        self.loading = false;
        match outcome {
            Ok(response) => self.ingest(response),
            Err(err) => {
                log::warn!("classification failed: {err}");
                self.recommendation = Some(err.to_string());
            }
        }
    }

    /// Submit through a synchronous classifier boundary.
    pub fn submit_with<C: Classifier>(&mut self, classifier: &C) -> Result<(), UserInputError> {
        let request = self.begin_submission()?;
        let outcome = classifier.classify(&request);
        self.finish_submission(outcome);
        Ok(())
    }

    /// Process one input message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::ContainerResized { width, height } => {
                self.handle_container_resized(width, height);
            }
            Message::ZoomChanged(percent) => self.handle_zoom_changed(percent),
            Message::PointerPressed { x, y, button } => {
                self.viewport.begin_drag(Point::new(x, y), button);
            }
            Message::PointerMoved { x, y } => self.handle_pointer_moved(x, y),
            Message::PointerReleased | Message::PointerLeft => self.viewport.end_drag(),
            Message::FeatureSelected(id) => self.handle_feature_selected(id),
            Message::HypothesisToggled(id) => self.handle_hypothesis_toggled(id),
            Message::ResponseReceived(outcome) => self.finish_submission(outcome),
        }
    }

    /// Ingest a successful result: rank hypotheses, store features, and
    /// re-initialize the selection. Ids from a previous result may be
    /// absent from this one, so selection state never survives ingestion.
    fn ingest(&mut self, response: ClassifierResponse) {
        log::info!(
            "result '{}': {} hypotheses, {} features",
            response.recommendation,
            response.hypotheses.len(),
            response.features.len()
        );
        self.recommendation = Some(response.recommendation);
        self.hypotheses = response.hypotheses;
        sort_by_probability(&mut self.hypotheses);
        self.features = response.features;
        self.selection.reset();
    }

    fn handle_container_resized(&mut self, width: f32, height: f32) {
        let (dx, dy) = self.viewport.set_container_size(width, height);
        self.selection.shift_highlight(dx, dy);
    }

    fn handle_zoom_changed(&mut self, percent: u32) {
        let (dx, dy) = self.viewport.set_zoom(percent);
        self.selection.shift_highlight(dx, dy);
    }

    fn handle_pointer_moved(&mut self, x: f32, y: f32) {
        if let Some((dx, dy)) = self.viewport.drag_to(Point::new(x, y)) {
            self.selection.shift_highlight(dx, dy);
        }
    }

    fn handle_feature_selected(&mut self, id: Option<FeatureId>) {
        self.selection
            .select_feature(&self.features, id, self.viewport.image_position());
    }

    fn handle_hypothesis_toggled(&mut self, id: HypothesisId) {
        if let Err(err) = self.selection.toggle_hypothesis(&self.hypotheses, id) {
            log::warn!("toggle ignored: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::parse_response;
    use crate::geometry::Rect;
    use crate::model::{Evidence, EvidenceType, Soe};
    use crate::viewport::PointerButton;
    use std::io::Cursor;

    /// Encode a blank PNG of the given size.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn response() -> ClassifierResponse {
        ClassifierResponse {
            recommendation: "Melanocytic nevus".to_string(),
            hypotheses: vec![
                Hypothesis {
                    hypothesis_id: 0,
                    hypothesis_name: "Dermatofibroma (DF)".to_string(),
                    probability: 0.3,
                    evidence: vec![Evidence {
                        feature_id: 0,
                        feature_name: "Patch".to_string(),
                        evidence_type: EvidenceType::Negative,
                        soe: Soe::Substantial,
                    }],
                },
                Hypothesis {
                    hypothesis_id: 1,
                    hypothesis_name: "Melanocytic nevus (NV)".to_string(),
                    probability: 0.7,
                    evidence: vec![
                        Evidence {
                            feature_id: 0,
                            feature_name: "Patch".to_string(),
                            evidence_type: EvidenceType::Positive,
                            soe: Soe::Strong,
                        },
                        Evidence {
                            feature_id: 1,
                            feature_name: "Rim".to_string(),
                            evidence_type: EvidenceType::Positive,
                            soe: Soe::NotWorthMentioning,
                        },
                    ],
                },
            ],
            features: vec![
                Feature {
                    feature_id: 0,
                    feature_name: "Patch".to_string(),
                    area_coordinates: Rect::new(100.0, 120.0, 60.0, 40.0),
                },
                Feature {
                    feature_id: 1,
                    feature_name: "Rim".to_string(),
                    area_coordinates: Rect::new(300.0, 200.0, 80.0, 80.0),
                },
            ],
        }
    }

    /// App with a 400x300 container and an 800x600 image, result ingested.
    fn app_with_result() -> WoeViewApp {
        let mut app = WoeViewApp::new(400.0, 300.0);
        app.load_image("lesion.png", png_bytes(800, 600)).unwrap();
        let request = app.begin_submission().unwrap();
        assert_eq!(request.container_width, 400.0);
        app.finish_submission(Ok(response()));
        app
    }

    struct CannedClassifier(ClassifierResponse);

    impl Classifier for CannedClassifier {
        fn classify(&self, _request: &SubmitRequest) -> Result<ClassifierResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_load_image_decodes_dimensions() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        app.load_image("a.png", png_bytes(640, 480)).unwrap();
        let image = app.image().unwrap();
        assert_eq!((image.width, image.height), (640, 480));
    }

    #[test]
    fn test_load_image_rejects_non_image_bytes() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        let err = app.load_image("junk.bin", vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, UserInputError::ImageDecode(_)));
        assert!(app.image().is_none());
    }

    #[test]
    fn test_load_image_rejects_unsupported_format() {
        let img = image::DynamicImage::new_rgb8(4, 4);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Bmp)
            .unwrap();

        let mut app = WoeViewApp::new(400.0, 300.0);
        let err = app.load_image("a.bmp", buf).unwrap_err();
        assert!(matches!(err, UserInputError::UnsupportedImageFormat));
    }

    #[test]
    fn test_submission_requires_image() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        let err = app.begin_submission().unwrap_err();
        assert!(matches!(err, UserInputError::NoImageSelected));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_second_submission_dropped_while_loading() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        app.load_image("a.png", png_bytes(16, 16)).unwrap();
        let _request = app.begin_submission().unwrap();
        assert!(app.is_loading());

        let err = app.begin_submission().unwrap_err();
        assert!(matches!(err, UserInputError::SubmissionPending));
        assert!(app.is_loading());
    }

    #[test]
    fn test_ingestion_ranks_hypotheses() {
        let app = app_with_result();
        assert_eq!(app.recommendation(), Some("Melanocytic nevus"));
        assert_eq!(app.hypotheses()[0].hypothesis_name, "Melanocytic nevus (NV)");
        assert_eq!(app.hypotheses()[0].probability, 0.7);
        assert_eq!(app.hypotheses()[1].probability, 0.3);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_submit_with_synchronous_classifier() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        app.load_image("a.png", png_bytes(800, 600)).unwrap();
        app.submit_with(&CannedClassifier(response())).unwrap();
        assert_eq!(app.hypotheses().len(), 2);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_transport_failure_keeps_prior_data() {
        let mut app = app_with_result();
        let prior_hypotheses = app.hypotheses().len();

        let _request = app.begin_submission().unwrap();
        app.update(Message::ResponseReceived(Err(TransportError::Request(
            "connection refused".to_string(),
        ))));

        assert!(!app.is_loading());
        assert_eq!(
            app.recommendation(),
            Some("request failed: connection refused")
        );
        assert_eq!(app.hypotheses().len(), prior_hypotheses);
        assert_eq!(app.features().len(), 2);
    }

    #[test]
    fn test_classifier_error_payload_becomes_recommendation() {
        let mut app = WoeViewApp::new(400.0, 300.0);
        app.load_image("a.png", png_bytes(16, 16)).unwrap();
        let _request = app.begin_submission().unwrap();
        let outcome = parse_response(r#"{"error": "Failed to get the results"}"#);
        app.finish_submission(outcome);

        assert_eq!(app.recommendation(), Some("Failed to get the results"));
        assert!(app.hypotheses().is_empty());
        assert!(app.features().is_empty());
    }

    #[test]
    fn test_feature_select_and_clear() {
        let mut app = app_with_result();
        app.update(Message::FeatureSelected(Some(0)));
        assert_eq!(
            app.selection().highlight_area(),
            Some(Rect::new(100.0, 120.0, 60.0, 40.0))
        );

        app.update(Message::FeatureSelected(None));
        assert_eq!(app.selection().highlight_area(), None);
    }

    #[test]
    fn test_highlight_follows_clamped_drag() {
        let mut app = app_with_result();
        app.update(Message::FeatureSelected(Some(0)));

        // min_x = 400 - 800 = -400; a 1000px drag left is clamped to -400.
        app.update(Message::PointerPressed {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerMoved { x: -1000.0, y: 0.0 });
        app.update(Message::PointerReleased);

        assert_eq!(app.viewport().image_position(), Point::new(-400.0, 0.0));
        assert_eq!(
            app.selection().highlight_area(),
            Some(Rect::new(-300.0, 120.0, 60.0, 40.0))
        );
    }

    #[test]
    fn test_highlight_follows_zoom_reclamp() {
        let mut app = app_with_result();

        // Pan to the far edge at 2x (min_x = 200 - 800 = -600).
        app.update(Message::ZoomChanged(200));
        app.update(Message::PointerPressed {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Primary,
        });
        app.update(Message::PointerMoved { x: -2000.0, y: 0.0 });
        app.update(Message::PointerReleased);
        app.update(Message::FeatureSelected(Some(0)));
        let before = app.selection().highlight_area().unwrap();

        // Zooming back out tightens the bound to -400; the highlight moves
        // by the same correction the pan received.
        app.update(Message::ZoomChanged(100));
        let after = app.selection().highlight_area().unwrap();
        assert_eq!(app.viewport().image_position().x, -400.0);
        assert_eq!(after.x - before.x, 200.0);
        assert_eq!(after.y, before.y);
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut app = app_with_result();
        app.update(Message::PointerPressed {
            x: 10.0,
            y: 10.0,
            button: PointerButton::Primary,
        });
        assert!(app.viewport().is_dragging());

        app.update(Message::PointerLeft);
        assert!(!app.viewport().is_dragging());
        app.update(Message::PointerMoved { x: 50.0, y: 50.0 });
        assert_eq!(app.viewport().image_position(), Point::default());
    }

    #[test]
    fn test_hypothesis_toggle_through_messages() {
        let mut app = app_with_result();
        app.update(Message::HypothesisToggled(1));
        assert_eq!(app.selection().worth_evidence().len(), 1);
        // Only the Strong item survives the filter.
        assert_eq!(
            app.selection().worth_evidence()[0].filtered_evidence.len(),
            1
        );

        app.update(Message::HypothesisToggled(1));
        assert!(app.selection().worth_evidence().is_empty());
    }

    #[test]
    fn test_unknown_hypothesis_toggle_is_ignored() {
        let mut app = app_with_result();
        app.update(Message::HypothesisToggled(99));
        assert!(app.selection().selected_hypotheses().is_empty());
        assert!(app.selection().worth_evidence().is_empty());
    }

    #[test]
    fn test_ingestion_resets_selection() {
        let mut app = app_with_result();
        app.update(Message::FeatureSelected(Some(0)));
        app.update(Message::HypothesisToggled(0));

        let _request = app.begin_submission().unwrap();
        app.finish_submission(Ok(response()));

        assert_eq!(app.selection().selected_feature(), None);
        assert!(app.selection().selected_hypotheses().is_empty());
    }

    #[test]
    fn test_new_image_resets_everything() {
        let mut app = app_with_result();
        app.update(Message::ZoomChanged(300));
        app.update(Message::FeatureSelected(Some(0)));
        app.update(Message::HypothesisToggled(0));
        app.update(Message::HypothesisToggled(1));

        app.load_image("next.png", png_bytes(320, 240)).unwrap();

        assert_eq!(app.viewport().zoom_percent(), 100);
        assert_eq!(app.viewport().image_position(), Point::default());
        assert!(!app.viewport().is_dragging());
        assert_eq!(app.selection().selected_feature(), None);
        assert_eq!(app.selection().highlight_area(), None);
        assert!(app.selection().selected_hypotheses().is_empty());
        assert!(app.selection().worth_evidence().is_empty());
        assert_eq!(app.recommendation(), None);
        assert!(app.hypotheses().is_empty());
        assert!(app.features().is_empty());
    }
}
