//! Inspect a saved classifier response against an image.
//!
//! Loads the image, replays result ingestion, and prints the ranked
//! hypotheses with their worth-mentioning evidence:
//!
//! ```text
//! woeview-inspect <image.png> <response.json>
//! ```
//!
//! Honors `RUST_LOG` for log verbosity.

use std::error::Error;
use std::fs;

use woeview::model::{EvidenceType, Soe};
use woeview::{
    Classifier, ClassifierResponse, Message, SubmitRequest, TransportError, WoeViewApp,
    parse_response,
};

/// Container size handed to the viewer; it does not affect the derivation.
const CONTAINER_WIDTH: f32 = 512.0;
const CONTAINER_HEIGHT: f32 = 512.0;

/// Classifier stand-in that replays a saved response body.
struct SavedResponse {
    body: String,
}

impl Classifier for SavedResponse {
    fn classify(&self, _request: &SubmitRequest) -> Result<ClassifierResponse, TransportError> {
        parse_response(&self.body)
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(image_path), Some(response_path)) = (args.next(), args.next()) else {
        return Err("usage: woeview-inspect <image> <response.json>".into());
    };

    let image_bytes = fs::read(&image_path)?;
    let body = fs::read_to_string(&response_path)?;

    let mut app = WoeViewApp::new(CONTAINER_WIDTH, CONTAINER_HEIGHT);
    app.load_image(image_path, image_bytes)?;
    if let Some(image) = app.image() {
        println!("{} ({}x{})", image.name, image.width, image.height);
    }

    app.submit_with(&SavedResponse { body })?;
    if let Some(recommendation) = app.recommendation() {
        println!("recommendation: {recommendation}");
    }

    // Select every hypothesis so the derivation covers the whole response.
    let ids: Vec<_> = app.hypotheses().iter().map(|h| h.hypothesis_id).collect();
    for id in ids {
        app.update(Message::HypothesisToggled(id));
    }

    for (hypothesis, entry) in app.hypotheses().iter().zip(app.selection().worth_evidence()) {
        println!(
            "\n{} ({:.0}%)",
            hypothesis.hypothesis_name,
            hypothesis.probability * 100.0
        );
        if entry.filtered_evidence.is_empty() {
            println!("  no worth-mentioning evidence");
            continue;
        }
        for evidence in &entry.filtered_evidence {
            println!(
                "  {:>4}  {}",
                marker(evidence.evidence_type, evidence.soe),
                evidence.feature_name
            );
        }
    }

    Ok(())
}

/// Compact strength marker, e.g. `++` for strong supporting evidence.
fn marker(evidence_type: EvidenceType, soe: Soe) -> String {
    let sign = match evidence_type {
        EvidenceType::Positive => '+',
        EvidenceType::Negative => '-',
        EvidenceType::Zero => '~',
    };
    let count = match soe {
        Soe::NotWorthMentioning => 0,
        Soe::Substantial => 1,
        Soe::Strong => 2,
        Soe::Decisive => 3,
    };
    std::iter::repeat_n(sign, count).collect()
}
