//! Recognizer adapter
//!
//! Calls the injected engine on one variant and reduces whatever shape the
//! engine returned to a plain text plus an optional confidence.

use crate::engine::Recognizer;
use image::GrayImage;
use serde_json::Value;

/// Normalized output of one recognition call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionResult {
    pub text: String,
    pub confidence: Option<f32>,
}

/// Normalize a raw engine output into a [`RecognitionResult`].
///
/// Accepted shapes: a bare string, a number (confidence only), an object with
/// `text`/`score` keys, or an array of any of these. Arrays yield the first
/// non-empty text and the first valid confidence found depth-first.
/// Confidences outside `[0, 1]` are discarded.
pub fn normalize(raw: &Value) -> RecognitionResult {
    RecognitionResult {
        text: extract_text(raw).to_string(),
        confidence: extract_confidence(raw),
    }
}

fn extract_text(raw: &Value) -> &str {
    match raw {
        Value::String(s) => s,
        Value::Object(map) => map.get("text").and_then(Value::as_str).unwrap_or(""),
        Value::Array(items) => items
            .iter()
            .map(extract_text)
            .find(|t| !t.is_empty())
            .unwrap_or(""),
        Value::Null | Value::Bool(_) | Value::Number(_) => "",
    }
}

fn extract_confidence(raw: &Value) -> Option<f32> {
    match raw {
        Value::Number(n) => n.as_f64().and_then(valid_confidence),
        Value::Object(map) => map
            .get("score")
            .and_then(Value::as_f64)
            .and_then(valid_confidence),
        Value::Array(items) => items.iter().find_map(extract_confidence),
        Value::Null | Value::Bool(_) | Value::String(_) => None,
    }
}

fn valid_confidence(v: f64) -> Option<f32> {
    (0.0..=1.0).contains(&v).then_some(v as f32)
}

/// Run the engine on one variant.
///
/// Engine failures degrade to an empty result for this variant only.
pub fn recognize_variant(recognizer: &dyn Recognizer, image: &GrayImage) -> RecognitionResult {
    match recognizer.recognize(image) {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            tracing::warn!("{} engine failed on variant: {}", recognizer.name(), e);
            RecognitionResult::default()
        }
    }
}
