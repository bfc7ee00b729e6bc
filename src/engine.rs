use crate::error::OcrError;
use image::GrayImage;
use serde_json::Value;

/// Trait that all OCR engines must implement
///
/// Engines are constructed once at startup and shared read-only between
/// requests, so `recognize` must not mutate engine state.
pub trait Recognizer: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "tesseract")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize a single, tightly cropped line of text.
    ///
    /// The engine must not run text detection or orientation correction.
    /// The returned value is the engine's raw output in whatever shape it
    /// naturally produces; see [`crate::recognition::normalize`].
    fn recognize(&self, image: &GrayImage) -> Result<Value, OcrError>;
}
