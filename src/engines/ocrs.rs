//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Only the recognition model is loaded: variants are already tightly cropped
//! single lines, so the whole image is handed to the recognizer as one line.

use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;
use rten_imageproc::{Rect, RotatedRect};
use serde_json::Value;

use super::download;

/// Default recognition model URL from the ocrs project
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// Recognition-only engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create the engine, downloading the recognition model if needed
    pub fn new(_config: &Config) -> Result<Self, OcrError> {
        let cache_dir = download::cache_dir(None)?;
        let recognition_model_path = download::ensure_downloaded(
            RECOGNITION_MODEL_URL,
            &cache_dir,
            "text-recognition.rten",
        )?;

        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: None,
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized (recognition only)");

        Ok(Self { engine })
    }
}

impl Recognizer for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    /// Returns the recognized line as a bare string; ocrs reports no confidence
    fn recognize(&self, image: &GrayImage) -> Result<Value, OcrError> {
        // ImageSource::from_bytes expects HWC RGB bytes
        let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::RecognitionError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::RecognitionError(format!("Failed to prepare input: {}", e)))?;

        // One line made of one word covering the whole variant
        let (width, height) = dimensions;
        let whole_image = Rect::from_tlhw(0.0, 0.0, height as f32, width as f32);
        let lines = vec![vec![RotatedRect::from_rect(whole_image)]];

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &lines)
            .map_err(|e| OcrError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        let text = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .map(|line| {
                line.words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Value::String(text))
    }
}
