//! Tesseract engine implementation
//!
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use. Pages are
//! segmented as a single text line, so no layout analysis runs.

use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use serde_json::{json, Value};
use tesseract_static::tesseract::Tesseract;

use super::download;

/// Traineddata language; CAPTCHAs use the Latin alphabet
const LANGUAGE: &str = "eng";

/// Page segmentation mode "treat the image as a single text line"
const PSM_SINGLE_LINE: &str = "7";

/// Tesseract OCR Engine
pub struct TesseractEngine {
    /// Path to tessdata directory
    tessdata_path: String,
}

impl TesseractEngine {
    /// Create a new Tesseract-based OCR engine
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(LANGUAGE)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(LANGUAGE)).map_err(|e| {
            OcrError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Tesseract engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            LANGUAGE
        );

        Ok(Self { tessdata_path })
    }
}

impl Recognizer for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine in single-line mode - reports mean confidence"
    }

    /// Returns `{"text": ..., "score": ...}` with the score scaled to 0.0-1.0
    fn recognize(&self, image: &GrayImage) -> Result<Value, OcrError> {
        let (width, height) = image.dimensions();

        // Convert to BMP in memory (BMP is always supported by leptonica)
        let mut bmp_data = Vec::new();
        {
            let mut cursor = std::io::Cursor::new(&mut bmp_data);
            DynamicImage::ImageLuma8(image.clone())
                .into_rgb8()
                .write_to(&mut cursor, image::ImageFormat::Bmp)
                .map_err(|e| {
                    OcrError::RecognitionError(format!("Failed to convert to BMP: {}", e))
                })?;
        }

        // Tesseract instances are not shareable between threads; one per call
        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(LANGUAGE)).map_err(|e| {
            OcrError::RecognitionError(format!("Failed to create Tesseract: {}", e))
        })?;

        tess = tess
            .set_variable("tessedit_pageseg_mode", PSM_SINGLE_LINE)
            .map_err(|e| {
                OcrError::RecognitionError(format!("Failed to set page segmentation: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::RecognitionError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| OcrError::RecognitionError(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::RecognitionError(format!("Failed to get text: {}", e)))?;

        // Mean confidence is on a 0-100 scale
        let confidence = f64::from(tess.mean_text_conf()) / 100.0;

        Ok(json!({
            "text": text.trim(),
            "score": confidence,
        }))
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, OcrError> {
    let cache_dir = download::cache_dir(Some("tessdata"))?;
    let traineddata_file = format!("{}.traineddata", language);
    download::ensure_downloaded(&tessdata_url(language), &cache_dir, &traineddata_file)?;

    // Tesseract expects the directory, not the file
    cache_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::InitializationError("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // Use tessdata_fast for smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tessdata_url() {
        assert_eq!(
            tessdata_url("eng"),
            "https://github.com/tesseract-ocr/tessdata_fast/raw/main/eng.traineddata"
        );
    }
}
