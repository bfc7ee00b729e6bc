//! CAPTCHA solving pipeline
//!
//! Generates preprocessing variants, recognizes each one, filters the text by
//! mode, scores it and keeps the best candidate. Stateless: the only shared
//! object is the recognizer, which is used read-only.

use crate::engine::Recognizer;
use crate::error::OcrError;
use crate::mode::Mode;
use crate::preprocessing::generate_variants;
use crate::recognition::recognize_variant;
use crate::scoring::score_candidate;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

/// Largest accepted input width or height. Variants are upscaled 4x per axis,
/// so this bounds the per-request working set.
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// Best text found for a CAPTCHA
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Solution {
    pub text: String,
    pub confidence: Option<f32>,
}

/// One scored read of one variant
#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    confidence: Option<f32>,
    score: f64,
}

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP, ...).
/// Images larger than [`MAX_IMAGE_DIMENSION`] on either side are rejected.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, OcrError> {
    if data.is_empty() {
        return Err(OcrError::InvalidInput("Empty file".to_string()));
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
    limits.max_image_height = Some(MAX_IMAGE_DIMENSION);

    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| OcrError::InvalidInput(format!("Failed to read image: {}", e)))?;
    reader.limits(limits);

    let image = reader
        .decode()
        .map_err(|e| OcrError::InvalidInput(format!("Failed to decode image: {}", e)))?;
    check_dimensions(&image)?;
    Ok(image)
}

fn check_dimensions(image: &DynamicImage) -> Result<(), OcrError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(OcrError::InvalidInput(format!(
            "Image has zero area ({}x{})",
            width, height
        )));
    }
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(OcrError::InvalidInput(format!(
            "Image is {}x{}, larger than {}x{}",
            width, height, MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION
        )));
    }
    Ok(())
}

fn validate_expected_length(expected_length: Option<usize>) -> Result<(), OcrError> {
    if expected_length == Some(0) {
        return Err(OcrError::InvalidArgument(
            "expected length must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Solve a decoded CAPTCHA image.
///
/// Returns an empty text with no confidence when no variant produced any
/// character of the requested mode.
pub fn solve(
    image: &DynamicImage,
    recognizer: &dyn Recognizer,
    mode: Mode,
    expected_length: Option<usize>,
) -> Result<Solution, OcrError> {
    validate_expected_length(expected_length)?;
    check_dimensions(image)?;

    let variants = generate_variants(&image.to_rgb8());

    let mut best: Option<Candidate> = None;
    for variant in &variants {
        let read = recognize_variant(recognizer, &variant.image);
        let text = mode.filter(&read.text);
        let score = score_candidate(&text, read.confidence, expected_length);

        tracing::debug!(
            "Variant {}: raw={:?} filtered={:?} confidence={:?} score={:.1}",
            variant.name,
            read.text,
            text,
            read.confidence,
            score
        );

        // Strict comparison: the earliest variant wins ties
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Candidate {
                text,
                confidence: read.confidence,
                score,
            });
        }
    }

    Ok(match best {
        Some(candidate) if !candidate.text.is_empty() => Solution {
            text: candidate.text,
            confidence: candidate.confidence,
        },
        _ => Solution::default(),
    })
}

/// Decode and solve encoded image bytes.
///
/// Arguments are validated before decoding, and decoding happens before any
/// variant is generated.
pub fn solve_bytes(
    data: &[u8],
    recognizer: &dyn Recognizer,
    mode: Mode,
    expected_length: Option<usize>,
) -> Result<Solution, OcrError> {
    validate_expected_length(expected_length)?;
    let image = decode_image(data)?;
    solve(&image, recognizer, mode, expected_length)
}

/// Read, decode and solve an image file
pub fn solve_path(
    path: &Path,
    recognizer: &dyn Recognizer,
    mode: Mode,
    expected_length: Option<usize>,
) -> Result<Solution, OcrError> {
    let data = std::fs::read(path).map_err(|e| {
        OcrError::InvalidInput(format!("Cannot read image {}: {}", path.display(), e))
    })?;
    solve_bytes(&data, recognizer, mode, expected_length)
}
