//! OCR engine implementations
//!
//! This module contains implementations of the Recognizer trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags.

#[cfg(any(feature = "engine-ocrs", feature = "engine-tesseract"))]
mod download;

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;

use crate::config::Config;
use crate::engine::Recognizer;
use crate::error::OcrError;
use serde::Serialize;
use std::sync::Arc;

/// Information about the active engine
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl EngineInfo {
    pub fn of(recognizer: &dyn Recognizer) -> Self {
        Self {
            name: recognizer.name(),
            description: recognizer.description(),
        }
    }
}

/// Names of the engines compiled into this build
pub fn available() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");
    #[cfg(feature = "engine-tesseract")]
    names.push("tesseract");
    names
}

/// Build the engine selected in the configuration.
///
/// This loads (and on first use downloads) model data, so it is done once at
/// startup and the result shared between requests.
pub fn create(config: &Config) -> Result<Arc<dyn Recognizer>, OcrError> {
    match config.engine.as_str() {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => {
            tracing::info!("Initializing ocrs engine...");
            Ok(Arc::new(ocrs::OcrsEngine::new(config)?))
        }
        #[cfg(feature = "engine-tesseract")]
        "tesseract" => {
            tracing::info!("Initializing tesseract engine...");
            Ok(Arc::new(tesseract::TesseractEngine::new(config)?))
        }
        other => Err(OcrError::InitializationError(format!(
            "OCR engine '{}' is not available in this build (available: [{}]). \
             Build with --features engine-ocrs or --features engine-tesseract",
            other,
            available().join(", ")
        ))),
    }
}
