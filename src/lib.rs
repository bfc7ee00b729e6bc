//! Local CAPTCHA solver
//!
//! A CAPTCHA image is expanded into a set of binarized variants, each variant
//! is read by an injected OCR engine in recognition-only mode, and the reads
//! are filtered and scored to pick the most plausible text.

pub mod cli;
pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod mode;
pub mod preprocessing;
pub mod recognition;
pub mod scoring;
pub mod server;
pub mod solver;

pub use engine::Recognizer;
pub use error::OcrError;
pub use mode::Mode;
pub use recognition::{normalize, RecognitionResult};
pub use solver::{solve, solve_bytes, solve_path, Solution};
