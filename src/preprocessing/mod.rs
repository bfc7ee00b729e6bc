//! Image preprocessing for CAPTCHA recognition
//!
//! Expands one color image into a deduplicated set of binary variants, each
//! of which is recognized independently.

pub mod steps;
pub mod variants;

pub use variants::{generate_variants, Variant, VariantKey};
