use image::{GrayImage, RgbImage};
use std::collections::HashSet;
use std::time::Instant;

use super::steps::{denoise, grayscale, morphology, resize, threshold};

/// Binarization strategy applied to the smoothed grayscale image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    /// Gaussian-weighted local mean threshold
    Adaptive { block_size: u32, offset: i16 },
    /// Global threshold chosen by Otsu's method
    Otsu,
}

impl Binarization {
    fn apply(&self, image: &GrayImage) -> GrayImage {
        match *self {
            Self::Adaptive { block_size, offset } => {
                threshold::adaptive_gaussian(image, block_size, offset)
            }
            Self::Otsu => threshold::otsu(image),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Adaptive { block_size, offset } => format!("adaptive{}c{}", block_size, offset),
            Self::Otsu => "otsu".to_string(),
        }
    }
}

/// Binarization branches, in the order their variants are emitted
pub const BINARIZATIONS: [Binarization; 3] = [
    Binarization::Adaptive {
        block_size: 41,
        offset: 10,
    },
    Binarization::Adaptive {
        block_size: 31,
        offset: 7,
    },
    Binarization::Otsu,
];

/// A derived single-channel image fed to the recognizer
#[derive(Debug, Clone)]
pub struct Variant {
    /// Branch that produced this variant, e.g. `otsu/inverted-open`
    pub name: String,
    pub image: GrayImage,
}

/// Approximate identity of a variant.
///
/// Two images with equal dimensions and equal intensity sums are treated as
/// the same variant. Distinct images can collide; this is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub height: u32,
    pub width: u32,
    pub intensity_sum: u64,
}

impl Variant {
    fn new(branch: &str, derivative: &str, image: GrayImage) -> Self {
        Self {
            name: format!("{}/{}", branch, derivative),
            image,
        }
    }

    pub fn key(&self) -> VariantKey {
        VariantKey {
            height: self.image.height(),
            width: self.image.width(),
            intensity_sum: self.image.as_raw().iter().map(|&v| u64::from(v)).sum(),
        }
    }
}

/// Generate the ordered, deduplicated recognition variants of a color image.
///
/// The image is upscaled 4x, converted to grayscale and smoothed, then each
/// binarization branch is median-filtered and expanded into five morphological
/// derivatives. The input must have non-zero dimensions.
pub fn generate_variants(image: &RgbImage) -> Vec<Variant> {
    let start = Instant::now();

    let upscaled = resize::apply(image);
    let gray = denoise::smooth(&grayscale::apply(&upscaled));

    let mut variants = Vec::with_capacity(BINARIZATIONS.len() * 5);
    for binarization in BINARIZATIONS {
        let branch = binarization.label();
        let binary = denoise::median(&binarization.apply(&gray));
        let inverted = morphology::invert(&binary);

        let inverted_open = morphology::open(&inverted);
        let inverted_close = morphology::close(&inverted);

        variants.push(Variant::new(&branch, "open", morphology::open(&binary)));
        variants.push(Variant::new(&branch, "close", morphology::close(&binary)));
        variants.push(Variant::new(&branch, "inverted", inverted));
        variants.push(Variant::new(&branch, "inverted-open", inverted_open));
        variants.push(Variant::new(&branch, "inverted-close", inverted_close));
    }

    let generated = variants.len();
    let unique = dedup(variants);

    tracing::debug!(
        "Generated {} variants ({} unique) in {}ms",
        generated,
        unique.len(),
        start.elapsed().as_millis()
    );

    unique
}

/// Drop variants whose key was already seen, keeping first occurrences
fn dedup(variants: Vec<Variant>) -> Vec<Variant> {
    let mut seen = HashSet::new();
    variants
        .into_iter()
        .filter(|variant| seen.insert(variant.key()))
        .collect()
}
