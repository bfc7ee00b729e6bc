use image::{GrayImage, ImageBuffer, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::separable_filter_equal;
use imageproc::map::map_colors;

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Adaptive threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes white when it is brighter than the weighted mean of its
/// `block_size` x `block_size` neighbourhood minus `offset`. `block_size` must
/// be odd.
pub fn adaptive_gaussian(image: &GrayImage, block_size: u32, offset: i16) -> GrayImage {
    let kernel = gaussian_kernel(block_size);

    let intensities: ImageBuffer<Luma<f32>, Vec<f32>> =
        map_colors(image, |p| Luma([p.0[0] as f32]));
    let local_mean = separable_filter_equal(&intensities, &kernel);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y).0[0] as i16;
        let mean = local_mean.get_pixel(x, y).0[0].round().clamp(0.0, 255.0) as i16;
        if pixel - mean > -offset {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Global binary threshold at the level minimizing intra-class variance
pub fn otsu(image: &GrayImage) -> GrayImage {
    let level = otsu_level(image);
    map_colors(image, |p| {
        if p.0[0] > level {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Normalized 1-D Gaussian of length `size`, with the sigma conventionally
/// derived from the window size
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}
