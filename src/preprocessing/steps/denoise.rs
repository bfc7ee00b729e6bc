use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::{filter3x3, median_filter};
use imageproc::map::map_colors;

/// 3x3 binomial approximation of a Gaussian, weights sum to 16
const GAUSSIAN_3X3: [f32; 9] = [
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    4.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
];

/// Light Gaussian smoothing to suppress speckle without erasing strokes.
/// Results are rounded to the nearest intensity.
pub fn smooth(image: &GrayImage) -> GrayImage {
    let blurred: ImageBuffer<Luma<f32>, Vec<f32>> = filter3x3(image, &GAUSSIAN_3X3);
    map_colors(&blurred, |p| Luma([p.0[0].round().clamp(0.0, 255.0) as u8]))
}

/// Apply 3x3 median filter to remove salt-and-pepper noise
pub fn median(image: &GrayImage) -> GrayImage {
    median_filter(image, 1, 1)
}
