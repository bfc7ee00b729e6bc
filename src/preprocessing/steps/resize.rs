use image::{imageops::FilterType, RgbImage};

/// Uniform upscale factor; CAPTCHA glyphs are small
pub const SCALE: u32 = 4;

/// Upscale the color image by [`SCALE`] on both axes with cubic interpolation
pub fn apply(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    image::imageops::resize(image, width * SCALE, height * SCALE, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_resize_scales_exactly() {
        let img = RgbImage::from_pixel(30, 11, Rgb([10, 20, 30]));
        let result = apply(&img);
        assert_eq!(result.dimensions(), (120, 44));
    }

    #[test]
    fn test_resize_single_pixel() {
        let img = RgbImage::from_pixel(1, 1, Rgb([200, 200, 200]));
        let result = apply(&img);
        assert_eq!(result.dimensions(), (4, 4));
        assert_eq!(result.get_pixel(2, 2), &Rgb([200, 200, 200]));
    }
}
