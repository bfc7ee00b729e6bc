use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

/// BT.601 luma weights in 14-bit fixed point; they sum to 1 << 14
const RED_WEIGHT: u32 = 4899;
const GREEN_WEIGHT: u32 = 9617;
const BLUE_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Convert image to single-channel intensity using BT.601 weights
pub fn apply(image: &RgbImage) -> GrayImage {
    map_colors(image, |pixel: Rgb<u8>| {
        let Rgb([r, g, b]) = pixel;
        let luma = u32::from(r) * RED_WEIGHT
            + u32::from(g) * GREEN_WEIGHT
            + u32::from(b) * BLUE_WEIGHT
            + (1 << (SHIFT - 1));
        Luma([(luma >> SHIFT) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_stays_darker_than_paper() {
        let img = RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgb([30, 10, 120])
            } else {
                Rgb([250, 245, 230])
            }
        });

        let gray = apply(&img);

        assert_eq!(gray.dimensions(), (8, 4));
        assert!(gray.get_pixel(0, 0)[0] < gray.get_pixel(7, 0)[0]);
    }

    #[test]
    fn test_luma_weighting() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([0, 255, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = apply(&img);

        assert_eq!(gray.get_pixel(0, 0)[0], 150);
        assert_eq!(gray.get_pixel(1, 0)[0], 76);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn test_neutral_colors_keep_their_level() {
        for level in [0u8, 1, 127, 128, 254, 255] {
            let gray = apply(&RgbImage::from_pixel(1, 1, Rgb([level, level, level])));
            assert_eq!(gray.get_pixel(0, 0)[0], level);
        }
    }
}
