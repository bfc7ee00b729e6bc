use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_close, grayscale_open, Mask};

/// 2x2 square structuring element anchored at its lower-right cell, so each
/// output pixel covers itself and its left, upper and upper-left neighbours
fn square_2x2() -> Mask {
    Mask::from_image(&GrayImage::from_pixel(2, 2, Luma([255])), 1, 1)
}

/// Erosion then dilation; strips bright specks thinner than the element
pub fn open(image: &GrayImage) -> GrayImage {
    grayscale_open(image, &square_2x2())
}

/// Dilation then erosion; fills dark gaps thinner than the element
pub fn close(image: &GrayImage) -> GrayImage {
    grayscale_close(image, &square_2x2())
}

pub fn invert(image: &GrayImage) -> GrayImage {
    let mut inverted = image.clone();
    image::imageops::invert(&mut inverted);
    inverted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_white(img: &GrayImage) -> usize {
        img.pixels().filter(|p| p.0[0] == 255).count()
    }

    fn block(x0: u32, y0: u32, size: u32) -> GrayImage {
        GrayImage::from_fn(8, 8, |x, y| {
            let inside = (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y);
            Luma([if inside { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_open_removes_single_bright_pixel() {
        let mut img = GrayImage::new(8, 8);
        img.put_pixel(3, 3, Luma([255]));
        assert_eq!(count_white(&open(&img)), 0);
    }

    #[test]
    fn test_open_and_close_shift_blocks_by_anchor() {
        // The even-sized element is anchored off-centre, so a block survives
        // both operations moved one pixel right and down
        let img = block(2, 2, 3);
        let shifted = block(3, 3, 3);

        let opened = open(&img);
        assert_eq!(opened, shifted);
        assert_eq!(opened.get_pixel(2, 2).0[0], 0);
        assert_eq!(close(&img), shifted);
    }

    #[test]
    fn test_open_drops_speck_beside_block() {
        let mut img = block(2, 2, 3);
        img.put_pixel(6, 0, Luma([255]));

        let opened = open(&img);
        assert_eq!(count_white(&opened), 9);
        assert_eq!(opened.get_pixel(6, 0).0[0], 0);
        assert_eq!(opened.get_pixel(7, 1).0[0], 0);
    }

    #[test]
    fn test_close_fills_single_dark_pixel() {
        let mut img = GrayImage::from_pixel(8, 8, Luma([255]));
        img.put_pixel(4, 4, Luma([0]));
        assert_eq!(count_white(&close(&img)), 64);
    }

    #[test]
    fn test_invert() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([(x * 100) as u8]));
        let inverted = invert(&img);
        assert_eq!(inverted.get_pixel(0, 0).0[0], 255);
        assert_eq!(inverted.get_pixel(2, 0).0[0], 55);
        assert_eq!(invert(&inverted), img);
    }
}
