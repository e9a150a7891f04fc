use image::{imageops::FilterType, DynamicImage, GrayImage, Luma};

/// Image ready for planning.
pub struct Prepared {
    /// Inverted grayscale, zero outside the board circle: bright means ink to capture.
    pub ink: GrayImage,
    /// Grayscale as seen by a viewer, white outside the board circle.
    pub original: GrayImage,
}

/// Crops `image` to its centred square, optionally resizes it to
/// `resolution`×`resolution`, and masks everything outside the inscribed circle.
pub fn prepare(image: &DynamicImage, resolution: Option<u32>) -> Prepared {
    let side = image.width().min(image.height());
    let mut square = image.crop_imm(
        (image.width() - side) / 2,
        (image.height() - side) / 2,
        side,
        side,
    );
    if let Some(resolution) = resolution.filter(|&r| r > 0 && r != side) {
        square = square.resize_exact(resolution, resolution, FilterType::Lanczos3);
    }
    let mut ink = square.to_luma8();
    image::imageops::invert(&mut ink);
    mask_circle(&mut ink);
    let mut original = ink.clone();
    image::imageops::invert(&mut original);
    Prepared { ink, original }
}

/// Zeroes every pixel whose centre lies outside the ellipse inscribed in the image.
fn mask_circle(image: &mut GrayImage) {
    let rx = f64::from(image.width()) / 2.0;
    let ry = f64::from(image.height()) / 2.0;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = (f64::from(x) + 0.5 - rx) / rx;
        let dy = (f64::from(y) + 0.5 - ry) / ry;
        if dx * dx + dy * dy > 1.0 {
            *pixel = Luma([0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn crops_to_centred_square() {
        let prepared = prepare(&gray(120, 80, 10), None);
        assert_eq!(prepared.ink.dimensions(), (80, 80));
        assert_eq!(prepared.original.dimensions(), (80, 80));
    }

    #[test]
    fn inverts_inside_and_blanks_outside() {
        let prepared = prepare(&gray(64, 64, 10), None);
        assert_eq!(prepared.ink.get_pixel(32, 32).0[0], 245);
        assert_eq!(prepared.ink.get_pixel(0, 0).0[0], 0);
        assert_eq!(prepared.original.get_pixel(32, 32).0[0], 10);
        assert_eq!(prepared.original.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn resizes_when_asked() {
        let prepared = prepare(&gray(300, 200, 0), Some(50));
        assert_eq!(prepared.ink.dimensions(), (50, 50));
    }
}
