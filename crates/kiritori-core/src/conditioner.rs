//! Deterministic pixel transform preparing a capture for recognition.
//!
//! Small screen text recognizes poorly at native resolution; the upscale is
//! the single most important step here. The recognizer is also tuned for
//! dark text on a light background, hence the auto-invert.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};

use crate::error::Error;

/// Condition a captured bitmap: luminance, upscale, auto-invert, unsharp.
///
/// Pure transform; the input is never modified.
pub fn condition(image: &DynamicImage, upscale_factor: u32) -> Result<GrayImage, Error> {
    let gray = image.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(Error::InvalidImage);
    }

    let factor = upscale_factor.max(1);
    let scaled = imageops::resize(
        &gray,
        gray.width() * factor,
        gray.height() * factor,
        FilterType::CatmullRom,
    );

    let oriented = auto_invert(scaled);
    Ok(unsharp(&oriented))
}

fn mean_luma(image: &GrayImage) -> f32 {
    let sum: u64 = image.pixels().map(|p| u64::from(p.0[0])).sum();
    sum as f32 / (image.width() * image.height()) as f32
}

/// Invert when the capture is mostly dark background.
fn auto_invert(mut image: GrayImage) -> GrayImage {
    if mean_luma(&image) < 128.0 {
        for p in image.pixels_mut() {
            p.0[0] = 255 - p.0[0];
        }
    }
    image
}

/// Light unsharp mask: out = clamp(1.5·orig − 0.5·blur(σ=1), 0, 255).
fn unsharp(image: &GrayImage) -> GrayImage {
    let blurred = imageops::blur(image, 1.0);
    let mut out = GrayImage::new(image.width(), image.height());
    for (dst, (orig, blur)) in out
        .pixels_mut()
        .zip(image.pixels().zip(blurred.pixels()))
    {
        let v = 1.5 * f32::from(orig.0[0]) - 0.5 * f32::from(blur.0[0]);
        *dst = Luma([v.clamp(0.0, 255.0) as u8]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_image(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn test_zero_area_is_invalid() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(condition(&img, 3), Err(Error::InvalidImage)));
    }

    #[test]
    fn test_upscale_dimensions() {
        let out = condition(&flat_image(4, 6, 200), 3).unwrap();
        assert_eq!((out.width(), out.height()), (12, 18));
    }

    #[test]
    fn test_zero_factor_clamped_to_identity_scale() {
        let out = condition(&flat_image(4, 4, 200), 0).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
    }

    #[test]
    fn test_dark_background_inverted() {
        // Uniformly dark capture ends up light after conditioning.
        let out = condition(&flat_image(8, 8, 10), 1).unwrap();
        assert!(mean_luma(&out) > 128.0);
    }

    #[test]
    fn test_light_background_kept() {
        let out = condition(&flat_image(8, 8, 240), 1).unwrap();
        assert!(mean_luma(&out) > 128.0);
    }

    #[test]
    fn test_deterministic() {
        let mut img = GrayImage::new(10, 10);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Luma([((x * 17 + y * 31) % 256) as u8]);
        }
        let img = DynamicImage::ImageLuma8(img);
        let a = condition(&img, 2).unwrap();
        let b = condition(&img, 2).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_unsharp_flat_image_unchanged() {
        // On a constant image the mask is a no-op apart from rounding.
        let out = condition(&flat_image(6, 6, 200), 1).unwrap();
        for p in out.pixels() {
            assert!((i16::from(p.0[0]) - 200).abs() <= 1);
        }
    }
}
