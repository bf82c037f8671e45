//! Chroma-key segmentation: classify pixels as background or foreground.
//!
//! A pixel is background when its hue falls inside the configured band
//! and both saturation and value reach their floors. The band defaults
//! to green (hue 35–85 in half-degrees), the usual studio backdrop.
//!
//! Two outputs are derived from the same classification: a binary mask
//! (255 = foreground) for downstream checks, and a whitened copy of the
//! image for visualization and thresholding, where every background
//! pixel is forced to pure white. The input image is never mutated.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::types::ChromaKey;

/// Mask value for foreground (object) pixels.
pub const FOREGROUND: u8 = 255;

/// Mask value for background (keyed) pixels.
pub const BACKGROUND: u8 = 0;

/// Convert an RGB pixel to HSV in the 8-bit convention.
///
/// Returns `(hue, saturation, value)` with hue in half-degrees (0–179)
/// and saturation/value in 0–255. Gray pixels (zero chroma) get hue 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> (u8, u8, u8) {
    let [r, g, b] = pixel.0;
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let value = max;
    let saturation = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let hue_degrees = if delta <= 0.0 {
        0.0
    } else if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta) + 120.0
    } else {
        60.0 * ((rf - gf) / delta) + 240.0
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };

    (
        (hue_degrees / 2.0).round().min(179.0) as u8,
        saturation.round() as u8,
        value.round() as u8,
    )
}

/// Returns `true` if the pixel falls inside the chroma-key band.
#[must_use]
pub fn is_background(pixel: Rgb<u8>, key: &ChromaKey) -> bool {
    let (hue, saturation, value) = rgb_to_hsv(pixel);
    (key.hue_low..=key.hue_high).contains(&hue)
        && saturation >= key.saturation_floor
        && value >= key.value_floor
}

/// Classify every pixel of the image against the chroma key.
///
/// Returns a binary mask of the same dimensions: [`FOREGROUND`] (255)
/// where the pixel is kept, [`BACKGROUND`] (0) where it matches the key.
/// Total over any image; there are no error conditions.
#[must_use = "returns the foreground mask"]
pub fn chroma_mask(image: &RgbImage, key: &ChromaKey) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if is_background(*image.get_pixel(x, y), key) {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    })
}

/// Produce a copy of the image with all background pixels forced to
/// pure white.
///
/// The classification itself carries no color; whitening is what makes
/// the keyed background survive a bright-cutoff binarization and renders
/// cleanly for operators.
#[must_use = "returns a whitened copy, the input is not mutated"]
pub fn whiten_background(image: &RgbImage, key: &ChromaKey) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = *image.get_pixel(x, y);
        if is_background(pixel, key) {
            Rgb([255, 255, 255])
        } else {
            pixel
        }
    })
}

/// Returns `true` if the mask contains at least one foreground pixel.
#[must_use]
pub fn has_foreground(mask: &GrayImage) -> bool {
    mask.pixels().any(|p| p.0[0] != BACKGROUND)
}
