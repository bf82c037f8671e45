//! Image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGB
//! pixel grid the rest of the engine operates on.
//!
//! Transport layers usually hand the engine an already-decoded image;
//! this entry point exists for callers that receive raw uploads.

use image::RgbImage;

use crate::types::EngineError;

/// Decode raw image bytes into an RGB pixel grid.
///
/// Supports whatever the `image` crate can decode. Alpha, grayscale,
/// and 16-bit inputs are converted to 8-bit RGB.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] if `bytes` is empty.
/// Returns [`EngineError::Decode`] if the image format is unrecognized
/// or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, EngineError> {
    if bytes.is_empty() {
        return Err(EngineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(EngineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = decode_image(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(EngineError::Decode(_))));
    }

    #[test]
    fn valid_png_decodes_to_rgb() {
        let img = image::RgbaImage::from_fn(3, 2, |_, _| image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();

        let rgb = decode_image(&buf).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
    }
}
