//! Image encoding to in-memory byte buffers.
//!
//! The engine and overlay code work on decoded pixel grids; transports
//! want bytes. These helpers are pure: image in, `Vec<u8>` out.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// Errors produced while encoding an image for presentation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The underlying encoder rejected the image.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encode an RGB image as PNG bytes.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if the PNG encoder fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Encode an RGB image as JPEG bytes at the given quality (1–100).
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if the JPEG encoder fails.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> RgbImage {
        RgbImage::from_fn(8, 6, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([200, 30, 30])
            } else {
                image::Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn png_round_trips_losslessly() {
        let img = sample();
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn jpeg_preserves_dimensions() {
        let img = sample();
        let bytes = encode_jpeg(&img, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), img.dimensions());
    }

    #[test]
    fn png_bytes_start_with_signature() {
        let bytes = encode_png(&sample()).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }
}
