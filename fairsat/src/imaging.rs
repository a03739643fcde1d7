//! JPEG encoding shared by acquisition and cropping.
//!
//! Everything written into the cache is lossy JPEG at the quality configured
//! in [`crate::store::JPEG_QUALITY`]; the companion device only ever sees
//! these re-encoded bytes, never the provider's raw payload.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::store::JPEG_QUALITY;

/// Encode an image to cache-format JPEG bytes.
///
/// The image is flattened to RGB first; JPEG has no alpha channel.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Gradient test image of the given square size, JPEG-encoded.
    pub fn test_jpeg(size: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(size, size, |x, y| {
            let r = ((x as f32 / size as f32) * 255.0) as u8;
            let g = ((y as f32 / size as f32) * 255.0) as u8;
            Rgb([r, g, 128])
        });
        encode_jpeg(&DynamicImage::ImageRgb8(img)).expect("failed to encode test JPEG")
    }

    #[test]
    fn test_encode_produces_decodable_jpeg() {
        let bytes = test_jpeg(64);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 64);
    }

    #[test]
    fn test_encode_flattens_alpha() {
        let rgba = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 128]));
        let bytes = encode_jpeg(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }
}
