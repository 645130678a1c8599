use memedo_core::{FrameBuffer, MemedoError, MemedoResult, PixelFormat};

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Still-image encoder. Alpha is discarded before encoding.
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoder {
    quality: u8,
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl JpegEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn encode(&self, frame: &FrameBuffer) -> MemedoResult<Vec<u8>> {
        let rgb = match frame.format {
            PixelFormat::Rgb8 => frame.clone(),
            PixelFormat::Rgba8 => frame.flatten(),
        };

        let mut bytes = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode(&rgb.data, rgb.width, rgb.height, image::ExtendedColorType::Rgb8)
            .map_err(|e| MemedoError::Encode(format!("failed to encode JPEG: {}", e)))?;

        tracing::debug!(
            "encoded {}x{} JPEG at quality {} ({} bytes)",
            rgb.width,
            rgb.height,
            self.quality,
            bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_encode_rgba_frame() {
        let fb = FrameBuffer::solid(16, 8, [200, 10, 10, 128]);
        let bytes = JpegEncoder::default().encode(&fb).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_jpeg_quality_is_clamped() {
        let fb = FrameBuffer::solid(2, 2, [0, 0, 0, 255]);
        assert!(JpegEncoder::new(0).encode(&fb).is_ok());
    }
}
