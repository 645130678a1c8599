use memedo_core::{AnimationFrame, MemedoError, MemedoResult, PixelFormat};

/// Default NeuQuant sampling speed (1 = best quality, 30 = fastest).
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Animated GIF encoder using the `image` crate.
///
/// Output always loops forever. Each frame keeps its own delay.
#[derive(Debug, Clone, Copy)]
pub struct GifEncoder {
    speed: i32,
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_GIF_SPEED)
    }
}

impl GifEncoder {
    pub fn new(speed: i32) -> Self {
        Self {
            speed: speed.clamp(1, 30),
        }
    }

    /// Encode an ordered sequence of RGBA frames into GIF bytes.
    ///
    /// Every frame must share the first frame's dimensions.
    pub fn encode(&self, frames: &[AnimationFrame]) -> MemedoResult<Vec<u8>> {
        let first = frames
            .first()
            .ok_or_else(|| MemedoError::Encode("no frames to encode for GIF".into()))?;
        let (width, height) = (first.buffer.width, first.buffer.height);

        let mut bytes = Vec::new();
        {
            let mut encoder = image::codecs::gif::GifEncoder::new_with_speed(&mut bytes, self.speed);
            encoder
                .set_repeat(image::codecs::gif::Repeat::Infinite)
                .map_err(|e| MemedoError::Encode(format!("failed to set GIF repeat: {}", e)))?;

            for (i, frame) in frames.iter().enumerate() {
                let buffer = &frame.buffer;
                if buffer.width != width || buffer.height != height {
                    return Err(MemedoError::Encode(format!(
                        "frame {} has dimensions {}x{}, expected {}x{}",
                        i, buffer.width, buffer.height, width, height
                    )));
                }
                if buffer.format != PixelFormat::Rgba8 {
                    return Err(MemedoError::Encode(format!(
                        "frame {} is not RGBA",
                        i
                    )));
                }

                let rgba = image::RgbaImage::from_raw(width, height, buffer.data.clone())
                    .ok_or_else(|| MemedoError::Encode(format!("invalid frame data at frame {}", i)))?;
                let gif_frame = image::Frame::from_parts(
                    rgba,
                    0,
                    0,
                    image::Delay::from_numer_denom_ms(frame.delay_ms, 1),
                );

                encoder.encode_frame(gif_frame).map_err(|e| {
                    MemedoError::Encode(format!("failed to encode GIF frame {}: {}", i, e))
                })?;
            }
        }

        tracing::debug!(
            "encoded {} frames to GIF ({}x{}, speed={}, {} bytes)",
            frames.len(),
            width,
            height,
            self.speed,
            bytes.len()
        );

        Ok(bytes)
    }
}
