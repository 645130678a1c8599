use serde::{Deserialize, Serialize};

/// Pixel format of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGBA (4 bytes per pixel).
    Rgba8,
    /// 8-bit RGB (3 bytes per pixel, no alpha).
    Rgb8,
}

impl PixelFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// A raw pixel canvas: a template's base image, one GIF frame, or a caption overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Raw pixel data, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: PixelFormat,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with zeros (transparent black).
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let size = (width as usize) * (height as usize) * format.bytes_per_pixel();
        Self {
            data: vec![0u8; size],
            width,
            height,
            format,
        }
    }

    /// Create an RGBA frame buffer filled with a single pixel value.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgba8,
        }
    }

    /// Wrap raw RGBA bytes. Returns None if the length does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            format: PixelFormat::Rgba8,
        })
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether any pixel carries non-zero alpha. Always true for RGB buffers.
    pub fn has_visible_pixels(&self) -> bool {
        match self.format {
            PixelFormat::Rgba8 => self.data.chunks_exact(4).any(|p| p[3] > 0),
            PixelFormat::Rgb8 => self.pixel_count() > 0,
        }
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * bpp;
        match self.format {
            PixelFormat::Rgba8 => Some([
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
                self.data[offset + 3],
            ]),
            PixelFormat::Rgb8 => Some([
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
                255,
            ]),
        }
    }

    /// Set the RGBA value at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * bpp;
        self.data[offset..offset + 3].copy_from_slice(&rgba[..3]);
        if self.format == PixelFormat::Rgba8 {
            self.data[offset + 3] = rgba[3];
        }
    }

    /// Alpha-composite `src` on top of `self` at position (dx, dy) ("over" operator).
    ///
    /// Both buffers must be RGBA; other formats are left untouched.
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32) {
        if self.format != PixelFormat::Rgba8 || src.format != PixelFormat::Rgba8 {
            return;
        }

        let dst_width = self.width as i32;
        let dst_height = self.height as i32;

        let mut start_y = 0;
        let mut end_y = src.height as i32;
        let mut start_x = 0;
        let mut end_x = src.width as i32;

        if dy < 0 {
            start_y = -dy;
        }
        if dy + end_y > dst_height {
            end_y = dst_height - dy;
        }
        if dx < 0 {
            start_x = -dx;
        }
        if dx + end_x > dst_width {
            end_x = dst_width - dx;
        }

        if start_x >= end_x || start_y >= end_y {
            return;
        }

        let src_stride = (src.width * 4) as usize;
        let dst_stride = (self.width * 4) as usize;

        for sy in start_y..end_y {
            let dst_y = dy + sy;
            let src_row_start = (sy as usize * src_stride) + (start_x as usize * 4);
            let dst_row_start = (dst_y as usize * dst_stride) + ((dx + start_x) as usize * 4);
            let len = (end_x - start_x) as usize * 4;

            let src_slice = &src.data[src_row_start..src_row_start + len];
            let dst_slice = &mut self.data[dst_row_start..dst_row_start + len];

            for (s, d) in src_slice.chunks_exact(4).zip(dst_slice.chunks_exact_mut(4)) {
                let sa = s[3] as u32;
                if sa == 0 {
                    continue;
                }
                if sa == 255 {
                    d.copy_from_slice(s);
                    continue;
                }

                let da = d[3] as u32;
                let inv_sa = 255 - sa;
                let out_a = sa + ((da * inv_sa) / 255);

                if out_a == 0 {
                    continue;
                }

                for c in 0..3 {
                    let blended =
                        (s[c] as u32 * sa * 255 + d[c] as u32 * da * inv_sa) / (out_a * 255);
                    d[c] = blended.min(255) as u8;
                }
                d[3] = out_a as u8;
            }
        }
    }

    /// Rotate the whole canvas counter-clockwise by `degrees` about its center.
    ///
    /// The result keeps the original dimensions; corners that rotate out of
    /// frame are clipped and uncovered areas become transparent. Sampling is
    /// nearest-neighbour.
    pub fn rotated(&self, degrees: f32) -> FrameBuffer {
        let normalized = (degrees as f64).rem_euclid(360.0);
        if normalized == 0.0 {
            return self.clone();
        }

        let mut out = FrameBuffer::new(self.width, self.height, self.format);
        let (sin, cos) = (-normalized.to_radians()).sin_cos();
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;

        for y in 0..self.height {
            let oy = y as f64 + 0.5 - cy;
            for x in 0..self.width {
                let ox = x as f64 + 0.5 - cx;
                let sx = cos * ox + sin * oy + cx;
                let sy = -sin * ox + cos * oy + cy;
                if sx < 0.0 || sy < 0.0 {
                    continue;
                }
                if let Some(pixel) = self.get_pixel(sx.floor() as u32, sy.floor() as u32) {
                    out.set_pixel(x, y, pixel);
                }
            }
        }

        out
    }

    /// Drop the alpha channel, producing an opaque RGB buffer.
    ///
    /// Color channels are kept as-is; nothing is blended against a background.
    pub fn flatten(&self) -> FrameBuffer {
        match self.format {
            PixelFormat::Rgb8 => self.clone(),
            PixelFormat::Rgba8 => {
                let mut data = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.data.chunks_exact(4) {
                    data.extend_from_slice(&px[..3]);
                }
                FrameBuffer {
                    data,
                    width: self.width,
                    height: self.height,
                    format: PixelFormat::Rgb8,
                }
            }
        }
    }
}

/// One frame of an animated template, with its display delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    pub buffer: FrameBuffer,
    /// Display time of this frame in milliseconds.
    pub delay_ms: u32,
}

impl AnimationFrame {
    pub fn new(buffer: FrameBuffer, delay_ms: u32) -> Self {
        Self { buffer, delay_ms }
    }
}
