//! Template asset loading.
//! Decodes a template's still image or GIF frame sequence into RGBA canvases.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::AnimationDecoder;
use memedo_catalog::MemeTemplate;
use memedo_core::{AnimationFrame, FrameBuffer, MemedoError, MemedoResult};

/// Fallback delay for GIF frames that declare none.
const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Resolves and decodes template assets from a directory.
#[derive(Debug, Clone)]
pub struct TemplateAssets {
    template_dir: PathBuf,
}

impl TemplateAssets {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Full path of a template's backing asset.
    pub fn path_for(&self, template: &MemeTemplate) -> PathBuf {
        self.template_dir.join(template.asset_file_name())
    }

    /// Load a still template as a single RGBA canvas.
    pub fn load_image(&self, template: &MemeTemplate) -> MemedoResult<FrameBuffer> {
        let path = self.path_for(template);
        let img = image::open(&path).map_err(|e| {
            asset_error(template, format!("failed to load image: {}", e), &path)
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        FrameBuffer::from_rgba8(width, height, rgba.into_raw())
            .ok_or_else(|| asset_error(template, "decoded image has inconsistent size", &path))
    }

    /// Load an animated template as its full frame sequence, in source order.
    ///
    /// Every frame is a full-canvas RGBA image with its own delay.
    pub fn load_frames(&self, template: &MemeTemplate) -> MemedoResult<Vec<AnimationFrame>> {
        let path = self.path_for(template);
        let file = File::open(&path)
            .map_err(|e| asset_error(template, format!("failed to open GIF: {}", e), &path))?;

        let decoder = image::codecs::gif::GifDecoder::new(BufReader::new(file))
            .map_err(|e| asset_error(template, format!("failed to decode GIF: {}", e), &path))?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| asset_error(template, format!("failed to decode GIF frames: {}", e), &path))?;

        if frames.is_empty() {
            return Err(asset_error(template, "GIF has no frames", &path));
        }

        let mut out = Vec::with_capacity(frames.len());
        for frame in frames {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay_ms = match numer.checked_div(denom) {
                Some(0) | None => DEFAULT_FRAME_DELAY_MS,
                Some(ms) => ms,
            };

            let rgba = frame.into_buffer();
            let (width, height) = rgba.dimensions();
            let buffer = FrameBuffer::from_rgba8(width, height, rgba.into_raw())
                .ok_or_else(|| asset_error(template, "decoded frame has inconsistent size", &path))?;
            out.push(AnimationFrame::new(buffer, delay_ms));
        }

        tracing::debug!(
            "loaded {} frames for template {} from {}",
            out.len(),
            template.id,
            path.display()
        );
        Ok(out)
    }
}

fn asset_error(template: &MemeTemplate, message: impl Into<String>, path: &Path) -> MemedoError {
    let message = message.into();
    tracing::error!(
        template_id = template.id,
        "asset load failed for {}: {}",
        path.display(),
        message
    );
    MemedoError::asset(template.id, message, path)
}
