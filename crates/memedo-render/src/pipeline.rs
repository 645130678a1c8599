//! The composition pipeline.
//!
//! Two shared algorithms drive every template:
//! - **Still**: load the base image once, paint each caption slot's overlay
//!   in declaration order, drop alpha and encode as JPEG.
//! - **Animated**: load every GIF frame, paint the captions onto each frame
//!   independently and re-encode a looping GIF with the source delays.
//!
//! Artifacts are written under the SHA-256 of their encoded bytes, so the same
//! request always yields the same file.

use std::path::PathBuf;

use memedo_catalog::{AssetKind, CaptionFields, CaptionSlot, MemeTemplate, RenderRequest, TemplateRegistry};
use memedo_core::{ContentHash, FrameBuffer, MemedoConfig, MemedoResult};
use memedo_encode::{ArtifactStore, GifEncoder, JpegEncoder};

use crate::asset::TemplateAssets;
use crate::text::{TextRenderer, Typeface};

/// A rendered meme, persisted once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// `<sha256 hex>.<jpg|gif>`
    pub file_name: String,
    pub path: PathBuf,
    pub asset_kind: AssetKind,
    pub content_hash: ContentHash,
    /// 1 for stills.
    pub frame_count: usize,
}

/// Renders a resolved template with caller-supplied captions.
///
/// Holds no per-request state and is shared freely across threads.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    text: TextRenderer,
    assets: TemplateAssets,
    jpeg: JpegEncoder,
    gif: GifEncoder,
    store: ArtifactStore,
}

impl TemplateRenderer {
    pub fn new(
        text: TextRenderer,
        assets: TemplateAssets,
        jpeg: JpegEncoder,
        gif: GifEncoder,
        store: ArtifactStore,
    ) -> Self {
        Self {
            text,
            assets,
            jpeg,
            gif,
            store,
        }
    }

    /// Build a renderer from configuration, loading the configured typeface.
    pub fn from_config(config: &MemedoConfig) -> MemedoResult<Self> {
        let typeface = Typeface::from_optional_path(config.paths.font_path.as_deref())?;
        Ok(Self::new(
            TextRenderer::new(typeface, config.render.line_spacing),
            TemplateAssets::new(&config.paths.template_dir),
            JpegEncoder::new(config.render.jpeg_quality),
            GifEncoder::new(config.render.gif_speed),
            ArtifactStore::new(&config.paths.output_dir),
        ))
    }

    pub fn text(&self) -> &TextRenderer {
        &self.text
    }

    pub fn assets(&self) -> &TemplateAssets {
        &self.assets
    }

    /// Render `template` with `fields` and persist the artifact.
    ///
    /// Every declared field must be present; extra keys are ignored. Nothing is
    /// written unless every step succeeds.
    pub fn render(&self, template: &MemeTemplate, fields: &CaptionFields) -> MemedoResult<RenderedArtifact> {
        let captions = template.bind_captions(fields)?;

        let (bytes, frame_count) = match template.asset_kind {
            AssetKind::StaticImage => (self.render_still(template, &captions)?, 1),
            AssetKind::AnimatedGif => self.render_animated(template, &captions)?,
        };

        let stored = self
            .store
            .write(&bytes, template.asset_kind.output_extension())?;

        tracing::info!(
            template_id = template.id,
            "rendered {} ({}, {} frame{})",
            stored.file_name,
            template.name,
            frame_count,
            if frame_count == 1 { "" } else { "s" }
        );

        Ok(RenderedArtifact {
            file_name: stored.file_name,
            path: stored.path,
            asset_kind: template.asset_kind,
            content_hash: stored.hash,
            frame_count,
        })
    }

    fn render_still(&self, template: &MemeTemplate, captions: &[(&CaptionSlot, &str)]) -> MemedoResult<Vec<u8>> {
        let mut base = self.assets.load_image(template)?;
        for (slot, text) in captions {
            let overlay = self.text.render_overlay(base.width, base.height, slot, text)?;
            base.composite_over(&overlay, 0, 0);
        }
        self.jpeg.encode(&base.flatten())
    }

    fn render_animated(
        &self,
        template: &MemeTemplate,
        captions: &[(&CaptionSlot, &str)],
    ) -> MemedoResult<(Vec<u8>, usize)> {
        let mut frames = self.assets.load_frames(template)?;

        // Decoded GIF frames all share the logical screen size.
        let (width, height) = (frames[0].buffer.width, frames[0].buffer.height);
        let overlays = captions
            .iter()
            .map(|(slot, text)| self.text.render_overlay(width, height, slot, text))
            .collect::<MemedoResult<Vec<FrameBuffer>>>()?;

        for frame in &mut frames {
            for overlay in &overlays {
                frame.buffer.composite_over(overlay, 0, 0);
            }
        }

        let bytes = self.gif.encode(&frames)?;
        Ok((bytes, frames.len()))
    }
}

/// Resolves requests against the registry and renders them.
#[derive(Debug, Clone)]
pub struct CompositionPipeline {
    registry: TemplateRegistry,
    renderer: TemplateRenderer,
}

impl CompositionPipeline {
    pub fn new(registry: TemplateRegistry, renderer: TemplateRenderer) -> Self {
        Self { registry, renderer }
    }

    /// The built-in catalog rendered with `config`.
    pub fn from_config(config: &MemedoConfig) -> MemedoResult<Self> {
        Ok(Self::new(
            TemplateRegistry::builtin()?,
            TemplateRenderer::from_config(config)?,
        ))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Resolve the request's template and render it.
    ///
    /// `TemplateNotFound`, missing captions, asset and render failures all
    /// abort this request only. Nothing is retried.
    pub fn generate(&self, request: &RenderRequest) -> MemedoResult<RenderedArtifact> {
        let template = self.registry.resolve(request.template_id)?;
        self.renderer.render(template, &request.caption_fields)
    }
}
