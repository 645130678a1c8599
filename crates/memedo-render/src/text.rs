//! Caption layout and text rasterization.
//! Uses fontdue for CPU-based glyph rasterization with a single typeface.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use fontdue::{Font, FontSettings};
use memedo_catalog::CaptionSlot;
use memedo_core::{FrameBuffer, MemedoError, MemedoResult, PixelFormat};

/// Default embedded typeface (DejaVu Sans), used when no font path is configured.
static DEFAULT_FONT: OnceLock<Arc<Font>> = OnceLock::new();

fn default_font() -> Arc<Font> {
    DEFAULT_FONT
        .get_or_init(|| {
            Arc::new(
                Font::from_bytes(
                    include_bytes!("../assets/DejaVuSans.ttf") as &[u8],
                    FontSettings::default(),
                )
                .expect("embedded DejaVuSans.ttf font must be valid"),
            )
        })
        .clone()
}

/// The single typeface every caption is drawn with.
#[derive(Clone)]
pub struct Typeface {
    font: Arc<Font>,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("name", &self.font.name())
            .finish()
    }
}

impl Typeface {
    pub fn embedded() -> Self {
        Self {
            font: default_font(),
        }
    }

    /// Load a TrueType/OpenType font file.
    ///
    /// An unreadable or unparsable file is a configuration error.
    pub fn load(path: &Path) -> MemedoResult<Self> {
        let data = std::fs::read(path).map_err(|e| {
            MemedoError::Config(format!("failed to read font file {}: {}", path.display(), e))
        })?;
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| {
            MemedoError::Config(format!("failed to parse font {}: {}", path.display(), e))
        })?;
        tracing::debug!("loaded typeface from {}", path.display());
        Ok(Self {
            font: Arc::new(font),
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> MemedoResult<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| MemedoError::Config(format!("failed to parse font: {}", e)))?;
        Ok(Self {
            font: Arc::new(font),
        })
    }

    /// Load `path` when given, otherwise the embedded typeface.
    pub fn from_optional_path(path: Option<&Path>) -> MemedoResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::embedded()),
        }
    }

    fn font(&self) -> &Font {
        &self.font
    }
}

/// Break `text` into lines of at most `width` character columns.
///
/// Existing newlines are honoured first; a paragraph that already fits is
/// returned unchanged. Longer paragraphs are wrapped greedily on whitespace.
/// A word longer than `width` is never split and sits on its own line.
/// Without a width the text is a single line.
pub fn wrap_text(text: &str, width: Option<usize>) -> Vec<String> {
    let Some(width) = width else {
        return vec![text.to_string()];
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.chars().count() <= width {
            lines.push(paragraph.to_string());
            continue;
        }
        let before = lines.len();
        greedy_break(paragraph, |candidate| candidate.chars().count() <= width, &mut lines);
        if lines.len() == before {
            lines.push(String::new());
        }
    }
    lines
}

/// Re-break already wrapped lines so each fits within `max_width` pixels.
///
/// `measure` returns the rendered width of a string. A single word wider than
/// the limit stays unsplit on its own line.
pub fn fit_lines(lines: &[String], max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut fitted = Vec::with_capacity(lines.len());
    for line in lines {
        if measure(line) <= max_width {
            fitted.push(line.clone());
            continue;
        }
        let before = fitted.len();
        greedy_break(line, |candidate| measure(candidate) <= max_width, &mut fitted);
        if fitted.len() == before {
            fitted.push(String::new());
        }
    }
    fitted
}

fn greedy_break(paragraph: &str, fits: impl Fn(&str) -> bool, out: &mut Vec<String>) {
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if fits(&candidate) {
            current = candidate;
        } else {
            out.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Vertical metrics for one font size.
#[derive(Debug, Clone, Copy)]
struct LineMetrics {
    ascent: f32,
    line_height: f32,
}

/// Rasterizes caption slots onto transparent overlays.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    typeface: Typeface,
    line_spacing: f32,
}

impl TextRenderer {
    pub fn new(typeface: Typeface, line_spacing: f32) -> Self {
        Self {
            typeface,
            line_spacing,
        }
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Rendered advance width of a single line.
    pub fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let font = self.typeface.font();
        text.chars()
            .map(|ch| font.metrics(ch, font_size).advance_width)
            .sum()
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self, font_size: f32) -> f32 {
        self.line_metrics(font_size).line_height
    }

    fn line_metrics(&self, font_size: f32) -> LineMetrics {
        let (ascent, descent) = match self.typeface.font().horizontal_line_metrics(font_size) {
            Some(m) => (m.ascent, m.descent),
            None => (font_size * 0.8, -font_size * 0.2),
        };
        LineMetrics {
            ascent,
            line_height: ascent - descent + self.line_spacing,
        }
    }

    /// The lines a slot's text is drawn as on a canvas `canvas_width` pixels wide.
    pub fn layout(&self, canvas_width: u32, slot: &CaptionSlot, text: &str) -> Vec<String> {
        let lines = wrap_text(text, slot.wrap_width);
        match slot.fit_padding {
            Some(padding) => {
                let max_width = canvas_width as f32 - slot.position.x as f32 - padding as f32;
                fit_lines(&lines, max_width, |line| {
                    self.measure_width(line, slot.font_size)
                })
            }
            None => lines,
        }
    }

    /// Draw a slot's text onto a transparent `width` x `height` overlay.
    ///
    /// Lines start at the slot position and advance downward. When the slot
    /// has a rotation the whole overlay is rotated about its center.
    pub fn render_overlay(
        &self,
        width: u32,
        height: u32,
        slot: &CaptionSlot,
        text: &str,
    ) -> MemedoResult<FrameBuffer> {
        if width == 0 || height == 0 {
            return Err(MemedoError::Render(format!(
                "cannot draw caption '{}' on an empty {}x{} canvas",
                slot.field, width, height
            )));
        }
        if !slot.font_size.is_finite() || slot.font_size <= 0.0 {
            return Err(MemedoError::Render(format!(
                "caption '{}' has invalid font size {}",
                slot.field, slot.font_size
            )));
        }

        let mut overlay = FrameBuffer::new(width, height, PixelFormat::Rgba8);
        let metrics = self.line_metrics(slot.font_size);
        let color = slot.color.to_rgba8();

        for (i, line) in self.layout(width, slot, text).iter().enumerate() {
            let baseline = slot.position.y as f32 + metrics.ascent + i as f32 * metrics.line_height;
            self.draw_line(&mut overlay, line, slot.font_size, color, slot.position.x as f32, baseline);
        }

        Ok(match slot.rotation {
            Some(degrees) => overlay.rotated(degrees),
            None => overlay,
        })
    }

    fn draw_line(
        &self,
        fb: &mut FrameBuffer,
        text: &str,
        font_size: f32,
        color: [u8; 4],
        x: f32,
        baseline: f32,
    ) {
        let font = self.typeface.font();
        let [r, g, b, _] = color;
        let baseline = baseline.round() as i32;
        let mut cursor_x = x;

        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, font_size);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline - (metrics.height as i32 + metrics.ymin);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }

                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if px < 0 || py < 0 {
                        continue;
                    }

                    // Overlapping glyph edges keep the stronger coverage.
                    if let Some([_, _, _, existing]) = fb.get_pixel(px as u32, py as u32) {
                        fb.set_pixel(px as u32, py as u32, [r, g, b, existing.max(coverage)]);
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(Typeface::embedded(), 4.0)
    }
}
