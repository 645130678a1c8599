use serde::{Deserialize, Serialize};

use memedo_core::{MemedoError, MemedoResult, Point, TextColor};

use crate::request::CaptionFields;

/// How a template's backing asset is stored and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// A single still image; output is an opaque JPEG.
    StaticImage,
    /// A GIF whose every frame receives the captions; output is a looping GIF.
    AnimatedGif,
}

impl AssetKind {
    /// File extension of rendered artifacts of this kind.
    pub fn output_extension(self) -> &'static str {
        match self {
            AssetKind::StaticImage => "jpg",
            AssetKind::AnimatedGif => "gif",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::StaticImage => write!(f, "image"),
            AssetKind::AnimatedGif => write!(f, "gif"),
        }
    }
}

/// A single positioned, styled text region within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSlot {
    /// Key the selection model must populate.
    pub field: String,
    /// Top-left corner of the first line.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f32,
    pub color: TextColor,
    /// Greedy wrap width in character columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_width: Option<usize>,
    /// Counter-clockwise rotation of the whole overlay, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// When set, lines are re-broken to fit between `position.x` and the
    /// canvas' right edge minus this padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_padding: Option<u32>,
}

impl CaptionSlot {
    pub fn new(field: impl Into<String>, x: i32, y: i32, font_size: f32) -> Self {
        Self {
            field: field.into(),
            position: Point::new(x, y),
            font_size,
            color: TextColor::Black,
            wrap_width: None,
            rotation: None,
            fit_padding: None,
        }
    }

    pub fn white(mut self) -> Self {
        self.color = TextColor::White;
        self
    }

    pub fn wrap(mut self, columns: usize) -> Self {
        self.wrap_width = Some(columns);
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn fit_to_canvas(mut self, padding: u32) -> Self {
        self.fit_padding = Some(padding);
        self
    }
}

/// One catalog entry: a meme "joke shape".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeTemplate {
    pub id: u32,
    /// Resolves the asset file name (lower-cased).
    pub name: String,
    /// Human-readable, only used to prompt the selection model.
    pub description: String,
    pub asset_kind: AssetKind,
    /// Suffix of the backing asset file.
    pub asset_extension: String,
    /// Painted in this order; later slots cover earlier ones.
    pub caption_slots: Vec<CaptionSlot>,
    /// Few-shot examples mapping a scenario to the expected caption JSON.
    /// Free text for the selection model; never parsed here.
    pub prompt_examples: String,
}

impl MemeTemplate {
    /// A template backed by a still image.
    pub fn still(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            asset_kind: AssetKind::StaticImage,
            asset_extension: extension.into(),
            caption_slots: Vec::new(),
            prompt_examples: String::new(),
        }
    }

    /// A template backed by an animated GIF.
    pub fn animated(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            asset_kind: AssetKind::AnimatedGif,
            ..Self::still(id, name, description, "gif")
        }
    }

    pub fn slot(mut self, slot: CaptionSlot) -> Self {
        self.caption_slots.push(slot);
        self
    }

    pub fn examples(mut self, text: impl Into<String>) -> Self {
        self.prompt_examples = text.into();
        self
    }

    /// File name of the backing asset inside the template directory.
    pub fn asset_file_name(&self) -> String {
        format!("{}.{}", self.name.to_lowercase(), self.asset_extension)
    }

    /// Declared caption field names, in paint order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.caption_slots.iter().map(|s| s.field.as_str())
    }

    /// Prompt examples with surrounding whitespace trimmed.
    pub fn instruction(&self) -> &str {
        self.prompt_examples.trim()
    }

    /// Pair every declared slot with its caller-supplied text, in declaration order.
    ///
    /// Extra keys in `fields` are ignored; a missing one is an error.
    pub fn bind_captions<'a>(
        &'a self,
        fields: &'a CaptionFields,
    ) -> MemedoResult<Vec<(&'a CaptionSlot, &'a str)>> {
        self.caption_slots
            .iter()
            .map(|slot| {
                fields
                    .get(&slot.field)
                    .map(|text| (slot, text.as_str()))
                    .ok_or_else(|| MemedoError::missing_field(&self.name, &slot.field))
            })
            .collect()
    }
}
