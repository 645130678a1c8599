use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MemedoError, MemedoResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the template assets, named `<lowercase name>.<ext>`.
    pub template_dir: PathBuf,
    /// Directory rendered artifacts are written to.
    pub output_dir: PathBuf,
    /// TrueType font used for every caption. The embedded default is used when unset.
    pub font_path: Option<PathBuf>,
    /// Directory holding generation records.
    pub store_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("assets/templates"),
            output_dir: PathBuf::from("out/creations"),
            font_path: None,
            store_dir: PathBuf::from("data/gens"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub jpeg_quality: u8,
    /// NeuQuant speed for GIF palette quantization (1 = best, 30 = fastest).
    pub gif_speed: i32,
    /// Extra pixels between caption lines, on top of ascent + descent.
    pub line_spacing: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            gif_speed: 10,
            line_spacing: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.perplexity.ai".to_string(),
            model: "llama-3.1-sonar-large-128k-online".to_string(),
            api_key_env: "PERPLEXITY_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 10000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub max_memes: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-2024-08-06".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_memes: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AiConfig {
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MemedoConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl MemedoConfig {
    pub fn load_from_file(path: &Path) -> MemedoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: MemedoConfig = toml::from_str(&contents)
            .map_err(|e| MemedoError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> MemedoResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| MemedoError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the renderer or encoders cannot work with.
    pub fn validate(&self) -> MemedoResult<()> {
        if !(1..=100).contains(&self.render.jpeg_quality) {
            return Err(MemedoError::Config(format!(
                "render.jpeg_quality must be in 1..=100, got {}",
                self.render.jpeg_quality
            )));
        }
        if !(1..=30).contains(&self.render.gif_speed) {
            return Err(MemedoError::Config(format!(
                "render.gif_speed must be in 1..=30, got {}",
                self.render.gif_speed
            )));
        }
        if !self.render.line_spacing.is_finite() || self.render.line_spacing < 0.0 {
            return Err(MemedoError::Config(
                "render.line_spacing must be a non-negative number".into(),
            ));
        }
        if self.ai.selection.max_memes == 0 {
            return Err(MemedoError::Config(
                "ai.selection.max_memes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
