use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use memedo_catalog::{AssetKind, TemplateRegistry};
use memedo_core::MemedoConfig;
use memedo_render::CompositionPipeline;

use crate::ai::{MemeSelection, MemeSelectionService, SummaryService};
use crate::store::GenerationStore;

pub struct FakeSummary {
    result: std::result::Result<String, String>,
}

impl FakeSummary {
    pub fn ok(summary: &str) -> Self {
        Self {
            result: Ok(summary.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl SummaryService for FakeSummary {
    fn summarize(&self, _prompt: &str) -> Result<String> {
        self.result.clone().map_err(|e| anyhow!(e))
    }
}

/// Arguments the fake selector was last called with.
#[derive(Debug, Clone, Default)]
pub struct SeenSelection {
    pub summary: String,
    pub catalog: String,
    pub max: usize,
}

pub struct FakeSelector {
    selections: Vec<MemeSelection>,
    seen: Mutex<SeenSelection>,
}

impl FakeSelector {
    pub fn new(selections: Vec<MemeSelection>) -> Self {
        Self {
            selections,
            seen: Mutex::new(SeenSelection::default()),
        }
    }

    pub fn seen(&self) -> SeenSelection {
        self.seen.lock().unwrap().clone()
    }
}

impl MemeSelectionService for FakeSelector {
    fn select(&self, summary: &str, catalog: &str, max: usize) -> Result<Vec<MemeSelection>> {
        *self.seen.lock().unwrap() = SeenSelection {
            summary: summary.to_string(),
            catalog: catalog.to_string(),
            max,
        };
        Ok(self.selections.iter().take(max).cloned().collect())
    }
}

pub struct Fixture {
    pub _dir: TempDir,
    pub config: MemedoConfig,
    pub pipeline: CompositionPipeline,
    pub store: GenerationStore,
}

fn write_still(path: &Path) {
    RgbImage::from_pixel(200, 160, Rgb([230, 230, 230]))
        .save(path)
        .unwrap();
}

fn write_gif(path: &Path) {
    let mut encoder = GifEncoder::new(File::create(path).unwrap());
    encoder.set_repeat(Repeat::Infinite).unwrap();
    for shade in [20u8, 120] {
        let frame = RgbaImage::from_pixel(200, 160, Rgba([shade, shade, 90, 255]));
        encoder
            .encode_frame(Frame::from_parts(frame, 0, 0, Delay::from_numer_denom_ms(100, 1)))
            .unwrap();
    }
}

/// The built-in catalog over generated assets, with temp output and store dirs.
pub fn fixture_pipeline() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let mut config = MemedoConfig::default();
    config.paths.template_dir = dir.path().join("templates");
    config.paths.output_dir = dir.path().join("creations");
    config.paths.store_dir = dir.path().join("gens");
    std::fs::create_dir_all(&config.paths.template_dir).unwrap();

    for template in TemplateRegistry::builtin().unwrap().templates() {
        let path = config.paths.template_dir.join(template.asset_file_name());
        match template.asset_kind {
            AssetKind::StaticImage => write_still(&path),
            AssetKind::AnimatedGif => write_gif(&path),
        }
    }

    Fixture {
        pipeline: CompositionPipeline::from_config(&config).unwrap(),
        store: GenerationStore::open(&config.paths.store_dir).unwrap(),
        config,
        _dir: dir,
    }
}
