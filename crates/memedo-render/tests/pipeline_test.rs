//! End-to-end pipeline tests against generated fixture assets.

use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, Frame, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use memedo_catalog::{AssetKind, CaptionFields, RenderRequest, TemplateRegistry};
use memedo_core::{MemedoConfig, MemedoError};
use memedo_render::CompositionPipeline;
use tempfile::TempDir;

const GIF_FRAME_DELAYS_MS: [u32; 3] = [50, 80, 120];

struct Fixture {
    _dir: TempDir,
    pipeline: CompositionPipeline,
    output_dir: std::path::PathBuf,
}

fn write_still(path: &Path) {
    let img = RgbImage::from_fn(320, 240, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    img.save(path).unwrap();
}

fn write_gif(path: &Path) {
    let file = File::create(path).unwrap();
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).unwrap();
    for (i, delay) in GIF_FRAME_DELAYS_MS.iter().enumerate() {
        let shade = 60 * i as u8;
        let img = RgbaImage::from_pixel(400, 380, Rgba([shade, 40, 200 - shade, 255]));
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(*delay, 1)))
            .unwrap();
    }
}

/// A pipeline over the built-in catalog with a generated asset for every template.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let template_dir = dir.path().join("templates");
    let output_dir = dir.path().join("creations");
    std::fs::create_dir_all(&template_dir).unwrap();

    let registry = TemplateRegistry::builtin().unwrap();
    for template in registry.templates() {
        let path = template_dir.join(template.asset_file_name());
        match template.asset_kind {
            AssetKind::StaticImage => write_still(&path),
            AssetKind::AnimatedGif => write_gif(&path),
        }
    }

    let mut config = MemedoConfig::default();
    config.paths.template_dir = template_dir;
    config.paths.output_dir = output_dir.clone();

    Fixture {
        _dir: dir,
        pipeline: CompositionPipeline::from_config(&config).unwrap(),
        output_dir,
    }
}

fn request_with_all_fields(pipeline: &CompositionPipeline, id: u32, text: &str) -> RenderRequest {
    let template = pipeline.registry().resolve(id).unwrap();
    template
        .field_names()
        .fold(RenderRequest::new(id), |req, field| req.with_field(field, text))
}

fn decode_gif(bytes: Vec<u8>) -> Vec<Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn test_every_builtin_template_renders() {
    let fx = fixture();
    let ids: Vec<u32> = fx.pipeline.registry().all().iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 18);

    for id in ids {
        let request = request_with_all_fields(&fx.pipeline, id, "wearing sunscreen");
        let artifact = fx
            .pipeline
            .generate(&request)
            .unwrap_or_else(|e| panic!("template {} failed: {}", id, e));

        assert!(!artifact.file_name.is_empty());
        assert!(artifact.path.exists());
        assert!(std::fs::metadata(&artifact.path).unwrap().len() > 0);
        let expected_ext = artifact.asset_kind.output_extension();
        assert!(artifact.file_name.ends_with(expected_ext), "{}", artifact.file_name);
    }
}

#[test]
fn test_unknown_template_is_not_found() {
    let fx = fixture();
    let request = RenderRequest::new(999999).with_field("action", "anything");
    assert!(matches!(
        fx.pipeline.generate(&request),
        Err(MemedoError::TemplateNotFound(999999))
    ));
}

#[test]
fn test_indifferent_renders_still_jpeg() {
    let fx = fixture();
    let request = RenderRequest::new(2).with_field("action", "wearing sunscreen");
    let artifact = fx.pipeline.generate(&request).unwrap();

    assert_eq!(artifact.asset_kind, AssetKind::StaticImage);
    assert_eq!(artifact.frame_count, 1);

    let bytes = std::fs::read(&artifact.path).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 240));
    assert!(!decoded.color().has_alpha());
}

#[test]
fn test_empty_caption_still_renders() {
    let fx = fixture();
    let request = RenderRequest::new(2).with_field("action", "");
    let artifact = fx.pipeline.generate(&request).unwrap();
    assert!(artifact.path.exists());
}

#[test]
fn test_caption_changes_output() {
    let fx = fixture();
    let blank = fx
        .pipeline
        .generate(&RenderRequest::new(2).with_field("action", ""))
        .unwrap();
    let captioned = fx
        .pipeline
        .generate(&RenderRequest::new(2).with_field("action", "wearing sunscreen"))
        .unwrap();
    assert_ne!(blank.content_hash, captioned.content_hash);
}

#[test]
fn test_same_request_is_byte_identical_regardless_of_key_order() {
    let fx = fixture();

    let mut forward = CaptionFields::new();
    forward.insert("first".to_string(), "Dr. Dre".to_string());
    forward.insert("second".to_string(), "Kanye".to_string());

    let mut reverse: HashMap<String, String> = HashMap::with_capacity(16);
    reverse.insert("second".to_string(), "Kanye".to_string());
    reverse.insert("unused".to_string(), "ignored".to_string());
    reverse.insert("first".to_string(), "Dr. Dre".to_string());

    let a = fx
        .pipeline
        .generate(&RenderRequest {
            template_id: 12,
            caption_fields: forward,
        })
        .unwrap();
    let a_bytes = std::fs::read(&a.path).unwrap();

    let b = fx
        .pipeline
        .generate(&RenderRequest {
            template_id: 12,
            caption_fields: reverse,
        })
        .unwrap();
    let b_bytes = std::fs::read(&b.path).unwrap();

    assert_eq!(a.file_name, b.file_name);
    assert_eq!(a_bytes, b_bytes);
}

#[test]
fn test_gif_long_caption_preserves_frames_and_delays() {
    let fx = fixture();
    let caption = "The dugout after hardik starts hitting the ball hard ".repeat(4);
    let caption = caption[..200].to_string();
    assert_eq!(caption.chars().count(), 200);

    let artifact = fx
        .pipeline
        .generate(&RenderRequest::new(42).with_field("who", caption))
        .unwrap();
    assert_eq!(artifact.asset_kind, AssetKind::AnimatedGif);
    assert_eq!(artifact.frame_count, GIF_FRAME_DELAYS_MS.len());
    assert!(artifact.file_name.ends_with(".gif"));

    let frames = decode_gif(std::fs::read(&artifact.path).unwrap());
    assert_eq!(frames.len(), GIF_FRAME_DELAYS_MS.len());
    let delays: Vec<u32> = frames
        .iter()
        .map(|f| {
            let (numer, denom) = f.delay().numer_denom_ms();
            numer / denom
        })
        .collect();
    assert_eq!(delays, GIF_FRAME_DELAYS_MS.to_vec());
}

#[test]
fn test_gif_caption_is_painted_on_every_frame() {
    let fx = fixture();
    let artifact = fx
        .pipeline
        .generate(&RenderRequest::new(31).with_field("depiction", "Hardik Pandya the next day"))
        .unwrap();

    let frames = decode_gif(std::fs::read(&artifact.path).unwrap());
    for (i, frame) in frames.iter().enumerate() {
        let shade = 60 * i as u8;
        let background = [shade, 40, 200 - shade];
        let has_text = frame.buffer().pixels().any(|p| {
            p.0[..3]
                .iter()
                .zip(background.iter())
                .any(|(a, b)| a.abs_diff(*b) > 40)
        });
        assert!(has_text, "frame {} has no caption pixels", i);
    }
}

#[test]
fn test_missing_caption_field_writes_nothing() {
    let fx = fixture();
    let request = RenderRequest::new(12).with_field("first", "Tea");
    match fx.pipeline.generate(&request) {
        Err(MemedoError::CaptionFieldMissing { field, .. }) => assert_eq!(field, "second"),
        other => panic!("expected CaptionFieldMissing, got {:?}", other),
    }
    assert!(!fx.output_dir.exists() || std::fs::read_dir(&fx.output_dir).unwrap().count() == 0);
}

#[test]
fn test_missing_asset_is_asset_error() {
    let fx = fixture();
    let registry = fx.pipeline.registry();
    let template = registry.resolve(18).unwrap();
    std::fs::remove_file(fx.pipeline.renderer().assets().path_for(template)).unwrap();

    let request = request_with_all_fields(&fx.pipeline, 18, "waiting");
    assert!(matches!(
        fx.pipeline.generate(&request),
        Err(MemedoError::AssetLoad { template_id: 18, .. })
    ));
}
