//! # memedo-render
//!
//! The Memedo rendering engine: lays out caption text, loads template assets
//! and composites caption overlays onto still images and GIF frames.

pub mod asset;
pub mod pipeline;
pub mod text;

pub use asset::TemplateAssets;
pub use pipeline::{CompositionPipeline, RenderedArtifact, TemplateRenderer};
pub use text::{fit_lines, wrap_text, TextRenderer, Typeface};
