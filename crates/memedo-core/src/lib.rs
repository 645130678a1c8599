//! # memedo-core
//!
//! Core types and primitives for the Memedo meme engine.
//! This crate contains foundational types shared across all Memedo crates:
//! canvases, colors, points, content hashes, configuration and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod math;

pub use config::*;

pub use color::TextColor;
pub use error::{MemedoError, MemedoResult};
pub use frame::{AnimationFrame, FrameBuffer, PixelFormat};
pub use hash::ContentHash;
pub use math::Point;
