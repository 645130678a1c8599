//! # memedo-encode
//!
//! Encoding module: converts composited FrameBuffers to encoded bytes and
//! persists them under content-addressed names.
//! Still images become opaque JPEGs; animated templates become looping GIFs.

pub mod gif;
pub mod jpeg;
pub mod store;

pub use gif::GifEncoder;
pub use jpeg::JpegEncoder;
pub use store::{ArtifactStore, StoredArtifact};
