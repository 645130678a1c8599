use std::io::Write;
use std::path::{Path, PathBuf};

use memedo_core::hash::hash_bytes;
use memedo_core::{ContentHash, MemedoResult};

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// `<sha256 hex>.<extension>`
    pub file_name: String,
    pub path: PathBuf,
    pub hash: ContentHash,
}

/// Writes encoded artifacts into a directory under content-addressed names.
///
/// Identical bytes always land on the same file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Store `bytes` as `<hash>.<extension>`; an existing file is left untouched.
    pub fn write(&self, bytes: &[u8], extension: &str) -> MemedoResult<StoredArtifact> {
        let hash = hash_bytes(bytes);
        let file_name = format!("{}.{}", hash.to_hex(), extension);
        let path = self.output_dir.join(&file_name);

        if path.is_file() {
            tracing::debug!("artifact {} already stored", file_name);
        } else {
            std::fs::create_dir_all(&self.output_dir)?;
            // Each writer gets its own temp file; it is removed on drop if never persisted.
            let mut tmp = tempfile::Builder::new()
                .prefix(&format!(".{}.", file_name))
                .suffix(".tmp")
                .tempfile_in(&self.output_dir)?;
            tmp.write_all(bytes)?;
            match tmp.persist(&path) {
                Ok(_) => tracing::info!("wrote {} ({} bytes)", path.display(), bytes.len()),
                // Identical bytes stored by another writer in the meantime.
                Err(_) if path.is_file() => {
                    tracing::debug!("artifact {} stored concurrently", file_name)
                }
                Err(e) => return Err(e.error.into()),
            }
        }

        Ok(StoredArtifact {
            file_name,
            path,
            hash,
        })
    }
}
