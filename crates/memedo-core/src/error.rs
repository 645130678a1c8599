/// Core error types for the Memedo engine.
use std::path::PathBuf;

/// A specialized Result type for Memedo operations.
pub type MemedoResult<T> = Result<T, MemedoError>;

/// Top-level error type encompassing all Memedo subsystems.
///
/// Every variant is fatal to the single render request that produced it;
/// nothing in the engine retries.
#[derive(Debug, thiserror::Error)]
pub enum MemedoError {
    #[error("template not found: {0}")]
    TemplateNotFound(u32),

    #[error("caption field '{field}' missing for template '{template}'")]
    CaptionFieldMissing { template: String, field: String },

    #[error("asset error for template {template_id}: {message} ({path:?})")]
    AssetLoad {
        template_id: u32,
        message: String,
        path: PathBuf,
    },

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MemedoError {
    /// Create an asset load error.
    pub fn asset(template_id: u32, message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        MemedoError::AssetLoad {
            template_id,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a missing caption field error.
    pub fn missing_field(template: impl Into<String>, field: impl Into<String>) -> Self {
        MemedoError::CaptionFieldMissing {
            template: template.into(),
            field: field.into(),
        }
    }
}
