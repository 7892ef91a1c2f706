//! Error types for the DCGAN pipeline

use thiserror::Error;

/// Errors surfaced by dataset handling, model construction and training
#[derive(Error, Debug)]
pub enum GanError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },

    #[error("non-finite {which} loss at epoch {epoch}, batch {batch}")]
    NonFiniteLoss {
        which: &'static str,
        epoch: usize,
        batch: usize,
    },

    #[error("torch error: {0}")]
    Torch(#[from] tch::TchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, GanError>;
