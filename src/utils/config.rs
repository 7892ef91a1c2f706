//! Configuration management
//!
//! Provides a single explicit configuration value object for the whole
//! pipeline; no hyperparameter lives in a global.

use serde::{Deserialize, Serialize};

use crate::error::{GanError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data configuration
    pub data: DataConfig,
    /// Model configuration
    pub model: ModelConfig,
    /// Training configuration
    pub training: TrainingOptions,
}

/// Data-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the MNIST ubyte files
    pub data_dir: String,
    /// Batch size
    pub batch_size: usize,
    /// Shuffle buffer size; at or above the dataset size this is a full
    /// per-epoch permutation
    pub shuffle_buffer: usize,
    /// Whether to drop the last incomplete batch
    pub drop_last: bool,
}

/// Model-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Latent dimension size
    pub latent_dim: i64,
    /// Base filters for the generator
    pub gen_base_filters: i64,
    /// Base filters for the discriminator
    pub disc_base_filters: i64,
    /// Dropout rate for the discriminator
    pub dropout: f64,
}

/// Training-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingOptions {
    /// Number of epochs
    pub epochs: usize,
    /// Generator learning rate
    pub gen_lr: f64,
    /// Discriminator learning rate
    pub disc_lr: f64,
    /// Random seed applied to the torch RNG and the shuffle RNG
    pub seed: u64,
    /// Render a sample grid every N epochs
    pub sample_every: usize,
    /// Side length of the sample grid
    pub sample_grid_side: u32,
    /// Directory for samples, loss curve and the saved generator
    pub artifact_dir: String,
    /// Device: "cpu" or "cuda"
    pub device: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                data_dir: "data/mnist".to_string(),
                batch_size: 128,
                shuffle_buffer: 60000,
                drop_last: true,
            },
            model: ModelConfig {
                latent_dim: 100,
                gen_base_filters: 128,
                disc_base_filters: 64,
                dropout: 0.3,
            },
            training: TrainingOptions {
                epochs: 1000,
                gen_lr: 1e-4,
                disc_lr: 1e-4,
                seed: 42,
                sample_every: 1,
                sample_grid_side: 4,
                artifact_dir: "artifacts".to_string(),
                device: "cpu".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_toml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_toml(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn save_json(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get device from configuration
    pub fn get_device(&self) -> tch::Device {
        match self.training.device.to_lowercase().as_str() {
            "cuda" | "gpu" => {
                if tch::Cuda::is_available() {
                    tch::Device::Cuda(0)
                } else {
                    tracing::warn!("CUDA requested but not available, falling back to CPU");
                    tch::Device::Cpu
                }
            }
            _ => tch::Device::Cpu,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.data.batch_size == 0 {
            return Err(GanError::Config("batch size must be > 0".to_string()));
        }
        if self.model.latent_dim <= 0 {
            return Err(GanError::Config("latent dimension must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.model.dropout) {
            return Err(GanError::Config("dropout must be in [0, 1)".to_string()));
        }
        if self.training.epochs == 0 {
            return Err(GanError::Config("epoch count must be > 0".to_string()));
        }
        if self.training.gen_lr <= 0.0 || self.training.disc_lr <= 0.0 {
            return Err(GanError::Config("learning rates must be > 0".to_string()));
        }
        if self.training.sample_every == 0 {
            return Err(GanError::Config("sample interval must be > 0".to_string()));
        }
        if self.training.sample_grid_side == 0 {
            return Err(GanError::Config("sample grid side must be > 0".to_string()));
        }
        Ok(())
    }
}
