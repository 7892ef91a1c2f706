//! Generator artifact save/load
//!
//! At the end of training the generator's weights and a JSON description
//! of its topology are persisted for inference-only consumers. The
//! discriminator is a training-only artifact and is never written.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::{IMAGE_CHANNELS, IMAGE_SIDE};
use crate::error::{GanError, Result};
use crate::model::Gan;
use crate::training::LossHistory;

/// Metadata stored next to the generator weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorMeta {
    /// Number of completed epochs
    pub epochs_trained: usize,
    /// Final mean generator loss
    pub final_gen_loss: f64,
    /// Final mean discriminator loss
    pub final_disc_loss: f64,
    /// Timestamp of the save
    pub timestamp: String,
    /// Latent dimension the generator was built with
    pub latent_dim: i64,
    /// Output image side length
    pub image_side: i64,
    /// Output image channels
    pub image_channels: i64,
    /// Generator base filter count
    pub base_filters: i64,
}

/// Save the generator weights and metadata into `dir`
///
/// Writes `generator.pt` (weights) and `generator.json` (topology/meta).
pub fn save_generator(gan: &Gan, history: &LossHistory, dir: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let weights_path = format!("{dir}/generator.pt");
    gan.save_generator(&weights_path)?;

    let meta = GeneratorMeta {
        epochs_trained: history.num_epochs(),
        final_gen_loss: history.latest_gen_loss().unwrap_or(0.0),
        final_disc_loss: history.latest_disc_loss().unwrap_or(0.0),
        timestamp: chrono::Utc::now().to_rfc3339(),
        latent_dim: gan.latent_dim(),
        image_side: IMAGE_SIDE,
        image_channels: IMAGE_CHANNELS,
        base_filters: gan.generator.config().base_filters,
    };

    let meta_path = format!("{dir}/generator.json");
    let meta_json = serde_json::to_string_pretty(&meta)?;
    std::fs::write(&meta_path, meta_json)?;

    tracing::info!("Saved generator to {dir}");
    Ok(PathBuf::from(dir))
}

/// Load generator metadata from `dir`
pub fn load_generator_meta(dir: &str) -> Result<GeneratorMeta> {
    let meta_path = format!("{dir}/generator.json");
    let content = std::fs::read_to_string(&meta_path)?;
    let meta: GeneratorMeta = serde_json::from_str(&content)?;
    Ok(meta)
}

/// Load generator weights from `dir` into an existing model
///
/// The model's topology must match what the artifact was saved with.
pub fn load_generator(gan: &mut Gan, dir: &str) -> Result<GeneratorMeta> {
    let meta = load_generator_meta(dir)?;

    if meta.latent_dim != gan.latent_dim() {
        return Err(GanError::Config(format!(
            "artifact latent dimension {} does not match model latent dimension {}",
            meta.latent_dim,
            gan.latent_dim()
        )));
    }
    if meta.base_filters != gan.generator.config().base_filters {
        return Err(GanError::Config(format!(
            "artifact base filters {} do not match model base filters {}",
            meta.base_filters,
            gan.generator.config().base_filters
        )));
    }

    let weights_path = format!("{dir}/generator.pt");
    gan.load_generator(&weights_path)?;

    tracing::info!(
        "Loaded generator from {dir} ({} epochs trained)",
        meta.epochs_trained
    );
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::Device;

    #[test]
    fn test_generator_meta_serialization() {
        let meta = GeneratorMeta {
            epochs_trained: 10,
            final_gen_loss: 0.5,
            final_disc_loss: 0.6,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            latent_dim: 100,
            image_side: 28,
            image_channels: 1,
            base_filters: 128,
        };

        let json = serde_json::to_string(&meta).unwrap();
        let loaded: GeneratorMeta = serde_json::from_str(&json).unwrap();

        assert_eq!(meta.epochs_trained, loaded.epochs_trained);
        assert_eq!(meta.latent_dim, loaded.latent_dim);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let gan = Gan::with_defaults(16, Device::Cpu).unwrap();
        let mut history = LossHistory::new();
        history.record_epoch(1.2, 0.9);

        save_generator(&gan, &history, dir_str).unwrap();
        assert!(dir.path().join("generator.pt").exists());
        assert!(dir.path().join("generator.json").exists());

        let mut restored = Gan::with_defaults(16, Device::Cpu).unwrap();
        let meta = load_generator(&mut restored, dir_str).unwrap();
        assert_eq!(meta.epochs_trained, 1);

        // Restored generator reproduces the saved generator's output
        let noise = tch::Tensor::randn([2, 16], (tch::Kind::Float, Device::Cpu));
        let original = gan.generate_from_noise(&noise);
        let reloaded = restored.generate_from_noise(&noise);
        assert!(original.allclose(&reloaded, 1e-6, 1e-6, false));
    }

    #[test]
    fn test_load_rejects_mismatched_latent_dim() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let gan = Gan::with_defaults(16, Device::Cpu).unwrap();
        let history = LossHistory::new();
        save_generator(&gan, &history, dir_str).unwrap();

        let mut other = Gan::with_defaults(32, Device::Cpu).unwrap();
        assert!(load_generator(&mut other, dir_str).is_err());
    }
}
