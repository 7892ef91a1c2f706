//! Training loop implementation for the DCGAN
//!
//! Provides the adversarial training step and the epoch loop driving it,
//! with per-epoch loss averaging and fixed-noise sampling.

use indicatif::{ProgressBar, ProgressStyle};
use tch::{nn, Kind, Tensor};
use tracing::info;

use crate::data::DataLoader;
use crate::error::{GanError, Result};
use crate::model::Gan;
use crate::report::{LossCurve, SampleGrid};
use crate::utils::save_generator;

use super::history::LossHistory;
use super::losses::{discriminator_loss, generator_loss};

/// Training configuration
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of training epochs
    pub epochs: usize,
    /// Learning rate for generator
    pub gen_lr: f64,
    /// Learning rate for discriminator
    pub disc_lr: f64,
    /// Render a sample grid every N epochs
    pub sample_every: usize,
    /// Side length of the sample grid (grid holds side^2 thumbnails)
    pub sample_grid_side: u32,
    /// Directory for samples, the loss curve and the saved generator
    pub artifact_dir: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            gen_lr: 1e-4,
            disc_lr: 1e-4,
            sample_every: 1,
            sample_grid_side: 4,
            artifact_dir: "artifacts".to_string(),
        }
    }
}

/// DCGAN Trainer
pub struct Trainer {
    config: TrainingConfig,
    history: LossHistory,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            history: LossHistory::new(),
        }
    }

    /// Train the GAN
    ///
    /// Runs the configured number of epochs, one full pass over the data
    /// source each. After every `sample_every` epochs a grid of images is
    /// rendered from a fixed noise batch so progress is comparable
    /// epoch-over-epoch. At the end the generator weights, the loss CSV
    /// and the loss-curve chart are written to the artifact directory.
    ///
    /// Any error during a batch aborts the run; history entries for
    /// already-completed epochs remain valid.
    pub fn train(&mut self, gan: &mut Gan, data_loader: &mut DataLoader) -> Result<&LossHistory> {
        if self.config.epochs == 0 {
            return Err(GanError::Config("epoch count must be > 0".to_string()));
        }
        let num_batches = data_loader.num_batches();
        if num_batches == 0 {
            return Err(GanError::Config(
                "data source yields no batches; dataset smaller than one batch".to_string(),
            ));
        }

        let mut gen_opt = gan.gen_optimizer(self.config.gen_lr)?;
        let mut disc_opt = gan.disc_optimizer(self.config.disc_lr)?;

        std::fs::create_dir_all(&self.config.artifact_dir)?;
        let sampler = SampleGrid::new(&self.config.artifact_dir, self.config.sample_grid_side);

        // One fixed latent batch reused for every epoch's sample grid
        let num_samples = i64::from(self.config.sample_grid_side).pow(2);
        let fixed_noise = Tensor::randn(
            [num_samples, gan.latent_dim()],
            (Kind::Float, gan.device),
        );

        info!(
            "Starting training for {} epochs, {} batches per epoch",
            self.config.epochs, num_batches
        );

        for epoch in 0..self.config.epochs {
            let mut gen_loss_sum = 0.0;
            let mut disc_loss_sum = 0.0;
            let mut batch_count = 0usize;

            let pb = ProgressBar::new(num_batches as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("##-"),
            );

            for real_batch in data_loader.iter() {
                let real_images = real_batch.to_device(gan.device);
                let (g_loss, d_loss) = train_step(gan, &real_images, &mut gen_opt, &mut disc_opt);

                if !g_loss.is_finite() {
                    return Err(GanError::NonFiniteLoss {
                        which: "generator",
                        epoch,
                        batch: batch_count,
                    });
                }
                if !d_loss.is_finite() {
                    return Err(GanError::NonFiniteLoss {
                        which: "discriminator",
                        epoch,
                        batch: batch_count,
                    });
                }

                gen_loss_sum += g_loss;
                disc_loss_sum += d_loss;
                batch_count += 1;

                pb.set_message(format!("G: {g_loss:.4}, D: {d_loss:.4}"));
                pb.inc(1);
            }

            pb.finish_and_clear();

            let avg_gen_loss = gen_loss_sum / batch_count as f64;
            let avg_disc_loss = disc_loss_sum / batch_count as f64;
            self.history.record_epoch(avg_gen_loss, avg_disc_loss);

            info!(
                "Epoch {}/{}: G_loss={:.4}, D_loss={:.4}",
                epoch + 1,
                self.config.epochs,
                avg_gen_loss,
                avg_disc_loss
            );

            if (epoch + 1) % self.config.sample_every == 0 || epoch + 1 == self.config.epochs {
                sampler.render(&gan.generator, epoch + 1, &fixed_noise)?;
            }
        }

        save_generator(gan, &self.history, &self.config.artifact_dir)?;

        let csv_path = format!("{}/losses.csv", self.config.artifact_dir);
        self.history.save_csv(&csv_path)?;

        let curve_path = format!("{}/loss_curve.png", self.config.artifact_dir);
        LossCurve::default().render(&self.history, &curve_path)?;

        Ok(&self.history)
    }

    /// Get training history
    pub fn history(&self) -> &LossHistory {
        &self.history
    }

    /// Get configuration
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

/// Single adversarial training step over one batch of real images
///
/// Both forward passes and both losses are evaluated against the same
/// pre-update parameter snapshot: the two gradient sets are captured
/// before either optimizer steps. The discriminator loss sees the fake
/// batch through `detach`, so its gradient never reaches generator
/// parameters; the generator backward's spill into discriminator
/// gradients is discarded by zeroing them before the discriminator
/// backward. Each optimizer only ever updates its own variable store.
///
/// Returns the two scalar losses for caller-side aggregation.
pub fn train_step(
    gan: &Gan,
    real_images: &Tensor,
    gen_opt: &mut nn::Optimizer,
    disc_opt: &mut nn::Optimizer,
) -> (f64, f64) {
    let batch_size = real_images.size()[0];
    let noise = Tensor::randn([batch_size, gan.latent_dim()], (Kind::Float, gan.device));

    let fake_images = gan.generator.forward_t(&noise, true);

    let real_logits = gan.discriminator.forward_t(real_images, true);
    let fake_logits = gan.discriminator.forward_t(&fake_images, true);
    let fake_logits_detached = gan.discriminator.forward_t(&fake_images.detach(), true);

    let g_loss = generator_loss(&fake_logits);
    let d_loss = discriminator_loss(&real_logits, &fake_logits_detached);

    gen_opt.zero_grad();
    g_loss.backward();
    disc_opt.zero_grad();
    d_loss.backward();

    gen_opt.step();
    disc_opt.step();

    (g_loss.double_value(&[]), d_loss.double_value(&[]))
}
