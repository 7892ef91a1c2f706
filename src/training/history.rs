//! Per-epoch loss history for monitoring GAN progress

use crate::error::Result;

/// Loss history collected during training: one entry per completed epoch
#[derive(Debug, Clone, Default)]
pub struct LossHistory {
    /// Mean generator loss per epoch
    pub gen_losses: Vec<f64>,
    /// Mean discriminator loss per epoch
    pub disc_losses: Vec<f64>,
}

impl LossHistory {
    /// Create new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed epoch's mean losses
    pub fn record_epoch(&mut self, gen_loss: f64, disc_loss: f64) {
        self.gen_losses.push(gen_loss);
        self.disc_losses.push(disc_loss);
    }

    /// Number of recorded epochs
    pub fn num_epochs(&self) -> usize {
        self.gen_losses.len()
    }

    /// Check if no epochs have been recorded
    pub fn is_empty(&self) -> bool {
        self.gen_losses.is_empty()
    }

    /// Latest generator loss
    pub fn latest_gen_loss(&self) -> Option<f64> {
        self.gen_losses.last().copied()
    }

    /// Latest discriminator loss
    pub fn latest_disc_loss(&self) -> Option<f64> {
        self.disc_losses.last().copied()
    }

    /// Save history to a CSV file
    pub fn save_csv(&self, path: &str) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["epoch", "gen_loss", "disc_loss"])?;

        for i in 0..self.num_epochs() {
            writer.write_record([
                (i + 1).to_string(),
                self.gen_losses[i].to_string(),
                self.disc_losses[i].to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
