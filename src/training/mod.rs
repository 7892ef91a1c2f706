//! Training module for the DCGAN
//!
//! This module provides:
//! - The adversarial training step and epoch loop
//! - Loss functions (Binary Cross Entropy on logits)
//! - Per-epoch loss history

mod history;
mod losses;
mod trainer;

pub use history::LossHistory;
pub use losses::{discriminator_loss, generator_loss};
pub use trainer::{train_step, Trainer, TrainingConfig};
