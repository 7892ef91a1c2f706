//! # DCGAN for Handwritten Digit Synthesis
//!
//! This crate provides a modular implementation of a Deep Convolutional
//! Generative Adversarial Network (DCGAN) that learns to synthesize
//! MNIST-style digit images from latent noise.
//!
//! ## Modules
//!
//! - `data`: MNIST loading, normalization and batching
//! - `model`: GAN architecture (Generator and Discriminator)
//! - `training`: Adversarial training loop and loss functions
//! - `report`: Sample grids and the loss-curve chart
//! - `utils`: Configuration and the persisted generator artifact

pub mod data;
pub mod error;
pub mod model;
pub mod report;
pub mod training;
pub mod utils;

pub use data::{DataLoader, ImageDataset};
pub use error::{GanError, Result};
pub use model::{Discriminator, DiscriminatorConfig, Gan, Generator, GeneratorConfig};
pub use report::{LossCurve, SampleGrid};
pub use training::{discriminator_loss, generator_loss, train_step, LossHistory, Trainer, TrainingConfig};
pub use utils::{load_generator, save_generator, Config, GeneratorMeta};
