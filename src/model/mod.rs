//! Model module containing the GAN architecture components
//!
//! This module provides:
//! - Generator network mapping latent noise to digit images
//! - Discriminator network scoring images with a real/fake logit
//! - Gan wrapper combining both networks

mod discriminator;
mod gan;
mod generator;

pub use discriminator::{Discriminator, DiscriminatorConfig};
pub use gan::Gan;
pub use generator::{Generator, GeneratorConfig};
