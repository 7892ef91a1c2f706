//! Data module for loading and batching digit images
//!
//! This module provides:
//! - MNIST ingestion, normalized to [-1, 1]
//! - DataLoader for batching images with seeded shuffling

mod loader;
mod mnist;

pub use loader::DataLoader;
pub use mnist::{ImageDataset, IMAGE_CHANNELS, IMAGE_SIDE};
