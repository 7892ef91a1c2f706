//! Reporting module: visual diagnostics for a training run
//!
//! This module provides:
//! - Per-epoch sample grids rendered from a fixed noise batch
//! - The end-of-training loss-curve chart
//!
//! Both are write-only observers; neither feeds back into training.

mod loss_plot;
mod samples;

pub use loss_plot::LossCurve;
pub use samples::{save_images, SampleGrid};
