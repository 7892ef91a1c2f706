//! Sample grid rendering for visual training progress
//!
//! Renders generator output into a tiled grayscale PNG, one file per
//! sampled epoch, so progress can be inspected side by side.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use tch::Tensor;

use crate::data::IMAGE_SIDE;
use crate::error::{GanError, Result};
use crate::model::Generator;

/// Renders a square grid of generated thumbnails per epoch
pub struct SampleGrid {
    out_dir: PathBuf,
    grid_side: u32,
    padding: u32,
}

impl SampleGrid {
    /// Create a renderer writing `epoch_NNNN.png` files into `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>, grid_side: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            grid_side,
            padding: 2,
        }
    }

    /// Render one grid from the fixed noise batch
    ///
    /// The generator runs in inference mode; output is rescaled from
    /// [-1, 1] to [0, 255] grayscale. The noise batch must hold exactly
    /// `grid_side^2` vectors.
    pub fn render(&self, generator: &Generator, epoch: usize, noise: &Tensor) -> Result<PathBuf> {
        let expected = i64::from(self.grid_side).pow(2);
        if noise.size()[0] != expected {
            return Err(GanError::InvalidShape {
                expected: format!("({expected}, latent_dim) noise batch"),
                got: format!("{:?}", noise.size()),
            });
        }

        let images = generator.generate(noise);
        let pixels = (images + 1.0) * 127.5;
        let flat: Vec<f64> = pixels.clamp(0.0, 255.0).flatten(0, -1).try_into()?;

        let cell = IMAGE_SIDE as u32;
        let side = self.grid_side * cell + (self.grid_side + 1) * self.padding;
        let mut canvas = GrayImage::from_pixel(side, side, Luma([0u8]));

        let cell_pixels = (IMAGE_SIDE * IMAGE_SIDE) as usize;
        for idx in 0..(self.grid_side * self.grid_side) {
            let row = idx / self.grid_side;
            let col = idx % self.grid_side;
            let origin_x = self.padding + col * (cell + self.padding);
            let origin_y = self.padding + row * (cell + self.padding);

            let base = idx as usize * cell_pixels;
            for y in 0..cell {
                for x in 0..cell {
                    let value = flat[base + (y * cell + x) as usize] as u8;
                    canvas.put_pixel(origin_x + x, origin_y + y, Luma([value]));
                }
            }
        }

        let path = self.out_dir.join(format!("epoch_{epoch:04}.png"));
        canvas.save(&path)?;
        Ok(path)
    }
}

/// Save a batch of generated images as individual grayscale PNGs
///
/// `images` has shape (N, 28, 28, 1) with values in [-1, 1]; files are
/// named `sample_NNNN.png`.
pub fn save_images(images: &Tensor, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let size = images.size();
    if size.len() != 4 || size[1] != IMAGE_SIDE || size[2] != IMAGE_SIDE || size[3] != 1 {
        return Err(GanError::InvalidShape {
            expected: format!("(N, {IMAGE_SIDE}, {IMAGE_SIDE}, 1)"),
            got: format!("{size:?}"),
        });
    }

    let num_images = size[0];
    let pixels = (images + 1.0) * 127.5;
    let flat: Vec<f64> = pixels.clamp(0.0, 255.0).flatten(0, -1).try_into()?;

    let cell = IMAGE_SIDE as u32;
    let cell_pixels = (IMAGE_SIDE * IMAGE_SIDE) as usize;
    let mut paths = Vec::with_capacity(num_images as usize);

    for idx in 0..num_images as usize {
        let mut canvas = GrayImage::new(cell, cell);
        let base = idx * cell_pixels;
        for y in 0..cell {
            for x in 0..cell {
                let value = flat[base + (y * cell + x) as usize] as u8;
                canvas.put_pixel(x, y, Luma([value]));
            }
        }
        let path = out_dir.join(format!("sample_{idx:04}.png"));
        canvas.save(&path)?;
        paths.push(path);
    }

    Ok(paths)
}
