//! MNIST image dataset loading and normalization
//!
//! Wraps the torch vision loader and rescales pixels into the [-1, 1]
//! range the generator's tanh output lives in.

use tch::{Kind, Tensor};

use crate::error::{GanError, Result};

/// Side length of a digit image in pixels
pub const IMAGE_SIDE: i64 = 28;
/// Number of image channels (grayscale)
pub const IMAGE_CHANNELS: i64 = 1;

/// In-memory image dataset of shape (N, 28, 28, 1) with values in [-1, 1]
#[derive(Debug)]
pub struct ImageDataset {
    images: Tensor,
}

impl ImageDataset {
    /// Load the MNIST training split from a directory containing the
    /// four standard `*-ubyte` files.
    ///
    /// The vision loader yields flat rows scaled to [0, 1]; these are
    /// reshaped to (N, 28, 28, 1) and rescaled to [-1, 1].
    pub fn load_mnist(dir: &str) -> Result<Self> {
        let mnist = tch::vision::mnist::load_dir(dir)?;
        let num_images = mnist.train_images.size()[0];
        let images = mnist
            .train_images
            .view([num_images, IMAGE_SIDE, IMAGE_SIDE, IMAGE_CHANNELS])
            .to_kind(Kind::Float)
            * 2.0
            - 1.0;
        Self::from_tensor(images)
    }

    /// Wrap an already-normalized image tensor of shape (N, 28, 28, 1).
    ///
    /// Fails fast when the shape does not match the fixed image geometry
    /// the networks are built for.
    pub fn from_tensor(images: Tensor) -> Result<Self> {
        let size = images.size();
        let shape_ok = size.len() == 4
            && size[1] == IMAGE_SIDE
            && size[2] == IMAGE_SIDE
            && size[3] == IMAGE_CHANNELS;
        if !shape_ok {
            return Err(GanError::InvalidShape {
                expected: format!("(N, {IMAGE_SIDE}, {IMAGE_SIDE}, {IMAGE_CHANNELS})"),
                got: format!("{size:?}"),
            });
        }
        Ok(Self {
            images: images.to_kind(Kind::Float),
        })
    }

    /// Number of images in the dataset
    pub fn len(&self) -> usize {
        self.images.size()[0] as usize
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View of the full image tensor, shape (N, 28, 28, 1)
    pub fn images(&self) -> &Tensor {
        &self.images
    }

    /// Consume the dataset, returning the image tensor
    pub fn into_tensor(self) -> Tensor {
        self.images
    }
}
