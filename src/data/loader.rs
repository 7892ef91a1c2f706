//! DataLoader for batching and iterating over training images
//!
//! Provides batching for GAN training with support for:
//! - Seeded per-epoch reshuffling
//! - Drop last incomplete batch
//! - Iteration over batches

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tch::Tensor;

use crate::data::mnist::ImageDataset;
use crate::error::{GanError, Result};

/// DataLoader yielding image batches of shape (B, 28, 28, 1)
pub struct DataLoader {
    /// Full dataset tensor of shape (num_images, 28, 28, 1)
    images: Tensor,
    /// Batch size
    batch_size: usize,
    /// Whether to reshuffle at the start of each epoch
    shuffle: bool,
    /// Whether to drop the last incomplete batch
    drop_last: bool,
    /// Seeded RNG driving the shuffles
    rng: StdRng,
    /// Current index permutation
    indices: Vec<i64>,
    /// Current position in iteration
    cursor: usize,
}

impl DataLoader {
    /// Create a new DataLoader
    ///
    /// # Arguments
    ///
    /// * `dataset` - image dataset to batch
    /// * `batch_size` - number of images per batch
    /// * `shuffle` - whether to reshuffle each epoch
    /// * `drop_last` - whether to drop the incomplete final batch
    /// * `seed` - seed for the shuffle RNG
    pub fn new(
        dataset: ImageDataset,
        batch_size: usize,
        shuffle: bool,
        drop_last: bool,
        seed: u64,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(GanError::Config("batch size must be > 0".to_string()));
        }
        let num_images = dataset.len();
        let indices: Vec<i64> = (0..num_images as i64).collect();

        let mut loader = Self {
            images: dataset.into_tensor(),
            batch_size,
            shuffle,
            drop_last,
            rng: StdRng::seed_from_u64(seed),
            indices,
            cursor: 0,
        };

        if shuffle {
            loader.shuffle_indices();
        }

        Ok(loader)
    }

    /// Number of batches per epoch
    pub fn num_batches(&self) -> usize {
        let num_images = self.indices.len();
        if self.drop_last {
            num_images / self.batch_size
        } else {
            num_images.div_ceil(self.batch_size)
        }
    }

    /// Total number of images
    pub fn num_images(&self) -> usize {
        self.indices.len()
    }

    fn shuffle_indices(&mut self) {
        self.indices.shuffle(&mut self.rng);
    }

    /// Reset for a new epoch
    pub fn reset(&mut self) {
        self.cursor = 0;
        if self.shuffle {
            self.shuffle_indices();
        }
    }

    /// Get next batch, or None when the epoch is complete
    pub fn next_batch(&mut self) -> Option<Tensor> {
        let num_images = self.indices.len();
        let start = self.cursor;

        if start >= num_images {
            return None;
        }

        let end = (start + self.batch_size).min(num_images);

        if self.drop_last && end - start < self.batch_size {
            return None;
        }

        let index = Tensor::from_slice(&self.indices[start..end]);
        let batch = self.images.index_select(0, &index);

        self.cursor = end;
        Some(batch)
    }

    /// Iterate over one epoch of batches; resets (and reshuffles) first
    pub fn iter(&mut self) -> DataLoaderIter<'_> {
        self.reset();
        DataLoaderIter { loader: self }
    }
}

/// Iterator adapter for DataLoader
pub struct DataLoaderIter<'a> {
    loader: &'a mut DataLoader,
}

impl Iterator for DataLoaderIter<'_> {
    type Item = Tensor;

    fn next(&mut self) -> Option<Self::Item> {
        self.loader.next_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::{Device, Kind};

    fn dataset(n: i64) -> ImageDataset {
        let images = Tensor::zeros([n, 28, 28, 1], (Kind::Float, Device::Cpu));
        ImageDataset::from_tensor(images).unwrap()
    }

    #[test]
    fn test_dataloader_basic() {
        let mut loader = DataLoader::new(dataset(10), 3, false, false, 0).unwrap();

        assert_eq!(loader.num_batches(), 4); // ceil(10/3)
        assert_eq!(loader.num_images(), 10);

        let mut batch_count = 0;
        while let Some(batch) = loader.next_batch() {
            batch_count += 1;
            if batch_count < 4 {
                assert_eq!(batch.size(), vec![3, 28, 28, 1]);
            } else {
                assert_eq!(batch.size()[0], 1); // last batch has 1 image
            }
        }
        assert_eq!(batch_count, 4);
    }

    #[test]
    fn test_dataloader_drop_last() {
        let mut loader = DataLoader::new(dataset(10), 3, false, true, 0).unwrap();

        assert_eq!(loader.num_batches(), 3); // floor(10/3)

        let mut batch_count = 0;
        while let Some(batch) = loader.next_batch() {
            batch_count += 1;
            assert_eq!(batch.size()[0], 3);
        }
        assert_eq!(batch_count, 3);
    }

    #[test]
    fn test_dataloader_rejects_zero_batch() {
        assert!(DataLoader::new(dataset(4), 0, false, false, 0).is_err());
    }

    #[test]
    fn test_dataloader_iter() {
        let mut loader = DataLoader::new(dataset(10), 5, false, true, 0).unwrap();
        let batches: Vec<_> = loader.iter().collect();
        assert_eq!(batches.len(), 2);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        // Distinguishable images: pixel value = image index
        let build = || {
            let values = Tensor::arange(10, (Kind::Float, Device::Cpu))
                .view([10, 1, 1, 1])
                .expand([10, 28, 28, 1], false);
            ImageDataset::from_tensor(values.contiguous()).unwrap()
        };

        let mut a = DataLoader::new(build(), 4, true, true, 7).unwrap();
        let mut b = DataLoader::new(build(), 4, true, true, 7).unwrap();

        let batch_a = a.next_batch().unwrap();
        let batch_b = b.next_batch().unwrap();
        assert!(batch_a.allclose(&batch_b, 1e-12, 1e-12, false));
    }
}
