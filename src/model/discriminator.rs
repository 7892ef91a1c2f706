//! Discriminator network for the DCGAN
//!
//! The Discriminator classifies digit images as real or synthetic.
//! Strided convolutions downsample the image before a dense classifier.

use tch::{nn, nn::Module, nn::ModuleT, Tensor};

use crate::data::{IMAGE_CHANNELS, IMAGE_SIDE};
use crate::error::{GanError, Result};

/// Side length of the feature map after the two stride-2 convolutions
const FINAL_SIDE: i64 = IMAGE_SIDE / 4;

/// Discriminator network configuration
#[derive(Debug, Clone)]
pub struct DiscriminatorConfig {
    /// Number of filters in the first convolution
    pub base_filters: i64,
    /// Dropout rate
    pub dropout: f64,
}

impl Default for DiscriminatorConfig {
    fn default() -> Self {
        Self {
            base_filters: 64,
            dropout: 0.3,
        }
    }
}

/// Discriminator network
///
/// Architecture:
/// 1. Two stride-2 Conv2d layers (28x28 -> 14x14 -> 7x7) with LeakyReLU
///    and Dropout
/// 2. Flatten and a dense layer producing a single unbounded logit
#[derive(Debug)]
pub struct Discriminator {
    config: DiscriminatorConfig,
    conv1: nn::Conv2D,
    conv2: nn::Conv2D,
    fc: nn::Linear,
}

impl Discriminator {
    /// Create a new Discriminator network
    pub fn new(vs: &nn::Path, config: DiscriminatorConfig) -> Result<Self> {
        if config.base_filters <= 0 {
            return Err(GanError::Config(format!(
                "discriminator base filters must be > 0, got {}",
                config.base_filters
            )));
        }
        if !(0.0..1.0).contains(&config.dropout) {
            return Err(GanError::Config(format!(
                "dropout must be in [0, 1), got {}",
                config.dropout
            )));
        }

        let base = config.base_filters;

        // "same" padding for kernel 3 at stride 2
        let conv_config = nn::ConvConfig {
            stride: 2,
            padding: 1,
            ..Default::default()
        };

        let conv1 = nn::conv2d(vs / "conv1", IMAGE_CHANNELS, base, 3, conv_config);
        let conv2 = nn::conv2d(vs / "conv2", base, base * 2, 3, conv_config);

        let flat_size = base * 2 * FINAL_SIDE * FINAL_SIDE;
        let fc = nn::linear(vs / "fc", flat_size, 1, Default::default());

        Ok(Self {
            config,
            conv1,
            conv2,
            fc,
        })
    }

    /// Forward pass
    ///
    /// # Arguments
    ///
    /// * `input` - Tensor of shape (batch_size, 28, 28, 1)
    /// * `train` - Whether in training mode (affects dropout)
    ///
    /// # Returns
    ///
    /// Tensor of shape (batch_size, 1) with raw logits
    pub fn forward_t(&self, input: &Tensor, train: bool) -> Tensor {
        // NHWC -> NCHW for Conv2D
        let x = input.permute([0, 3, 1, 2]);

        let x = self.conv1.forward(&x);
        let x = x.leaky_relu();
        let x = x.dropout(self.config.dropout, train);

        let x = self.conv2.forward(&x);
        let x = x.leaky_relu();
        let x = x.dropout(self.config.dropout, train);

        let batch_size = x.size()[0];
        let x = x.reshape([batch_size, -1]);

        self.fc.forward(&x)
    }

    /// Classify images (inference mode)
    ///
    /// Returns probability of being real (after sigmoid)
    pub fn classify(&self, input: &Tensor) -> Tensor {
        self.forward_t(input, false).sigmoid()
    }

    /// Get configuration
    pub fn config(&self) -> &DiscriminatorConfig {
        &self.config
    }
}

impl ModuleT for Discriminator {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        Discriminator::forward_t(self, xs, train)
    }
}
