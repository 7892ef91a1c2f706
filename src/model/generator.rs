//! Generator network for the DCGAN
//!
//! The Generator transforms random noise vectors into synthetic digit images.
//! A dense projection is upsampled to 28x28 through transposed convolutions.

use tch::{nn, nn::Module, nn::ModuleT, Device, Tensor};

use crate::data::{IMAGE_CHANNELS, IMAGE_SIDE};
use crate::error::{GanError, Result};

/// Side length of the initial feature map before upsampling (28 / 4)
const INIT_SIDE: i64 = IMAGE_SIDE / 4;

/// Generator network configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Size of the latent noise vector
    pub latent_dim: i64,
    /// Number of filters in the initial feature map
    pub base_filters: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latent_dim: 100,
            base_filters: 128,
        }
    }
}

/// Generator network
///
/// Architecture:
/// 1. Dense projection from latent space to a 7x7 feature map, with
///    BatchNorm and LeakyReLU
/// 2. ConvTranspose2d stride 1 keeping 7x7, then two stride-2 upsampling
///    ConvTranspose2d layers (7x7 -> 14x14 -> 28x28), BatchNorm + LeakyReLU
///    between them
/// 3. Final ConvTranspose2d maps to one channel with Tanh activation
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    fc: nn::Linear,
    bn0: nn::BatchNorm,
    conv1: nn::ConvTranspose2D,
    bn1: nn::BatchNorm,
    conv2: nn::ConvTranspose2D,
    bn2: nn::BatchNorm,
    conv3: nn::ConvTranspose2D,
}

impl Generator {
    /// Create a new Generator network
    pub fn new(vs: &nn::Path, config: GeneratorConfig) -> Result<Self> {
        if config.latent_dim <= 0 {
            return Err(GanError::Config(format!(
                "latent dimension must be > 0, got {}",
                config.latent_dim
            )));
        }
        if config.base_filters <= 0 || config.base_filters % 2 != 0 {
            return Err(GanError::Config(format!(
                "generator base filters must be positive and even, got {}",
                config.base_filters
            )));
        }

        let base = config.base_filters;
        let init_size = base * INIT_SIDE * INIT_SIDE;

        let linear_config = nn::LinearConfig {
            bias: false,
            ..Default::default()
        };
        let fc = nn::linear(vs / "fc", config.latent_dim, init_size, linear_config);
        let bn0 = nn::batch_norm1d(vs / "bn0", init_size, Default::default());

        // "same" padding for kernel 5: stride 1 pads 2, stride 2 pads 2
        // with output padding 1 so each layer exactly doubles the side.
        let keep_config = nn::ConvTransposeConfig {
            stride: 1,
            padding: 2,
            bias: false,
            ..Default::default()
        };
        let upsample_config = nn::ConvTransposeConfig {
            stride: 2,
            padding: 2,
            output_padding: 1,
            bias: false,
            ..Default::default()
        };

        let conv1 = nn::conv_transpose2d(vs / "conv1", base, base, 5, keep_config);
        let bn1 = nn::batch_norm2d(vs / "bn1", base, Default::default());

        let conv2 = nn::conv_transpose2d(vs / "conv2", base, base / 2, 5, upsample_config);
        let bn2 = nn::batch_norm2d(vs / "bn2", base / 2, Default::default());

        let conv3 = nn::conv_transpose2d(vs / "conv3", base / 2, IMAGE_CHANNELS, 5, upsample_config);

        Ok(Self {
            config,
            fc,
            bn0,
            conv1,
            bn1,
            conv2,
            bn2,
            conv3,
        })
    }

    /// Generate synthetic images from noise
    ///
    /// # Arguments
    ///
    /// * `noise` - Tensor of shape (batch_size, latent_dim)
    /// * `train` - Whether in training mode (affects batch norm)
    ///
    /// # Returns
    ///
    /// Tensor of shape (batch_size, 28, 28, 1) with values in [-1, 1]
    pub fn forward_t(&self, noise: &Tensor, train: bool) -> Tensor {
        let batch_size = noise.size()[0];
        let base = self.config.base_filters;

        let x = self.fc.forward(noise);
        let x = self.bn0.forward_t(&x, train);
        let x = x.leaky_relu();

        // (batch, channels, 7, 7)
        let x = x.view([batch_size, base, INIT_SIDE, INIT_SIDE]);

        let x = self.conv1.forward(&x);
        let x = self.bn1.forward_t(&x, train);
        let x = x.leaky_relu();

        let x = self.conv2.forward(&x);
        let x = self.bn2.forward_t(&x, train);
        let x = x.leaky_relu();

        let x = self.conv3.forward(&x);
        let x = x.tanh();

        // NCHW -> NHWC
        x.permute([0, 2, 3, 1])
    }

    /// Generate images (inference mode)
    pub fn generate(&self, noise: &Tensor) -> Tensor {
        self.forward_t(noise, false)
    }

    /// Generate images from random noise
    pub fn generate_random(&self, num_images: i64, device: Device) -> Tensor {
        let noise = Tensor::randn(
            [num_images, self.config.latent_dim],
            (tch::Kind::Float, device),
        );
        self.generate(&noise)
    }

    /// Get configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl ModuleT for Generator {
    fn forward_t(&self, xs: &Tensor, train: bool) -> Tensor {
        Generator::forward_t(self, xs, train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::nn::VarStore;

    #[test]
    fn test_generator_output_shape() {
        let vs = VarStore::new(Device::Cpu);
        let gen = Generator::new(&vs.root(), GeneratorConfig::default()).unwrap();

        let noise = Tensor::randn([4, 100], (tch::Kind::Float, Device::Cpu));
        let output = gen.generate(&noise);

        assert_eq!(output.size(), vec![4, 28, 28, 1]);
    }

    #[test]
    fn test_generator_output_range() {
        let vs = VarStore::new(Device::Cpu);
        let gen = Generator::new(&vs.root(), GeneratorConfig::default()).unwrap();

        let noise = Tensor::randn([2, 100], (tch::Kind::Float, Device::Cpu));
        let output = gen.generate(&noise);

        let min_val: f64 = output.min().double_value(&[]);
        let max_val: f64 = output.max().double_value(&[]);
        assert!(min_val >= -1.0 && max_val <= 1.0);
    }

    #[test]
    fn test_generator_inference_is_deterministic() {
        let vs = VarStore::new(Device::Cpu);
        let gen = Generator::new(&vs.root(), GeneratorConfig::default()).unwrap();

        let noise = Tensor::randn([3, 100], (tch::Kind::Float, Device::Cpu));
        let first = gen.generate(&noise);
        let second = gen.generate(&noise);

        assert!(first.allclose(&second, 1e-12, 1e-12, false));
    }

    #[test]
    fn test_generator_rejects_bad_config() {
        let vs = VarStore::new(Device::Cpu);
        let config = GeneratorConfig {
            latent_dim: 0,
            ..Default::default()
        };
        assert!(Generator::new(&vs.root(), config).is_err());
    }
}
