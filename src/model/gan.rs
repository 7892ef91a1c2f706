//! GAN wrapper combining Generator and Discriminator
//!
//! Owns both networks and their separate variable stores so the two
//! parameter sets (and their optimizers) never overlap.

use tch::{nn, nn::OptimizerConfig, nn::VarStore, Device, Tensor};

use crate::error::Result;

use super::discriminator::{Discriminator, DiscriminatorConfig};
use super::generator::{Generator, GeneratorConfig};

/// Complete GAN model
pub struct Gan {
    /// Generator network
    pub generator: Generator,
    /// Discriminator network
    pub discriminator: Discriminator,
    /// Variable store for generator
    pub gen_vs: VarStore,
    /// Variable store for discriminator
    pub disc_vs: VarStore,
    /// Device (CPU/GPU)
    pub device: Device,
}

impl Gan {
    /// Create a new GAN model
    pub fn new(
        gen_config: GeneratorConfig,
        disc_config: DiscriminatorConfig,
        device: Device,
    ) -> Result<Self> {
        let gen_vs = VarStore::new(device);
        let disc_vs = VarStore::new(device);

        let generator = Generator::new(&gen_vs.root(), gen_config)?;
        let discriminator = Discriminator::new(&disc_vs.root(), disc_config)?;

        Ok(Self {
            generator,
            discriminator,
            gen_vs,
            disc_vs,
            device,
        })
    }

    /// Create a GAN with default topology for a given latent dimension
    pub fn with_defaults(latent_dim: i64, device: Device) -> Result<Self> {
        let gen_config = GeneratorConfig {
            latent_dim,
            ..Default::default()
        };
        Self::new(gen_config, DiscriminatorConfig::default(), device)
    }

    /// Generate synthetic images from random noise
    ///
    /// # Returns
    ///
    /// Tensor of shape (num_images, 28, 28, 1)
    pub fn generate(&self, num_images: i64) -> Tensor {
        self.generator.generate_random(num_images, self.device)
    }

    /// Generate images from specific noise vectors
    pub fn generate_from_noise(&self, noise: &Tensor) -> Tensor {
        self.generator.generate(noise)
    }

    /// Discriminate images (probability of being real)
    pub fn discriminate(&self, images: &Tensor) -> Tensor {
        self.discriminator.classify(images)
    }

    /// Build the generator's Adam optimizer over its own parameters only
    pub fn gen_optimizer(&self, lr: f64) -> Result<nn::Optimizer> {
        Ok(nn::Adam::default().build(&self.gen_vs, lr)?)
    }

    /// Build the discriminator's Adam optimizer over its own parameters only
    pub fn disc_optimizer(&self, lr: f64) -> Result<nn::Optimizer> {
        Ok(nn::Adam::default().build(&self.disc_vs, lr)?)
    }

    /// Save the generator weights (the discriminator is a training-only
    /// artifact and is not persisted)
    pub fn save_generator(&self, path: &str) -> Result<()> {
        self.gen_vs.save(path)?;
        Ok(())
    }

    /// Load generator weights from a saved artifact
    pub fn load_generator(&mut self, path: &str) -> Result<()> {
        self.gen_vs.load(path)?;
        Ok(())
    }

    /// Get latent dimension
    pub fn latent_dim(&self) -> i64 {
        self.generator.config().latent_dim
    }

    /// Interpolate between two points in latent space
    ///
    /// # Arguments
    ///
    /// * `z1` - First latent vector, shape (latent_dim,)
    /// * `z2` - Second latent vector, shape (latent_dim,)
    /// * `steps` - Number of interpolation steps
    ///
    /// # Returns
    ///
    /// Tensor of shape (steps, 28, 28, 1)
    pub fn interpolate(&self, z1: &Tensor, z2: &Tensor, steps: i64) -> Tensor {
        let mut images = Vec::new();

        for i in 0..steps {
            let alpha = i as f64 / (steps - 1) as f64;
            let z = z1 * (1.0 - alpha) + z2 * alpha;
            let image = self.generator.generate(&z.unsqueeze(0));
            images.push(image.squeeze_dim(0));
        }

        Tensor::stack(&images, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gan_creation() {
        let gan = Gan::with_defaults(100, Device::Cpu).unwrap();
        assert_eq!(gan.latent_dim(), 100);
    }

    #[test]
    fn test_gan_generate() {
        let gan = Gan::with_defaults(100, Device::Cpu).unwrap();
        let images = gan.generate(4);
        assert_eq!(images.size(), vec![4, 28, 28, 1]);
    }

    #[test]
    fn test_gan_discriminate() {
        let gan = Gan::with_defaults(100, Device::Cpu).unwrap();
        let images = Tensor::randn([4, 28, 28, 1], (tch::Kind::Float, Device::Cpu));
        let probs = gan.discriminate(&images);
        assert_eq!(probs.size(), vec![4, 1]);
    }

    #[test]
    fn test_gan_optimizers_build() {
        let gan = Gan::with_defaults(100, Device::Cpu).unwrap();
        assert!(gan.gen_optimizer(1e-4).is_ok());
        assert!(gan.disc_optimizer(1e-4).is_ok());
    }

    #[test]
    fn test_gan_interpolate() {
        let gan = Gan::with_defaults(100, Device::Cpu).unwrap();

        let z1 = Tensor::randn([100], (tch::Kind::Float, Device::Cpu));
        let z2 = Tensor::randn([100], (tch::Kind::Float, Device::Cpu));

        let interpolated = gan.interpolate(&z1, &z2, 10);
        assert_eq!(interpolated.size(), vec![10, 28, 28, 1]);
    }
}
