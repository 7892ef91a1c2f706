//! Loss functions for GAN training
//!
//! Implements Binary Cross Entropy losses for generator and discriminator,
//! computed directly on raw logits for numerical stability.

use tch::Tensor;

/// Generator loss: -log(D(G(z)))
///
/// The generator wants the discriminator to output 1 (real) for fake
/// images, so fake logits are scored against targets of ones.
///
/// # Arguments
///
/// * `fake_logits` - Discriminator output on generated images (logits)
///
/// # Returns
///
/// Scalar loss tensor
pub fn generator_loss(fake_logits: &Tensor) -> Tensor {
    let targets = Tensor::ones_like(fake_logits);
    fake_logits.binary_cross_entropy_with_logits::<Tensor>(
        &targets,
        None,
        None,
        tch::Reduction::Mean,
    )
}

/// Discriminator loss: -log(D(x)) - log(1-D(G(z)))
///
/// The discriminator wants to output 1 for real images and 0 for fake
/// images; the two cross-entropy terms are summed.
///
/// # Arguments
///
/// * `real_logits` - Discriminator output on real images (logits)
/// * `fake_logits` - Discriminator output on generated images (logits)
///
/// # Returns
///
/// Scalar loss tensor
pub fn discriminator_loss(real_logits: &Tensor, fake_logits: &Tensor) -> Tensor {
    let real_targets = Tensor::ones_like(real_logits);
    let real_loss = real_logits.binary_cross_entropy_with_logits::<Tensor>(
        &real_targets,
        None,
        None,
        tch::Reduction::Mean,
    );

    let fake_targets = Tensor::zeros_like(fake_logits);
    let fake_loss = fake_logits.binary_cross_entropy_with_logits::<Tensor>(
        &fake_targets,
        None,
        None,
        tch::Reduction::Mean,
    );

    real_loss + fake_loss
}
