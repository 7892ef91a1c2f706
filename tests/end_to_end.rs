//! End-to-end training scenario on a tiny synthetic dataset

use tch::{Device, Kind, Tensor};

use mnist_dcgan::{
    data::{DataLoader, ImageDataset},
    model::Gan,
    training::{Trainer, TrainingConfig},
    utils::load_generator_meta,
};

fn zero_dataset(n: i64) -> ImageDataset {
    let images = Tensor::zeros([n, 28, 28, 1], (Kind::Float, Device::Cpu));
    ImageDataset::from_tensor(images).unwrap()
}

#[test]
fn one_epoch_over_four_zero_images() {
    tch::manual_seed(42);
    let artifact_dir = tempfile::tempdir().unwrap();

    let mut gan = Gan::with_defaults(100, Device::Cpu).unwrap();
    let mut data_loader = DataLoader::new(zero_dataset(4), 4, true, true, 42).unwrap();

    let config = TrainingConfig {
        epochs: 1,
        artifact_dir: artifact_dir.path().to_string_lossy().to_string(),
        ..Default::default()
    };
    let mut trainer = Trainer::new(config);
    let history = trainer.train(&mut gan, &mut data_loader).unwrap();

    // One entry per loss-history sequence, both finite
    assert_eq!(history.num_epochs(), 1);
    let g_loss = history.latest_gen_loss().unwrap();
    let d_loss = history.latest_disc_loss().unwrap();
    assert!(g_loss.is_finite());
    assert!(d_loss.is_finite());
    assert!(d_loss >= 0.0);

    // Exactly one sample-image artifact
    let sample_files: Vec<_> = std::fs::read_dir(artifact_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|n| n.starts_with("epoch_") && n.ends_with(".png"))
                .unwrap_or(false)
        })
        .collect();
    assert_eq!(sample_files.len(), 1);

    // Generator persisted with its topology; loss diagnostics written
    assert!(artifact_dir.path().join("generator.pt").exists());
    let meta = load_generator_meta(artifact_dir.path().to_str().unwrap()).unwrap();
    assert_eq!(meta.epochs_trained, 1);
    assert_eq!(meta.latent_dim, 100);
    assert_eq!(meta.image_side, 28);
    assert!(artifact_dir.path().join("losses.csv").exists());
    assert!(artifact_dir.path().join("loss_curve.png").exists());
}

#[test]
fn identical_seeds_give_identical_loss_sequences() {
    let run = || -> Vec<f64> {
        tch::manual_seed(1234);
        let artifact_dir = tempfile::tempdir().unwrap();
        let mut gan = Gan::with_defaults(32, Device::Cpu).unwrap();
        let mut data_loader = DataLoader::new(zero_dataset(8), 4, true, true, 1234).unwrap();
        let config = TrainingConfig {
            epochs: 2,
            artifact_dir: artifact_dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        let mut trainer = Trainer::new(config);
        let history = trainer.train(&mut gan, &mut data_loader).unwrap();
        let mut losses = history.gen_losses.clone();
        losses.extend_from_slice(&history.disc_losses);
        losses
    };

    let first = run();
    let second = run();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert!((a - b).abs() < 1e-9, "loss sequences diverged: {a} vs {b}");
    }
}
