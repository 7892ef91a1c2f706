//! DCGAN for handwritten digit synthesis
//!
//! Main entry point providing a CLI interface for:
//! - Training the GAN on MNIST
//! - Generating images from a trained generator
//! - Initializing a default configuration file

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tch::Tensor;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mnist_dcgan::{
    data::{DataLoader, ImageDataset},
    model::{DiscriminatorConfig, Gan, GeneratorConfig},
    report::save_images,
    training::{Trainer, TrainingConfig},
    utils::{load_generator, load_generator_meta, Config},
};

/// DCGAN for handwritten digit synthesis
#[derive(Parser)]
#[command(name = "mnist_dcgan")]
#[command(version = "0.1.0")]
#[command(about = "Train a DCGAN on MNIST and sample synthetic digits")]
struct Cli {
    /// Path to configuration file (.json or .toml)
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the DCGAN model
    Train {
        /// Directory holding the MNIST ubyte files (overrides config)
        #[arg(short, long)]
        data: Option<String>,

        /// Number of epochs (overrides config)
        #[arg(short, long)]
        epochs: Option<usize>,
    },

    /// Generate digit images from a trained generator
    Generate {
        /// Directory holding the trained generator artifact
        #[arg(short, long)]
        model: String,

        /// Number of images to generate
        #[arg(short, long, default_value = "16")]
        num_samples: i64,

        /// Output directory for the generated PNGs
        #[arg(short, long, default_value = "samples")]
        output: String,

        /// Interpolate between two random latent points instead of
        /// sampling independently
        #[arg(long)]
        interpolate: bool,

        /// Number of interpolation steps
        #[arg(long, default_value = "10")]
        interp_steps: i64,
    },

    /// Initialize a default configuration file
    Init {
        /// Output configuration file path
        #[arg(short, long, default_value = "config.json")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbosity.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Train { data, epochs } => {
            train(&cli.config, data, epochs)?;
        }
        Commands::Generate {
            model,
            num_samples,
            output,
            interpolate,
            interp_steps,
        } => {
            generate(&cli.config, &model, num_samples, &output, interpolate, interp_steps)?;
        }
        Commands::Init { output } => {
            init_config(&output)?;
        }
    }

    Ok(())
}

/// Load the configuration file, falling back to defaults when absent
fn load_config(path: &str) -> Result<Config> {
    let config = if Path::new(path).exists() {
        if path.ends_with(".toml") {
            Config::from_toml(path)?
        } else {
            Config::from_json(path)?
        }
    } else {
        info!("Config file not found, using defaults");
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// Train the DCGAN model
fn train(config_path: &str, data_dir: Option<String>, epochs: Option<usize>) -> Result<()> {
    let config = load_config(config_path)?;

    let device = config.get_device();
    info!("Using device: {:?}", device);

    // One seed drives both the torch RNG (noise, init, dropout) and the
    // shuffle RNG, so runs are reproducible end to end.
    tch::manual_seed(config.training.seed as i64);

    let data_dir = data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    info!("Loading MNIST from {}", data_dir);
    let dataset = ImageDataset::load_mnist(&data_dir)?;
    info!("Loaded {} images", dataset.len());

    let mut data_loader = DataLoader::new(
        dataset,
        config.data.batch_size,
        true,
        config.data.drop_last,
        config.training.seed,
    )?;

    let gen_config = GeneratorConfig {
        latent_dim: config.model.latent_dim,
        base_filters: config.model.gen_base_filters,
    };
    let disc_config = DiscriminatorConfig {
        base_filters: config.model.disc_base_filters,
        dropout: config.model.dropout,
    };
    let mut gan = Gan::new(gen_config, disc_config, device)?;

    let training_config = TrainingConfig {
        epochs: epochs.unwrap_or(config.training.epochs),
        gen_lr: config.training.gen_lr,
        disc_lr: config.training.disc_lr,
        sample_every: config.training.sample_every,
        sample_grid_side: config.training.sample_grid_side,
        artifact_dir: config.training.artifact_dir.clone(),
    };

    let mut trainer = Trainer::new(training_config);
    let history = trainer.train(&mut gan, &mut data_loader)?;

    info!(
        "Training complete. Final G_loss: {:.4}, D_loss: {:.4}",
        history.latest_gen_loss().unwrap_or(0.0),
        history.latest_disc_loss().unwrap_or(0.0)
    );

    Ok(())
}

/// Generate images from a trained generator artifact
fn generate(
    config_path: &str,
    model_dir: &str,
    num_samples: i64,
    output: &str,
    interpolate: bool,
    interp_steps: i64,
) -> Result<()> {
    let config = load_config(config_path)?;
    let device = config.get_device();

    // Rebuild the generator from the persisted topology description
    let meta = load_generator_meta(model_dir)?;
    let gen_config = GeneratorConfig {
        latent_dim: meta.latent_dim,
        base_filters: meta.base_filters,
    };
    let disc_config = DiscriminatorConfig {
        base_filters: config.model.disc_base_filters,
        dropout: config.model.dropout,
    };
    let mut gan = Gan::new(gen_config, disc_config, device)?;
    load_generator(&mut gan, model_dir)?;

    std::fs::create_dir_all(output)?;

    let images = if interpolate {
        info!("Interpolating {} steps between two latent points", interp_steps);
        let z1 = Tensor::randn([meta.latent_dim], (tch::Kind::Float, device));
        let z2 = Tensor::randn([meta.latent_dim], (tch::Kind::Float, device));
        gan.interpolate(&z1, &z2, interp_steps)
    } else {
        info!("Generating {} images", num_samples);
        gan.generate(num_samples)
    };

    let paths = save_images(&images, Path::new(output))?;
    info!("Saved {} images to {}", paths.len(), output);

    Ok(())
}

/// Write a default configuration file
fn init_config(output: &str) -> Result<()> {
    let config = Config::default();
    if output.ends_with(".toml") {
        config.save_toml(output)?;
    } else {
        config.save_json(output)?;
    }
    info!("Wrote default configuration to {}", output);
    Ok(())
}
