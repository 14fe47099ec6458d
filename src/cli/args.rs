//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser};

use crate::launch::InvocationParams;

use super::{resolve_config_path, LaunchProfile, PrintFormat};

/// The positional parameters, in the order the job script passes them.
#[derive(Debug, Clone, Args)]
pub struct PositionalArgs {
    /// Preprocessed contact-matrix file.
    #[arg(value_name = "DATA_DIR", allow_hyphen_values = true)]
    pub data_dir: String,
    /// Output directory for model data.
    #[arg(value_name = "OUT_DIR", allow_hyphen_values = true)]
    pub out_dir: String,
    /// Model prefix used for file naming.
    #[arg(value_name = "MODEL_ID", allow_hyphen_values = true)]
    pub model_id: String,
    /// Contact-matrix format (full, sparse-concat, sparse-rowcol).
    #[arg(value_name = "CM_FORMAT", allow_hyphen_values = true)]
    pub cm_format: String,
    /// Model architecture (resnet, symmetric).
    #[arg(value_name = "MODEL_TYPE", allow_hyphen_values = true)]
    pub model_type: String,
    /// H of the (H, W) contact matrix.
    #[arg(value_name = "HEIGHT", allow_hyphen_values = true)]
    pub height: String,
    /// W of the (H, W) contact matrix.
    #[arg(value_name = "WIDTH", allow_hyphen_values = true)]
    pub width: String,
    /// Latent space dimension.
    #[arg(value_name = "LATENT_DIM", allow_hyphen_values = true)]
    pub latent_dim: String,
    /// `amp` enables mixed precision; anything else disables it.
    #[arg(value_name = "AMP", allow_hyphen_values = true)]
    pub amp: String,
    /// `distributed` enables distributed training; anything else disables it.
    #[arg(value_name = "DISTRIBUTED", allow_hyphen_values = true)]
    pub distributed: String,
    #[arg(value_name = "BATCH_SIZE", allow_hyphen_values = true)]
    pub batch_size: String,
    #[arg(value_name = "EPOCHS")]
    pub epochs: u32,
    /// Plot every n'th point in embedding plots.
    #[arg(value_name = "SAMPLE_INTERVAL", allow_hyphen_values = true)]
    pub sample_interval: String,
    /// Optimizer name, or a full `name=<n>,lr=<lr>` spec.
    #[arg(value_name = "OPTIMIZER", allow_hyphen_values = true)]
    pub optimizer: String,
    /// Checkpoint to resume from; empty or omitted starts fresh.
    #[arg(value_name = "CHECKPOINT", allow_hyphen_values = true)]
    pub checkpoint: Option<String>,
}

impl From<PositionalArgs> for InvocationParams {
    fn from(args: PositionalArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            out_dir: args.out_dir,
            model_id: args.model_id,
            cm_format: args.cm_format,
            model_type: args.model_type,
            height: args.height,
            width: args.width,
            latent_dim: args.latent_dim,
            amp: args.amp,
            distributed: args.distributed,
            batch_size: args.batch_size,
            epochs: args.epochs,
            sample_interval: args.sample_interval,
            optimizer: args.optimizer,
            checkpoint: args.checkpoint.unwrap_or_default(),
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Launch one rank of a distributed VAE training job under LSF/OpenMPI",
    long_about = None,
    after_help = "Hint: use `--dry-run` to print the training command without starting it."
)]
pub struct LaunchProfileArgs {
    /// Path to vae-launch.toml (overrides VAE_LAUNCH_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Print the command without executing it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Format used to print the command before it runs.
    #[arg(long, value_enum, default_value_t = PrintFormat::Text)]
    pub print_format: PrintFormat,
    #[command(flatten)]
    pub positional: PositionalArgs,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let (config_path, config_source) = resolve_config_path(self.config_override)?;

        Ok(LaunchProfile {
            config_path,
            config_source,
            dry_run: self.dry_run,
            format: self.print_format,
            params: self.positional.into(),
        })
    }
}
