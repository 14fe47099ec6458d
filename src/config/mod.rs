//! Load and validate launcher configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod environment;
pub mod launcher;
pub mod rendezvous;
pub mod scheduler;
pub mod telemetry;
pub mod training;

pub use environment::{
    parse_environment_section, EnvironmentSection, RawEnvironmentSection, DEFAULT_LOCALE,
    DEFAULT_WANDB_MODE, DERIVED_VARIABLES,
};
pub use launcher::{
    parse_launcher_section, LauncherSection, RawLauncherSection, DEFAULT_INTERPRETER,
    DEFAULT_SCRIPT,
};
pub use rendezvous::{
    parse_rendezvous_section, RawRendezvousSection, RendezvousSection, DEFAULT_MASTER_PORT,
};
pub use scheduler::{parse_scheduler_section, RawSchedulerSection, SchedulerSection};
pub use training::{parse_training_section, RawTrainingSection, TrainingSection};

pub const CONFIG_ENV_KEY: &str = "VAE_LAUNCH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "vae-launch.toml";

/// Where the configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Default,
}

impl ConfigSource {
    /// Only the implicit default file may be absent.
    pub const fn is_required(&self) -> bool {
        !matches!(self, ConfigSource::Default)
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Default)]
pub struct LaunchConfig {
    pub launcher: LauncherSection,
    pub rendezvous: RendezvousSection,
    pub environment: EnvironmentSection,
    pub scheduler: SchedulerSection,
    pub training: TrainingSection,
    /// `None` when built-in defaults were used.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLaunchConfig {
    launcher: Option<RawLauncherSection>,
    rendezvous: Option<RawRendezvousSection>,
    environment: Option<RawEnvironmentSection>,
    scheduler: Option<RawSchedulerSection>,
    training: Option<RawTrainingSection>,
}

impl LaunchConfig {
    /// Load configuration, falling back to defaults when the implicit default file is absent.
    pub fn load(path: PathBuf, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_source(&path, source);

        if !source.is_required() && !path.exists() {
            telemetry::log_defaults(&path);
            let config = Self::default();
            telemetry::log_loaded(&config);
            return Ok(config);
        }

        Self::load_from_path(path)
    }

    /// Load configuration from a specific path. The file must exist.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(
            config::File::from(path.clone()).format(config::FileFormat::Toml),
        );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "vae_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLaunchConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "vae_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, &path).map_err(|err| {
            error!(
                target: "vae_launch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLaunchConfig, path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            launcher: parse_launcher_section(raw.launcher, path)?,
            rendezvous: parse_rendezvous_section(raw.rendezvous, path)?,
            environment: parse_environment_section(raw.environment, path)?,
            scheduler: parse_scheduler_section(raw.scheduler, path)?,
            training: parse_training_section(raw.training, path)?,
            source_path: Some(path.to_path_buf()),
        })
    }
}
