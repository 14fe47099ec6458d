use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

use super::launcher::require_non_blank;

pub const DEFAULT_AMP_TOKEN: &str = "amp";
pub const DEFAULT_DISTRIBUTED_TOKEN: &str = "distributed";
pub const DEFAULT_OPTIMIZER_LR: &str = "1e-4";

/// Training-script flag translation settings.
#[derive(Debug, Clone)]
pub struct TrainingSection {
    /// Positional value that turns on `--amp`.
    pub amp_token: String,
    /// Positional value that turns on `--distributed`.
    pub distributed_token: String,
    /// Learning rate paired with a bare optimizer name.
    pub optimizer_lr: String,
    pub data_workers: Option<u32>,
    pub wandb_project: Option<String>,
}

impl Default for TrainingSection {
    fn default() -> Self {
        Self {
            amp_token: DEFAULT_AMP_TOKEN.to_string(),
            distributed_token: DEFAULT_DISTRIBUTED_TOKEN.to_string(),
            optimizer_lr: DEFAULT_OPTIMIZER_LR.to_string(),
            data_workers: None,
            wandb_project: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTrainingSection {
    pub amp_token: Option<String>,
    pub distributed_token: Option<String>,
    pub optimizer_lr: Option<String>,
    pub data_workers: Option<u32>,
    pub wandb_project: Option<String>,
}

pub fn parse_training_section(
    raw: Option<RawTrainingSection>,
    path: &Path,
) -> Result<TrainingSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = TrainingSection::default();

    let amp_token = raw.amp_token.unwrap_or(defaults.amp_token);
    require_non_blank(&amp_token, "training.amp_token", path)?;
    let distributed_token = raw.distributed_token.unwrap_or(defaults.distributed_token);
    require_non_blank(&distributed_token, "training.distributed_token", path)?;

    let optimizer_lr = raw.optimizer_lr.unwrap_or(defaults.optimizer_lr);
    validate_learning_rate(&optimizer_lr, path)?;

    let wandb_project = raw
        .wandb_project
        .filter(|project| !project.trim().is_empty());

    Ok(TrainingSection {
        amp_token,
        distributed_token,
        optimizer_lr,
        data_workers: raw.data_workers,
        wandb_project,
    })
}

fn validate_learning_rate(value: &str, path: &Path) -> Result<(), ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(lr) if lr.is_finite() && lr > 0.0 => Ok(()),
        _ => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "training.optimizer_lr",
            message: format!("`{value}` is not a positive learning rate"),
        }),
    }
}
