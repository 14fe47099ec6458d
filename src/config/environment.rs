use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

use super::launcher::require_non_blank;

pub const DEFAULT_LOCALE: &str = "en_US.utf-8";
pub const DEFAULT_WANDB_MODE: &str = "dryrun";

/// Variables the launcher always derives; `environment.extra` may not redefine them.
pub const DERIVED_VARIABLES: &[&str] = &[
    "WORLD_SIZE",
    "RANK",
    "LOCAL_RANK",
    "MASTER_PORT",
    "MASTER_ADDR",
    "LC_ALL",
    "LANG",
    "WANDB_MODE",
];

/// Fixed environment exported to the training process.
#[derive(Debug, Clone)]
pub struct EnvironmentSection {
    pub locale: String,
    pub wandb_mode: String,
    pub extra: BTreeMap<String, String>,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            wandb_mode: DEFAULT_WANDB_MODE.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawEnvironmentSection {
    pub locale: Option<String>,
    pub wandb_mode: Option<String>,
    /// List of `{ name, value }` tables; table keys would lose their case.
    pub extra: Option<Vec<RawEnvVar>>,
}

#[derive(Debug, Deserialize)]
pub struct RawEnvVar {
    pub name: String,
    pub value: String,
}

pub fn parse_environment_section(
    raw: Option<RawEnvironmentSection>,
    path: &Path,
) -> Result<EnvironmentSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = EnvironmentSection::default();

    let locale = raw.locale.unwrap_or(defaults.locale);
    require_non_blank(&locale, "environment.locale", path)?;
    let wandb_mode = raw.wandb_mode.unwrap_or(defaults.wandb_mode);
    require_non_blank(&wandb_mode, "environment.wandb_mode", path)?;

    let mut extra = BTreeMap::new();
    for var in raw.extra.unwrap_or_default() {
        validate_extra_name(&var.name, path)?;
        if extra.insert(var.name.clone(), var.value).is_some() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "environment.extra",
                message: format!("`{}` is listed more than once", var.name),
            });
        }
    }

    Ok(EnvironmentSection {
        locale,
        wandb_mode,
        extra,
    })
}

fn validate_extra_name(name: &str, path: &Path) -> Result<(), ConfigError> {
    let message = if name.is_empty() || name.contains('=') || name.contains('\0') {
        format!("`{name}` is not a valid variable name")
    } else if DERIVED_VARIABLES.contains(&name) {
        format!("`{name}` is derived by the launcher and cannot be overridden")
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "environment.extra",
        message,
    })
}
