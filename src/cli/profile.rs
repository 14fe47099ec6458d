//! LaunchProfile and config-path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::{
    config::{ConfigSource, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH},
    launch::InvocationParams,
};

/// How the assembled command is printed before it runs.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PrintFormat {
    /// Shell-quoted command line.
    Text,
    /// JSON object with program, args, env and command line.
    Json,
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub config_source: ConfigSource,
    pub dry_run: bool,
    pub format: PrintFormat,
    pub params: InvocationParams,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<(PathBuf, ConfigSource)> {
    resolve_config_path_from(override_path, env::var_os(CONFIG_ENV_KEY).map(PathBuf::from))
}

fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_path: Option<PathBuf>,
) -> Result<(PathBuf, ConfigSource)> {
    let (path, source) = match (override_path, env_path) {
        (Some(path), _) => (path, ConfigSource::Cli),
        (None, Some(path)) if !path.as_os_str().is_empty() => (path, ConfigSource::Env),
        _ => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default),
    };

    if path.is_absolute() {
        return Ok((path, source));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((cwd.join(path), source))
}
