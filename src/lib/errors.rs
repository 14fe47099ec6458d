use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures that prevent the training process from being configured or started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Scheduler variable `{name}` is not set")]
    MissingSchedulerVar { name: String },
    #[error("Scheduler variable `{name}` is not valid Unicode")]
    NonUnicodeSchedulerVar { name: String },
    #[error("Failed to read host file {path}: {source}")]
    HostFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Host file {path} lists no eligible host after filtering {excluded:?}")]
    NoEligibleHost {
        path: PathBuf,
        excluded: Vec<String>,
    },
    #[error("Failed to print the launch command: {source}")]
    Print {
        #[source]
        source: io::Error,
    },
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to wait for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}
