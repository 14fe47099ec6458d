//! Snapshot of the scheduler-provided environment.
use std::{env, ffi::OsString, path::PathBuf};

use tracing::debug;

use crate::{config::SchedulerSection, lib::errors::LaunchError};

/// Values LSF/OpenMPI inject into each rank's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerEnv {
    pub world_size: String,
    pub rank: String,
    pub local_rank: String,
    pub hostfile: PathBuf,
}

impl SchedulerEnv {
    /// Read the configured variables from the process environment.
    pub fn from_env(names: &SchedulerSection) -> Result<Self, LaunchError> {
        Self::from_lookup(names, |name| env::var_os(name))
    }

    /// Read the configured variables through `lookup`. Empty values count as unset.
    ///
    /// Rank variables must be Unicode; the host-file path is taken as-is.
    pub fn from_lookup<F>(names: &SchedulerSection, lookup: F) -> Result<Self, LaunchError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let require_os = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| LaunchError::MissingSchedulerVar {
                    name: name.to_string(),
                })
        };
        let require = |name: &str| -> Result<String, LaunchError> {
            require_os(name)?
                .into_string()
                .map_err(|_| LaunchError::NonUnicodeSchedulerVar {
                    name: name.to_string(),
                })
        };

        let snapshot = Self {
            world_size: require(names.world_size_var.as_str())?,
            rank: require(names.rank_var.as_str())?,
            local_rank: require(names.local_rank_var.as_str())?,
            hostfile: PathBuf::from(require_os(names.hostfile_var.as_str())?),
        };

        debug!(
            target: "vae_launch::scheduler",
            world_size = %snapshot.world_size,
            rank = %snapshot.rank,
            local_rank = %snapshot.local_rank,
            hostfile = %snapshot.hostfile.display(),
            "Read scheduler environment"
        );
        Ok(snapshot)
    }
}
