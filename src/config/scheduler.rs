use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

use super::launcher::require_non_blank;

pub const DEFAULT_WORLD_SIZE_VAR: &str = "OMPI_COMM_WORLD_SIZE";
pub const DEFAULT_RANK_VAR: &str = "OMPI_COMM_WORLD_RANK";
pub const DEFAULT_LOCAL_RANK_VAR: &str = "OMPI_COMM_WORLD_LOCAL_RANK";
pub const DEFAULT_HOSTFILE_VAR: &str = "LSB_DJOB_HOSTFILE";

/// Names of the scheduler-provided variables the launcher reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerSection {
    pub world_size_var: String,
    pub rank_var: String,
    pub local_rank_var: String,
    pub hostfile_var: String,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            world_size_var: DEFAULT_WORLD_SIZE_VAR.to_string(),
            rank_var: DEFAULT_RANK_VAR.to_string(),
            local_rank_var: DEFAULT_LOCAL_RANK_VAR.to_string(),
            hostfile_var: DEFAULT_HOSTFILE_VAR.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSchedulerSection {
    pub world_size_var: Option<String>,
    pub rank_var: Option<String>,
    pub local_rank_var: Option<String>,
    pub hostfile_var: Option<String>,
}

pub fn parse_scheduler_section(
    raw: Option<RawSchedulerSection>,
    path: &Path,
) -> Result<SchedulerSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = SchedulerSection::default();

    let section = SchedulerSection {
        world_size_var: raw.world_size_var.unwrap_or(defaults.world_size_var),
        rank_var: raw.rank_var.unwrap_or(defaults.rank_var),
        local_rank_var: raw.local_rank_var.unwrap_or(defaults.local_rank_var),
        hostfile_var: raw.hostfile_var.unwrap_or(defaults.hostfile_var),
    };

    require_non_blank(&section.world_size_var, "scheduler.world_size_var", path)?;
    require_non_blank(&section.rank_var, "scheduler.rank_var", path)?;
    require_non_blank(&section.local_rank_var, "scheduler.local_rank_var", path)?;
    require_non_blank(&section.hostfile_var, "scheduler.hostfile_var", path)?;

    Ok(section)
}
