use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_MASTER_PORT: u16 = 29500;
/// LSF lists the launch node as `batch`; it never runs a rank.
pub const DEFAULT_EXCLUDED_HOSTS: &[&str] = &["batch"];

/// Rendezvous endpoint settings for `torch.distributed`.
#[derive(Debug, Clone)]
pub struct RendezvousSection {
    pub master_port: u16,
    pub excluded_hosts: Vec<String>,
}

impl Default for RendezvousSection {
    fn default() -> Self {
        Self {
            master_port: DEFAULT_MASTER_PORT,
            excluded_hosts: DEFAULT_EXCLUDED_HOSTS
                .iter()
                .map(|host| host.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRendezvousSection {
    pub master_port: Option<u16>,
    pub excluded_hosts: Option<Vec<String>>,
}

pub fn parse_rendezvous_section(
    raw: Option<RawRendezvousSection>,
    path: &Path,
) -> Result<RendezvousSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = RendezvousSection::default();

    let master_port = raw.master_port.unwrap_or(defaults.master_port);
    validate_port(master_port, path)?;

    let excluded_hosts = raw.excluded_hosts.unwrap_or(defaults.excluded_hosts);
    if excluded_hosts.iter().any(|host| host.trim().is_empty()) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "rendezvous.excluded_hosts",
            message: "Host names must not be empty".into(),
        });
    }

    Ok(RendezvousSection {
        master_port,
        excluded_hosts,
    })
}

fn validate_port(port: u16, path: &Path) -> Result<(), ConfigError> {
    if port != 0 {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "rendezvous.master_port",
        message: "Use a port in the range 1-65535".into(),
    })
}
