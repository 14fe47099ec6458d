//! Master address resolution from the scheduler host file.
use std::{collections::BTreeSet, fs, path::Path};

use tracing::info;

use crate::lib::errors::LaunchError;

/// Pick the rendezvous host: the alphabetically first distinct host name that is not excluded.
///
/// Every rank reads the same file, so every rank agrees on the result.
pub fn resolve_master_addr(contents: &str, excluded: &[String]) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .filter(|host| !excluded.iter().any(|skip| skip.as_str() == *host))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .next()
        .map(str::to_string)
}

/// Read `path` and resolve the master address from it.
pub fn read_master_addr(path: &Path, excluded: &[String]) -> Result<String, LaunchError> {
    let contents = fs::read_to_string(path).map_err(|source| LaunchError::HostFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let master_addr =
        resolve_master_addr(&contents, excluded).ok_or_else(|| LaunchError::NoEligibleHost {
            path: path.to_path_buf(),
            excluded: excluded.to_vec(),
        })?;

    info!(
        target: "vae_launch::hostfile",
        hostfile = %path.display(),
        master_addr = %master_addr,
        "Resolved master address"
    );
    Ok(master_addr)
}
