use std::path::Path;

use tracing::{debug, info};

use super::{ConfigSource, LaunchConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: &Path, source: ConfigSource) {
    match source {
        ConfigSource::Cli => info!(
            target: "vae_launch::config",
            path = %path.display(),
            "Loading configuration named by --config"
        ),
        ConfigSource::Env => info!(
            target: "vae_launch::config",
            path = %path.display(),
            "Loading configuration using VAE_LAUNCH_CONFIG environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "vae_launch::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "VAE_LAUNCH_CONFIG not set; using default vae-launch.toml if present"
        ),
    }
}

pub fn log_defaults(path: &Path) {
    debug!(
        target: "vae_launch::config",
        path = %path.display(),
        "No configuration file found; using built-in defaults"
    );
}

pub fn log_loaded(config: &LaunchConfig) {
    info!(
        target: "vae_launch::config",
        path = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<built-in defaults>".to_string()),
        interpreter = %config.launcher.interpreter,
        script = %config.launcher.script,
        master_port = config.rendezvous.master_port,
        excluded_hosts = ?config.rendezvous.excluded_hosts,
        extra_env = config.environment.extra.len(),
        "Launcher configuration ready"
    );
}
