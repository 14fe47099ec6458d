//! CLI entrypoint module structure.

pub mod args;
pub mod profile;

pub use args::{LaunchProfileArgs, PositionalArgs};
pub use profile::{resolve_config_path, LaunchProfile, PrintFormat};
