use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_INTERPRETER: &str = "python";
pub const DEFAULT_SCRIPT: &str = "examples/example_vae.py";

/// Interpreter and training script invoked for each rank.
#[derive(Debug, Clone)]
pub struct LauncherSection {
    pub interpreter: String,
    pub script: String,
    /// Pass `-u` so rank output is not block-buffered behind `jsrun`/`mpirun`.
    pub unbuffered: bool,
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            unbuffered: true,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLauncherSection {
    pub interpreter: Option<String>,
    pub script: Option<String>,
    pub unbuffered: Option<bool>,
}

pub fn parse_launcher_section(
    raw: Option<RawLauncherSection>,
    path: &Path,
) -> Result<LauncherSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = LauncherSection::default();

    let interpreter = raw.interpreter.unwrap_or(defaults.interpreter);
    require_non_blank(&interpreter, "launcher.interpreter", path)?;
    let script = raw.script.unwrap_or(defaults.script);
    require_non_blank(&script, "launcher.script", path)?;

    Ok(LauncherSection {
        interpreter,
        script,
        unbuffered: raw.unbuffered.unwrap_or(defaults.unbuffered),
    })
}

/// Shared check for string fields that must carry a value.
pub(crate) fn require_non_blank(
    value: &str,
    field: &'static str,
    path: &Path,
) -> Result<(), ConfigError> {
    if !value.trim().is_empty() {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: "Value must not be empty".into(),
    })
}
