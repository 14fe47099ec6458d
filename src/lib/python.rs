//! Shared helpers for building the training interpreter command.

use std::{collections::BTreeMap, process::Stdio};

use tokio::process::Command;

pub struct TrainingCommandRequest<'a> {
    pub program: &'a str,
    pub args: &'a [String],
    pub env: &'a BTreeMap<String, String>,
}

/// Build the interpreter command for one training rank.
///
/// The child inherits the launcher's environment and stdio; `env` is layered on top.
pub fn build_training_command(request: TrainingCommandRequest<'_>) -> Command {
    let mut command = Command::new(request.program);
    command.kill_on_drop(true);
    command.args(request.args);
    for (key, value) in request.env {
        command.env(key, value);
    }
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}
