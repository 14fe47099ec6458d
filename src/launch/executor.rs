use std::{
    io::{self, Write},
    process::ExitStatus,
};

use tracing::{debug, info, warn};

use crate::{
    cli::PrintFormat,
    lib::{errors::LaunchError, python as python_helpers},
};

use super::plan::LaunchPlan;

/// Exit code reported when the child status carries neither a code nor a signal.
const UNKNOWN_EXIT_CODE: i32 = 1;

/// How a launch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// `--dry-run`: the plan was printed and nothing was started.
    Planned,
    /// The training process ran and exited with this code.
    Exited(i32),
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Planned => 0,
            LaunchOutcome::Exited(code) => *code,
        }
    }
}

/// Print the plan to stdout, then run it unless `dry_run` is set.
pub async fn run(
    plan: &LaunchPlan,
    format: PrintFormat,
    dry_run: bool,
) -> Result<LaunchOutcome, LaunchError> {
    print_plan(plan, format, &mut io::stdout().lock())
        .map_err(|source| LaunchError::Print { source })?;

    for (key, value) in &plan.env {
        debug!(target: "vae_launch::launch", key = %key, value = %value, "Exporting variable");
    }

    if dry_run {
        info!(target: "vae_launch::launch", "Dry run; training process not started");
        return Ok(LaunchOutcome::Planned);
    }

    let mut command =
        python_helpers::build_training_command(python_helpers::TrainingCommandRequest {
            program: &plan.program,
            args: &plan.args,
            env: &plan.env,
        });

    let mut child = command.spawn().map_err(|source| LaunchError::Spawn {
        program: plan.program.clone(),
        source,
    })?;
    info!(
        target: "vae_launch::launch",
        pid = child.id(),
        program = %plan.program,
        "Started training process"
    );

    let status = child.wait().await.map_err(|source| LaunchError::Wait {
        program: plan.program.clone(),
        source,
    })?;
    let code = exit_code_from_status(status);
    if code != 0 {
        warn!(target: "vae_launch::launch", exit_code = code, "Training process failed");
    }
    Ok(LaunchOutcome::Exited(code))
}

/// Write the plan in the requested format, followed by a newline.
pub fn print_plan(plan: &LaunchPlan, format: PrintFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        PrintFormat::Text => writeln!(out, "{}", plan.command_line())?,
        PrintFormat::Json => {
            let payload = serde_json::json!({
                "command_line": plan.command_line(),
                "program": plan.program,
                "args": plan.args,
                "env": plan.env,
            });
            let rendered = serde_json::to_string_pretty(&payload).map_err(io::Error::from)?;
            writeln!(out, "{rendered}")?;
        }
    }
    out.flush()
}

/// Map a child status to the code a shell would report for it.
pub fn exit_code_from_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}
