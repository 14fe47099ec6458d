use std::process::ExitCode;

use anyhow::Error;

use crate::{
    cli::LaunchProfile,
    config::LaunchConfig,
    lib::{
        errors::LaunchError,
        telemetry::{self, LaunchPlanTelemetry, LaunchSpan},
    },
};

use super::{build_launch_plan, executor, hostfile, LaunchOutcome, SchedulerEnv};

/// Bundles a launcher error message with the exit code to report.
#[derive(Debug)]
pub struct LaunchExit {
    message: String,
    exit_code: ExitCode,
}

impl LaunchExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert the child's exit code into the launcher's own.
pub fn outcome_exit_code(outcome: LaunchOutcome) -> ExitCode {
    ExitCode::from(outcome_exit_status(outcome))
}

/// Exit status byte for `outcome`; codes outside `0..=255` collapse to 1.
pub fn outcome_exit_status(outcome: LaunchOutcome) -> u8 {
    u8::try_from(outcome.exit_code()).unwrap_or(1)
}

/// Span status for a launch that ended in `err`.
fn failure_status(err: &LaunchError) -> &'static str {
    match err {
        LaunchError::Wait { .. } => "wait_failed",
        _ => "not_started",
    }
}

/// Read the scheduler environment, build the plan, print it and run it.
pub async fn run_launch(
    profile: LaunchProfile,
    config: LaunchConfig,
) -> Result<LaunchOutcome, LaunchExit> {
    let scheduler = SchedulerEnv::from_env(&config.scheduler).map_err(LaunchExit::from_error)?;
    let span = LaunchSpan::start(&scheduler.rank, &scheduler.local_rank);

    let plan = {
        let _entered = span.enter();
        let master_addr =
            hostfile::read_master_addr(&scheduler.hostfile, &config.rendezvous.excluded_hosts)
                .map_err(LaunchExit::from_error)?;
        let plan = build_launch_plan(&profile.params, &scheduler, &master_addr, &config);

        telemetry::emit_launch_plan(&LaunchPlanTelemetry {
            launch_id: span.launch_id(),
            program: &plan.program,
            world_size: &scheduler.world_size,
            rank: &scheduler.rank,
            local_rank: &scheduler.local_rank,
            master_addr: &master_addr,
            master_port: config.rendezvous.master_port,
            arg_count: plan.args.len(),
            dry_run: profile.dry_run,
        });
        plan
    };

    match executor::run(&plan, profile.format, profile.dry_run).await {
        Ok(outcome) => {
            let status = match outcome {
                LaunchOutcome::Planned => "planned",
                LaunchOutcome::Exited(0) => "succeeded",
                LaunchOutcome::Exited(_) => "failed",
            };
            let exit_code = match outcome {
                LaunchOutcome::Planned => None,
                LaunchOutcome::Exited(code) => Some(code),
            };
            span.finish(status, exit_code);
            Ok(outcome)
        }
        Err(err) => {
            span.finish(failure_status(&err), None);
            Err(LaunchExit::from_error(err))
        }
    }
}
