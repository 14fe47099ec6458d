//! Entry point for vae-launch.
use std::process::ExitCode;

use clap::Parser;
use vae_launch::{
    cli::{LaunchProfile, LaunchProfileArgs},
    config::LaunchConfig,
    launch::{self, LaunchExit},
    lib::telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(code) => code,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<ExitCode, LaunchExit> {
    telemetry::init_tracing().map_err(LaunchExit::from_error)?;
    let args = match LaunchProfileArgs::try_parse() {
        Ok(args) => args,
        // --help and --version arrive as errors that belong on stdout.
        Err(err) if !err.use_stderr() => {
            err.print().map_err(LaunchExit::from_error)?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(LaunchExit::from_error(err)),
    };
    let profile = args.build().map_err(LaunchExit::from_error)?;
    run(profile).await
}

async fn run(profile: LaunchProfile) -> Result<ExitCode, LaunchExit> {
    let config = LaunchConfig::load(profile.config_path.clone(), profile.config_source)
        .map_err(LaunchExit::from_error)?;
    let outcome = launch::run_launch(profile, config).await?;
    Ok(launch::outcome_exit_code(outcome))
}
