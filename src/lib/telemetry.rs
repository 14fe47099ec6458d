//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format operator logs on stderr.
///
/// Stdout is reserved for the printed command line.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of one training launch.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    launch_id: Uuid,
}

impl LaunchSpan {
    /// Start a launch span for the given rank.
    pub fn start(rank: &str, local_rank: &str) -> Self {
        let launch_id = Uuid::new_v4();
        let span = info_span!(
            target: "vae_launch::launch",
            "training_launch",
            %launch_id,
            rank,
            local_rank
        );
        Self {
            span,
            started_at: Instant::now(),
            launch_id,
        }
    }

    pub fn launch_id(&self) -> Uuid {
        self.launch_id
    }

    /// Enter the span for the duration of the returned guard.
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Close the span while recording status and exit info.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "vae_launch::launch",
            launch_id = %self.launch_id,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Training process finished"
        );
    }
}

/// Summary of a launch plan logged before the child starts.
#[derive(Debug, Serialize)]
pub struct LaunchPlanTelemetry<'a> {
    pub launch_id: Uuid,
    pub program: &'a str,
    pub world_size: &'a str,
    pub rank: &'a str,
    pub local_rank: &'a str,
    pub master_addr: &'a str,
    pub master_port: u16,
    pub arg_count: usize,
    pub dry_run: bool,
}

/// Emit the launch plan to `tracing`.
pub fn emit_launch_plan(telemetry: &LaunchPlanTelemetry<'_>) {
    info!(
        target: "vae_launch::launch",
        launch_id = %telemetry.launch_id,
        program = telemetry.program,
        world_size = telemetry.world_size,
        rank = telemetry.rank,
        local_rank = telemetry.local_rank,
        master_addr = telemetry.master_addr,
        master_port = telemetry.master_port,
        arg_count = telemetry.arg_count,
        dry_run = telemetry.dry_run,
        "Prepared training launch"
    );
}
