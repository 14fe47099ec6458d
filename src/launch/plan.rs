//! Pure translation of invocation parameters and scheduler values into a launch plan.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{config::LaunchConfig, lib::shell};

use super::{params::InvocationParams, scheduler::SchedulerEnv};

/// Fully resolved child invocation: program, argument vector and exported variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl LaunchPlan {
    /// Shell-quoted command line, as printed before execution.
    pub fn command_line(&self) -> String {
        shell::join(
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)),
        )
    }

    /// Value following `flag`, if the flag is present with a value.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|index| self.args.get(index + 1))
            .map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }
}

/// Build the launch plan. Performs no I/O.
pub fn build_launch_plan(
    params: &InvocationParams,
    scheduler: &SchedulerEnv,
    master_addr: &str,
    config: &LaunchConfig,
) -> LaunchPlan {
    LaunchPlan {
        program: config.launcher.interpreter.clone(),
        args: build_args(params, scheduler, config),
        env: build_env(scheduler, master_addr, config),
    }
}

fn build_args(
    params: &InvocationParams,
    scheduler: &SchedulerEnv,
    config: &LaunchConfig,
) -> Vec<String> {
    let training = &config.training;
    let mut args = Vec::with_capacity(40);
    if config.launcher.unbuffered {
        args.push("-u".to_string());
    }
    args.push(config.launcher.script.clone());

    let mut flag = |name: &str, value: String| {
        args.push(name.to_string());
        args.push(value);
    };
    flag("--input", params.data_dir.clone());
    flag("--out", params.out_dir.clone());
    flag("--model_prefix", params.model_id.clone());
    flag("--cm_format", params.cm_format.clone());
    flag("--model_type", params.model_type.clone());
    flag("--epochs", params.epochs.to_string());
    flag("--batch_size", params.batch_size.clone());
    flag("--encoder_gpu", scheduler.local_rank.clone());
    flag("--decoder_gpu", scheduler.local_rank.clone());
    flag(
        "--optimizer",
        optimizer_spec(&params.optimizer, &training.optimizer_lr),
    );
    if let Some(checkpoint) = params.checkpoint() {
        flag("--checkpoint", checkpoint.to_string());
    }
    flag("--sample_interval", params.sample_interval.clone());
    flag("--tsne_interval", params.total_iterations().to_string());
    flag("--dim1", params.height.clone());
    flag("--dim2", params.width.clone());
    flag("--latent_dim", params.latent_dim.clone());
    if let Some(workers) = training.data_workers {
        flag("--num_data_workers", workers.to_string());
    }
    if let Some(project) = &training.wandb_project {
        flag("--wandb_project_name", project.clone());
    }

    if params.amp_enabled(&training.amp_token) {
        args.push("--amp".to_string());
    }
    if params.distributed_enabled(&training.distributed_token) {
        args.push("--distributed".to_string());
    }
    args
}

fn build_env(
    scheduler: &SchedulerEnv,
    master_addr: &str,
    config: &LaunchConfig,
) -> BTreeMap<String, String> {
    let environment = &config.environment;
    let mut env = BTreeMap::new();
    env.insert("WORLD_SIZE".to_string(), scheduler.world_size.clone());
    env.insert("RANK".to_string(), scheduler.rank.clone());
    env.insert("LOCAL_RANK".to_string(), scheduler.local_rank.clone());
    env.insert(
        "MASTER_PORT".to_string(),
        config.rendezvous.master_port.to_string(),
    );
    env.insert("MASTER_ADDR".to_string(), master_addr.to_string());
    env.insert("LC_ALL".to_string(), environment.locale.clone());
    env.insert("LANG".to_string(), environment.locale.clone());
    env.insert("WANDB_MODE".to_string(), environment.wandb_mode.clone());
    for (key, value) in &environment.extra {
        env.entry(key.clone()).or_insert_with(|| value.clone());
    }
    env
}

/// The training script expects `name=<optimizer>,lr=<rate>`; a bare name gets the configured rate.
fn optimizer_spec(optimizer: &str, default_lr: &str) -> String {
    if optimizer.contains('=') {
        optimizer.to_string()
    } else {
        format!("name={optimizer},lr={default_lr}")
    }
}
