//! Launch configurator: scheduler environment and positional parameters in, one training
//! process out.

pub mod executor;
pub mod hostfile;
pub mod params;
pub mod plan;
pub mod scheduler;
pub mod startup;

pub use executor::{exit_code_from_status, print_plan, LaunchOutcome};
pub use hostfile::{read_master_addr, resolve_master_addr};
pub use params::InvocationParams;
pub use plan::{build_launch_plan, LaunchPlan};
pub use scheduler::SchedulerEnv;
pub use startup::{outcome_exit_code, outcome_exit_status, run_launch, LaunchExit};
