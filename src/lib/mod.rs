//! Shared library modules providing error types, shell quoting, the child command builder,
//! and telemetry initialization.

pub mod errors;
pub mod python;
pub mod shell;
pub mod telemetry;
