use anyhow::Result;

use crate::common::{stderr_of, stdout_of, JobSandbox, POSITIONALS};

#[test]
fn missing_local_rank_fails_before_launch() -> Result<()> {
    let sandbox = JobSandbox::new("batch\nh03n15\n")?;

    let output = sandbox
        .command()
        .env_remove("OMPI_COMM_WORLD_LOCAL_RANK")
        .args(POSITIONALS)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("OMPI_COMM_WORLD_LOCAL_RANK"), "{stderr}");
    assert!(output.stdout.is_empty(), "no command may be printed");
    assert!(!sandbox.output_path().exists());
    Ok(())
}

#[test]
fn host_file_with_only_batch_node_is_rejected() -> Result<()> {
    let sandbox = JobSandbox::new("batch\nbatch\n")?;

    let output = sandbox.command().args(POSITIONALS).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("no eligible host"));
    assert!(!sandbox.output_path().exists());
    Ok(())
}

#[test]
fn unreadable_host_file_is_reported() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;

    let output = sandbox
        .command()
        .env("LSB_DJOB_HOSTFILE", sandbox.path("does-not-exist.hosts"))
        .args(POSITIONALS)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Failed to read host file"));
    Ok(())
}

#[test]
fn missing_interpreter_is_reported() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;
    let config = sandbox.path("broken.toml");
    std::fs::write(
        &config,
        "[launcher]\ninterpreter = \"/nonexistent/bin/python\"\n",
    )?;

    let output = sandbox
        .command()
        .arg("--config")
        .arg(&config)
        .args(POSITIONALS)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Failed to start `/nonexistent/bin/python`"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;
    let config = sandbox.path("broken.toml");
    std::fs::write(&config, "[rendezvous]\nmaster_port = 0\n")?;

    let output = sandbox
        .command()
        .env("VAE_LAUNCH_CONFIG", &config)
        .args(POSITIONALS)
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("rendezvous.master_port"));
    Ok(())
}

#[test]
fn non_numeric_epochs_exit_with_launcher_failure() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;
    let mut positionals = POSITIONALS;
    positionals[11] = "five";

    let output = sandbox.command().args(positionals).output()?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("'five'"), "{stderr}");
    assert!(stderr.contains("EPOCHS"), "{stderr}");
    assert!(output.stdout.is_empty(), "no command may be printed");
    assert!(!sandbox.output_path().exists());
    Ok(())
}

#[test]
fn missing_positionals_exit_with_launcher_failure() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;

    let output = sandbox.command().args(&POSITIONALS[..10]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("BATCH_SIZE"));
    Ok(())
}

#[test]
fn help_is_printed_to_stdout_with_success() -> Result<()> {
    let sandbox = JobSandbox::new("h03n15\n")?;

    let output = sandbox.command().arg("--help").output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("--dry-run"));
    Ok(())
}
