use anyhow::Result;
use serde_json::Value;

use crate::common::{stderr_of, stdout_of, JobSandbox, POSITIONALS};

const HOSTS: &str = "batch\nh41n09\nh41n09\nh03n15\nh03n15\n";

#[test]
fn dry_run_prints_command_without_starting_training() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;

    let output = sandbox.command().arg("--dry-run").args(POSITIONALS).output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    let line = stdout.trim_end();
    assert!(line.starts_with("/bin/sh "), "{line}");
    assert!(line.contains(" --encoder_gpu 2 --decoder_gpu 2 "), "{line}");
    assert!(line.contains(" --epochs 5 "), "{line}");
    assert!(line.contains(" --tsne_interval 6 "), "{line}");
    assert!(line.contains(" --optimizer name=adam,lr=1e-4 "), "{line}");
    assert!(line.ends_with(" --amp --distributed"), "{line}");
    assert!(!line.contains("--checkpoint"), "{line}");
    assert!(
        !sandbox.output_path().exists(),
        "dry run must not start the training script"
    );
    Ok(())
}

#[test]
fn run_exports_rendezvous_environment_and_flags() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;

    let output = sandbox
        .command()
        .args(POSITIONALS)
        .arg("/gpfs/alpine/med110/runs/checkpoint/epoch-3.pt")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let lines = sandbox.read_output()?;
    for expected in [
        "WORLD_SIZE=6",
        "RANK=5",
        "LOCAL_RANK=2",
        "MASTER_ADDR=h03n15",
        "MASTER_PORT=29500",
        "LC_ALL=en_US.utf-8",
        "WANDB_MODE=dryrun",
    ] {
        assert!(
            lines.iter().any(|line| line == expected),
            "missing {expected}: {lines:?}"
        );
    }

    let args: Vec<&str> = lines
        .iter()
        .filter_map(|line| line.strip_prefix("arg="))
        .collect();
    let checkpoint = args
        .iter()
        .position(|arg| *arg == "--checkpoint")
        .and_then(|index| args.get(index + 1));
    assert_eq!(
        checkpoint,
        Some(&"/gpfs/alpine/med110/runs/checkpoint/epoch-3.pt")
    );
    assert_eq!(args.first(), Some(&"--input"));
    assert_eq!(args.last(), Some(&"--distributed"));

    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("--checkpoint /gpfs/alpine/med110/runs/checkpoint/epoch-3.pt"),
        "command line must be printed before running: {stdout}"
    );
    Ok(())
}

#[test]
fn training_exit_code_is_forwarded() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;

    let output = sandbox
        .command()
        .env("STUB_EXIT_CODE", "3")
        .args(POSITIONALS)
        .output()?;

    assert_eq!(output.status.code(), Some(3), "stderr: {}", stderr_of(&output));
    Ok(())
}

#[test]
fn disabled_tokens_omit_optional_flags() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;
    let mut positionals = POSITIONALS;
    positionals[8] = "noamp";
    positionals[9] = "single";

    let output = sandbox
        .command()
        .arg("--dry-run")
        .args(positionals)
        .arg("")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("--amp"), "{stdout}");
    assert!(!stdout.contains("--distributed"), "{stdout}");
    assert!(!stdout.contains("--checkpoint"), "{stdout}");
    Ok(())
}

#[test]
fn json_format_describes_plan() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;

    let output = sandbox
        .command()
        .args(["--dry-run", "--print-format", "json"])
        .args(POSITIONALS)
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["program"], "/bin/sh");
    assert_eq!(payload["env"]["MASTER_ADDR"], "h03n15");
    assert_eq!(payload["env"]["MASTER_PORT"], "29500");
    assert_eq!(payload["env"]["LANG"], "en_US.utf-8");
    assert!(payload["command_line"]
        .as_str()
        .is_some_and(|line| line.ends_with("--amp --distributed")));
    Ok(())
}

#[test]
fn hyphen_leading_model_id_is_forwarded_verbatim() -> Result<()> {
    let sandbox = JobSandbox::new(HOSTS)?;
    let mut positionals = POSITIONALS;
    positionals[2] = "-vae";

    let output = sandbox
        .command()
        .arg("--dry-run")
        .args(positionals)
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.contains(" --model_prefix -vae "), "{stdout}");
    Ok(())
}
