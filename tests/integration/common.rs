use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_vae-launch");

/// The positional arguments a job script would pass, checkpoint omitted.
pub const POSITIONALS: [&str; 14] = [
    "/gpfs/alpine/med110/fs-pep/cm.h5",
    "/gpfs/alpine/med110/runs",
    "vae-fs-pep",
    "sparse-concat",
    "resnet",
    "22",
    "22",
    "10",
    "amp",
    "distributed",
    "128",
    "5",
    "20",
    "adam",
];

/// Stand-in for the training script: records its argv and rendezvous variables, then exits
/// with `$STUB_EXIT_CODE`.
const STUB_SCRIPT: &str = r#"out="$STUB_OUTPUT"
for arg in "$@"; do
  printf 'arg=%s\n' "$arg" >> "$out"
done
printf 'WORLD_SIZE=%s\n' "$WORLD_SIZE" >> "$out"
printf 'RANK=%s\n' "$RANK" >> "$out"
printf 'LOCAL_RANK=%s\n' "$LOCAL_RANK" >> "$out"
printf 'MASTER_ADDR=%s\n' "$MASTER_ADDR" >> "$out"
printf 'MASTER_PORT=%s\n' "$MASTER_PORT" >> "$out"
printf 'LC_ALL=%s\n' "$LC_ALL" >> "$out"
printf 'WANDB_MODE=%s\n' "$WANDB_MODE" >> "$out"
exit "${STUB_EXIT_CODE:-0}"
"#;

/// Temporary job directory with a host file, stub script and launcher config.
pub struct JobSandbox {
    pub dir: TempDir,
}

impl JobSandbox {
    pub fn new(hosts: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create job sandbox")?;
        fs::write(dir.path().join("lsf.hosts"), hosts).context("failed to write host file")?;
        fs::write(dir.path().join("train_stub.sh"), STUB_SCRIPT)
            .context("failed to write stub script")?;

        let config = format!(
            "[launcher]\ninterpreter = \"/bin/sh\"\nscript = \"{script}\"\nunbuffered = false\n",
            script = dir.path().join("train_stub.sh").display()
        );
        fs::write(dir.path().join("vae-launch.toml"), config).context("failed to write config")?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path("stub.out")
    }

    /// Launcher command with a complete LSF/OpenMPI environment for rank 5 of 6.
    pub fn command(&self) -> Command {
        let mut command = Command::new(BINARY_PATH);
        command
            .current_dir(self.dir.path())
            .env("VAE_LAUNCH_CONFIG", self.path("vae-launch.toml"))
            .env("OMPI_COMM_WORLD_SIZE", "6")
            .env("OMPI_COMM_WORLD_RANK", "5")
            .env("OMPI_COMM_WORLD_LOCAL_RANK", "2")
            .env("LSB_DJOB_HOSTFILE", self.path("lsf.hosts"))
            .env("STUB_OUTPUT", self.output_path())
            .env("RUST_LOG", "warn");
        command
    }

    pub fn read_output(&self) -> Result<Vec<String>> {
        read_lines(&self.output_path())
    }
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
