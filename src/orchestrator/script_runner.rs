use anyhow::{Context, Result};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Runner for external toolkit scripts (installer, fetched CLI)
#[derive(Default)]
pub struct ScriptRunner {}

impl ScriptRunner {
    pub fn new() -> Self {
        Self {}
    }

    /// Run `program` with `args` from `cwd`, streaming its output to ours.
    ///
    /// # Arguments
    /// * `program` - Script or binary to execute
    /// * `args` - Arguments, already mapped to CLI strings
    /// * `cwd` - Working directory for the child
    /// * `env` - Extra environment variables
    pub async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: &Path,
        env: &[(&str, &Path)],
    ) -> Result<ExitStatus> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        for (key, value) in env {
            cmd.env(key, value);
        }

        tracing::debug!(
            program = %program.display(),
            cwd = %cwd.display(),
            args = ?args,
            "spawning"
        );

        let status = cmd
            .status()
            .await
            .with_context(|| format!("Failed to run '{}'", program.display()))?;

        tracing::debug!(%status, "child exited");
        Ok(status)
    }
}
