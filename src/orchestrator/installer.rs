//! Installer invocation
//!
//! Maps install intent to the installer's CLI flags and runs it. The
//! installer itself (file copying, manifest writing) is external.

use super::script_runner::ScriptRunner;
use crate::error::KitError;
use crate::models::{KitConfig, Target};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Installer CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerArg {
    /// Target selector (mutually exclusive)
    Target(Target),
    NoSkills,
    NoAgents,
    NoHooks,
    DryRun,
    /// Overwrite existing files
    Force,
    NoForce,
}

impl InstallerArg {
    pub fn to_cli(&self) -> &'static str {
        match self {
            InstallerArg::Target(target) => target.flag(),
            InstallerArg::NoSkills => "--no-skills",
            InstallerArg::NoAgents => "--no-agents",
            InstallerArg::NoHooks => "--no-hooks",
            InstallerArg::DryRun => "--dry-run",
            InstallerArg::Force => "--force",
            InstallerArg::NoForce => "--no-force",
        }
    }
}

/// Map arguments to CLI strings
pub fn build_args(args: &[InstallerArg]) -> Vec<String> {
    args.iter().map(|arg| arg.to_cli().to_string()).collect()
}

/// Handle on a toolkit checkout's installer entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    pub toolkit_home: PathBuf,
    pub program: PathBuf,
}

impl Installer {
    pub fn new(toolkit_home: impl Into<PathBuf>, config: &KitConfig) -> Self {
        let toolkit_home = toolkit_home.into();
        let program = toolkit_home.join(&config.installer);
        Self {
            toolkit_home,
            program,
        }
    }

    /// Locate the installer.
    ///
    /// Order: explicit `--home`, configured/env toolkit home, then the
    /// running executable's directory and its parent.
    pub fn locate(home_override: Option<&Path>, config: &KitConfig) -> Result<Self> {
        let explicit = home_override
            .map(Path::to_path_buf)
            .or_else(|| config.toolkit_home.clone());

        if let Some(home) = explicit {
            let installer = Self::new(home, config);
            installer.ensure_present()?;
            return Ok(installer);
        }

        let exe = std::env::current_exe()?;
        for dir in exe.ancestors().skip(1).take(2) {
            if dir.join(&config.installer).is_file() {
                return Ok(Self::new(dir, config));
            }
        }

        let fallback = exe
            .parent()
            .map(|dir| dir.join(&config.installer))
            .unwrap_or_else(|| PathBuf::from(&config.installer));
        Err(KitError::InstallerMissing(fallback).into())
    }

    pub fn ensure_present(&self) -> Result<()> {
        if self.program.is_file() {
            Ok(())
        } else {
            Err(KitError::InstallerMissing(self.program.clone()).into())
        }
    }

    /// Run the installer from `cwd` with raw CLI arguments
    pub async fn run_raw(&self, args: &[String], cwd: &Path) -> Result<()> {
        let status = ScriptRunner::new()
            .run(
                &self.program,
                args,
                cwd,
                &[("SKILLKIT_HOME", self.toolkit_home.as_path())],
            )
            .await?;

        if !status.success() {
            return Err(KitError::InstallerFailed(status.to_string()).into());
        }
        Ok(())
    }

    pub async fn run(&self, args: &[InstallerArg], cwd: &Path) -> Result<()> {
        self.run_raw(&build_args(args), cwd).await
    }
}
