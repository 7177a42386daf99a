//! Update orchestration
//!
//! Rebuilds the installer invocation that reproduces a manifest's
//! component selection and re-runs it from the original install root.
//! Flags come from component counts, not identities: the installer decides
//! which skills exist in the new version, the manifest only records intent.

use super::installer::{build_args, Installer, InstallerArg};
use crate::error::KitError;
use crate::models::{ManifestFile, Scope, Target};
use crate::ui::Ui;
use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    pub dry_run: bool,
    /// Overwrite installed files (default for update)
    pub force: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            force: true,
        }
    }
}

/// A ready-to-run installer invocation for one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub manifest_path: PathBuf,
    pub target: Target,
    pub args: Vec<InstallerArg>,
    pub workdir: PathBuf,
}

impl UpdatePlan {
    pub fn command_line(&self) -> String {
        build_args(&self.args).join(" ")
    }
}

/// Installer arguments reproducing the manifest's selection
pub fn installer_args(
    file: &ManifestFile,
    target: Target,
    options: UpdateOptions,
) -> Vec<InstallerArg> {
    let manifest = &file.manifest;
    let mut args = vec![InstallerArg::Target(target)];

    if manifest.skills.is_empty() {
        args.push(InstallerArg::NoSkills);
    }
    if manifest.agents.is_empty() {
        args.push(InstallerArg::NoAgents);
    }
    if !manifest.hooks {
        args.push(InstallerArg::NoHooks);
    }
    if options.dry_run {
        args.push(InstallerArg::DryRun);
    }
    args.push(if options.force {
        InstallerArg::Force
    } else {
        InstallerArg::NoForce
    });

    args
}

/// Build the plan for one manifest.
///
/// Fails on an unknown target tag, or when the resolved install root is
/// gone; a missing root means the project moved and re-installing there
/// would create an unrelated installation.
pub fn plan(file: &ManifestFile, options: UpdateOptions, home: Option<&Path>) -> Result<UpdatePlan> {
    let target = file.target()?;
    let args = installer_args(file, target, options);

    let workdir = match home {
        Some(home) => target.resolve_root(&file.target_path(), home),
        None if target.scope() == Scope::Global => {
            return Err(KitError::MissingWorkdir(PathBuf::from("~")).into());
        }
        None => target.resolve_root(&file.target_path(), Path::new("")),
    };

    if !workdir.is_dir() {
        return Err(KitError::MissingWorkdir(workdir).into());
    }

    Ok(UpdatePlan {
        manifest_path: file.path.clone(),
        target,
        args,
        workdir,
    })
}

/// Load, plan and run the update for a single manifest
pub async fn update_one(
    manifest_path: &Path,
    installer: &Installer,
    options: UpdateOptions,
    home: Option<&Path>,
    ui: &Ui,
) -> Result<UpdatePlan> {
    let file = ManifestFile::load(manifest_path)?;
    let plan = plan(&file, options, home)?;

    ui.info(&format!(
        "Updating {} ({}) from {}",
        plan.target,
        file.manifest.version,
        plan.workdir.display()
    ));
    println!("   {} {}", installer.program.display(), plan.command_line());
    tracing::info!(
        manifest = %manifest_path.display(),
        args = %plan.command_line(),
        "running installer"
    );

    installer.run(&plan.args, &plan.workdir).await?;
    Ok(plan)
}

/// Update every manifest in order.
///
/// Each failure is reported and counted; processing continues with the
/// next manifest. The result is an error if any manifest failed.
pub async fn update_all(
    manifest_paths: &[PathBuf],
    installer: &Installer,
    options: UpdateOptions,
    home: Option<&Path>,
    ui: &Ui,
) -> Result<()> {
    let mut failed = 0;

    for path in manifest_paths {
        match update_one(path, installer, options, home, ui).await {
            Ok(plan) => ui.success(&format!("Updated {}", plan.manifest_path.display())),
            Err(e) => {
                failed += 1;
                ui.error(&format!("{}: {}", path.display(), e));
            }
        }
    }

    if failed > 0 {
        return Err(KitError::UpdateFailed {
            failed,
            total: manifest_paths.len(),
        }
        .into());
    }
    Ok(())
}
