//! Uninstall service - removes exactly what a manifest recorded
//!
//! The manifest is deleted last and only after every recorded path was
//! handled, so an interrupted or partially failed uninstall can be rerun.

use crate::error::KitError;
use crate::models::{HookKind, ManifestFile, RejectedId, Target};
use anyhow::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Everything an uninstall will touch, in removal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    pub manifest_path: PathBuf,
    pub target: Target,
    /// Recorded skills, agents and hook/plugin files
    pub entries: Vec<PathBuf>,
    /// Generated hook subdirectories, removed whether recorded or not
    pub generated: Vec<PathBuf>,
    /// Directories removed if they end up empty
    pub prune: Vec<PathBuf>,
    /// Shared config files that may still reference the hooks
    pub shared_configs: Vec<PathBuf>,
    /// Identifiers refused as paths; each one keeps the manifest in place
    pub rejected: Vec<RejectedId>,
}

/// What actually happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub removed: Vec<PathBuf>,
    /// Recorded but already absent
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub pruned: Vec<PathBuf>,
    pub manifest_removed: bool,
}

impl RemovalOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.manifest_removed
    }
}

/// Build the removal plan for a manifest
pub fn plan_removal(file: &ManifestFile) -> Result<RemovalPlan> {
    let target = file.target()?;
    let base = file.base_dir();
    let manifest = &file.manifest;

    let entries = manifest
        .components(target, base)
        .into_iter()
        .map(|component| component.entry_path)
        .collect();

    let rejected = manifest.rejected_ids(target);
    let mut generated = Vec::new();
    let mut prune = vec![base.join("skills"), base.join("agents")];
    let mut shared_configs = Vec::new();

    if manifest.hooks {
        if let Some(kind) = target.hook_kind() {
            let hook_dir = base.join(kind.dir_name());
            generated.extend(HookKind::GENERATED_DIRS.iter().map(|name| hook_dir.join(name)));
            prune.push(hook_dir);
        }
        shared_configs.extend(
            target
                .shared_config_files()
                .iter()
                .map(|name| base.join(name))
                .filter(|path| path.exists()),
        );
    }

    Ok(RemovalPlan {
        manifest_path: file.path.clone(),
        target,
        entries,
        generated,
        prune,
        shared_configs,
        rejected,
    })
}

/// Execute a plan. Individual failures are collected, never fatal.
pub fn execute(plan: &RemovalPlan) -> RemovalOutcome {
    let mut outcome = RemovalOutcome::default();

    for rejected in &plan.rejected {
        tracing::warn!(manifest = %plan.manifest_path.display(), %rejected, "identifier rejected");
        outcome
            .failed
            .push((plan.manifest_path.clone(), rejected.to_string()));
    }

    for path in plan.entries.iter().chain(plan.generated.iter()) {
        match remove_path(path) {
            Ok(true) => {
                tracing::info!(path = %path.display(), "removed");
                outcome.removed.push(path.clone());
            }
            Ok(false) => outcome.skipped.push(path.clone()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "removal failed");
                outcome.failed.push((path.clone(), e.to_string()));
            }
        }
    }

    for dir in &plan.prune {
        if prune_if_empty(dir) {
            outcome.pruned.push(dir.clone());
        }
    }

    if outcome.failed.is_empty() {
        match remove_path(&plan.manifest_path) {
            Ok(_) => outcome.manifest_removed = true,
            Err(e) => outcome
                .failed
                .push((plan.manifest_path.clone(), e.to_string())),
        }
    }

    outcome
}

/// Execute and turn leftover failures into `PartialRemoval`
pub fn uninstall(file: &ManifestFile) -> Result<RemovalOutcome> {
    let plan = plan_removal(file)?;
    let outcome = execute(&plan);
    if !outcome.failed.is_empty() {
        return Err(KitError::PartialRemoval(outcome.failed.len()).into());
    }
    Ok(outcome)
}

/// Remove a file, symlink or directory tree. Ok(false) when already absent.
fn remove_path(path: &Path) -> std::io::Result<bool> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

fn prune_if_empty(dir: &Path) -> bool {
    let is_empty = match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => return false,
    };
    is_empty && std::fs::remove_dir(dir).is_ok()
}
