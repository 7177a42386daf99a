//! Doctor service - verifies manifest claims against the file system
//!
//! Read-only: nothing here creates, repairs or deletes files.

use crate::models::{ComponentKind, Manifest, ManifestFile, RejectedId, Target};
use std::path::{Path, PathBuf};

/// One component existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub kind: ComponentKind,
    pub id: String,
    pub path: PathBuf,
    pub passed: bool,
}

/// Result of verifying a single manifest
#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub path: PathBuf,
    pub manifest: Option<Manifest>,
    pub target: Option<Target>,
    pub checks: Vec<Check>,
    /// Identifiers that cannot name a path; one failure each
    pub rejected: Vec<RejectedId>,
    /// Manifest-level failure (unreadable, unknown target)
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl ManifestReport {
    fn failed_at(path: &Path, manifest: Option<Manifest>, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            manifest,
            target: None,
            checks: Vec::new(),
            rejected: Vec::new(),
            error: Some(error),
            warnings: Vec::new(),
        }
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Missing components, rejected identifiers, plus one for a
    /// manifest-level error
    pub fn failed(&self) -> usize {
        let missing = self.checks.iter().filter(|c| !c.passed).count();
        missing + self.rejected.len() + usize::from(self.error.is_some())
    }

    pub fn missing(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Aggregate over every verified manifest
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub manifests: Vec<ManifestReport>,
}

impl DoctorReport {
    pub fn passed(&self) -> usize {
        self.manifests.iter().map(ManifestReport::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.manifests.iter().map(ManifestReport::failed).sum()
    }

    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }
}

/// Verify one manifest file
pub fn check_manifest(path: &Path) -> ManifestReport {
    let file = match ManifestFile::load(path) {
        Ok(file) => file,
        Err(e) => return ManifestReport::failed_at(path, None, e.to_string()),
    };

    let target = match file.target() {
        Ok(target) => target,
        Err(e) => return ManifestReport::failed_at(path, Some(file.manifest), e.to_string()),
    };

    let checks = file
        .manifest
        .components(target, file.base_dir())
        .into_iter()
        .map(|component| {
            let passed = component.check_path.is_file();
            tracing::debug!(
                path = %component.check_path.display(),
                passed,
                "component check"
            );
            Check {
                kind: component.kind,
                id: component.id,
                path: component.check_path,
                passed,
            }
        })
        .collect();

    let rejected = file.manifest.rejected_ids(target);
    for id in &rejected {
        tracing::warn!(manifest = %path.display(), %id, "identifier rejected");
    }
    let warnings = hook_warnings(&file.manifest, target);

    ManifestReport {
        path: path.to_path_buf(),
        manifest: Some(file.manifest),
        target: Some(target),
        checks,
        rejected,
        error: None,
        warnings,
    }
}

fn hook_warnings(manifest: &Manifest, target: Target) -> Vec<String> {
    if !manifest.hooks {
        return Vec::new();
    }

    match target.hook_kind() {
        None => vec![format!("hooks recorded but {} has no hook support", target)],
        Some(kind) if manifest.hook_files(kind).is_empty() => {
            vec![format!("hooks enabled but no {} files recorded", kind.dir_name())]
        }
        Some(_) => Vec::new(),
    }
}

/// Verify every manifest, in order
pub fn run_checks(paths: &[PathBuf]) -> DoctorReport {
    DoctorReport {
        manifests: paths.iter().map(|path| check_manifest(path)).collect(),
    }
}
