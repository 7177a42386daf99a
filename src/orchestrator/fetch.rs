//! Toolkit source resolution for self-update.
//!
//! A remote source is cloned into a scratch `TempDir` owned by the returned
//! `FetchedSource`; dropping it (on success or any error path) removes the
//! scratch directory.

use crate::error::KitError;
use crate::models::KitConfig;
use crate::ui::{progress, Ui};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where to take the new toolkit from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRequest {
    /// Existing checkout, used in place
    Local(PathBuf),
    /// Repository to clone at a branch or tag
    Remote { url: String, reference: String },
}

impl SourceRequest {
    /// Local directory wins; otherwise the given (or configured) repository
    pub fn resolve(
        local: Option<PathBuf>,
        repo: Option<String>,
        reference: Option<String>,
        config: &KitConfig,
    ) -> Self {
        match local {
            Some(dir) => SourceRequest::Local(dir),
            None => SourceRequest::Remote {
                url: repo.unwrap_or_else(|| config.repo_url.clone()),
                reference: reference.unwrap_or_else(|| config.repo_ref.clone()),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceRequest::Local(dir) => dir.display().to_string(),
            SourceRequest::Remote { url, reference } => format!("{}@{}", url, reference),
        }
    }
}

/// A resolved toolkit source directory
#[derive(Debug)]
pub struct FetchedSource {
    dir: PathBuf,
    scratch: Option<TempDir>,
}

impl FetchedSource {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scratch directory, present only for cloned sources
    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    /// Remove the scratch directory, reporting failures
    pub fn cleanup(self) -> Result<()> {
        if let Some(scratch) = self.scratch {
            let path = scratch.path().to_path_buf();
            scratch
                .close()
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            tracing::debug!(path = %path.display(), "scratch directory removed");
        }
        Ok(())
    }

    /// Check that the source carries both entry points
    pub fn validate(&self, config: &KitConfig) -> Result<()> {
        for entry in [&config.cli_entry, &config.installer] {
            if !self.dir.join(entry).is_file() {
                return Err(KitError::InvalidSource {
                    dir: self.dir.clone(),
                    missing: entry.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Version declared by the source's `VERSION` file
    pub fn version(&self) -> Option<String> {
        std::fs::read_to_string(self.dir.join("VERSION"))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Resolve a source, cloning into a scratch directory under the system temp dir
pub fn fetch(request: &SourceRequest, ui: &Ui) -> Result<FetchedSource> {
    fetch_in(request, &std::env::temp_dir(), ui)
}

/// Resolve a source, creating any scratch directory inside `scratch_parent`
pub fn fetch_in(request: &SourceRequest, scratch_parent: &Path, ui: &Ui) -> Result<FetchedSource> {
    match request {
        SourceRequest::Local(dir) => {
            if !dir.is_dir() {
                return Err(KitError::InvalidSource {
                    dir: dir.clone(),
                    missing: "directory".to_string(),
                }
                .into());
            }
            Ok(FetchedSource {
                dir: dir.clone(),
                scratch: None,
            })
        }
        SourceRequest::Remote { url, reference } => {
            let scratch = tempfile::Builder::new()
                .prefix("skillkit-update-")
                .tempdir_in(scratch_parent)
                .context("Failed to create scratch directory")?;
            let dir = scratch.path().join("skillkit");
            tracing::debug!(scratch = %scratch.path().display(), "scratch directory created");

            let pb = progress::spinner(ui, format!("Cloning {}@{}...", url, reference));
            let cloned = git2::build::RepoBuilder::new()
                .branch(reference)
                .clone(url, &dir);
            progress::finish(pb);

            if let Err(e) = cloned {
                // scratch drops here
                return Err(KitError::Fetch {
                    locator: format!("{}@{}", url, reference),
                    reason: e.message().to_string(),
                }
                .into());
            }

            Ok(FetchedSource {
                dir,
                scratch: Some(scratch),
            })
        }
    }
}
