//! Manifest discovery
//!
//! Finds installation manifests either at one explicit location or across
//! every target's conventional directory, producing an ordered,
//! de-duplicated set of absolute manifest paths.

mod selector;

pub use selector::{select, select_with};

use crate::models::{Scope, Target, MANIFEST_FILENAME};
use std::path::{Path, PathBuf};

/// Anchors for the default candidate list
#[derive(Debug, Clone)]
pub struct SearchRoots {
    /// Project root for project-scoped targets (normally the cwd)
    pub project: PathBuf,
    /// User home for global targets; global candidates are skipped when unknown
    pub home: Option<PathBuf>,
}

impl SearchRoots {
    pub fn from_env() -> std::io::Result<Self> {
        Ok(Self {
            project: std::env::current_dir()?,
            home: dirs::home_dir(),
        })
    }

    /// Candidate install directories in probe order
    pub fn candidates(&self) -> Vec<PathBuf> {
        Target::ALL
            .iter()
            .filter_map(|target| match target.scope() {
                Scope::Project => Some(target.conventional_dir(&self.project)),
                Scope::Global => self.home.as_deref().map(|home| target.conventional_dir(home)),
            })
            .collect()
    }
}

/// Ordered set of absolute manifest paths, unique by resolved path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredSet {
    paths: Vec<PathBuf>,
}

impl DiscoveredSet {
    /// Add a manifest path; returns false when it resolves to one already present
    pub fn insert(&mut self, path: &Path) -> bool {
        let resolved = absolutize(path);
        if self.paths.contains(&resolved) {
            tracing::debug!(path = %resolved.display(), "duplicate manifest skipped");
            return false;
        }
        self.paths.push(resolved);
        true
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

/// Discover manifests.
///
/// An explicit file is taken literally as a manifest; an explicit
/// directory contributes its manifest if present. Without an explicit path
/// every conventional location is probed. Finding nothing is not an error.
pub fn discover(explicit: Option<&Path>, roots: &SearchRoots) -> DiscoveredSet {
    let mut set = DiscoveredSet::default();

    match explicit {
        Some(path) if path.is_file() => {
            set.insert(path);
        }
        Some(dir) => probe_dir(&mut set, dir),
        None => {
            for dir in roots.candidates() {
                probe_dir(&mut set, &dir);
            }
        }
    }

    tracing::debug!(count = set.len(), "discovery finished");
    set
}

fn probe_dir(set: &mut DiscoveredSet, dir: &Path) {
    let candidate = dir.join(MANIFEST_FILENAME);
    tracing::trace!(candidate = %candidate.display(), "probing");
    if candidate.is_file() {
        set.insert(&candidate);
    }
}

/// Resolve to an absolute path, following symlinks when the path exists
fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
