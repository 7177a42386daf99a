//! Domain errors surfaced by the manifest commands.
//!
//! Commands return `anyhow::Result`; these variants are raised through it so
//! callers (and tests) can `downcast_ref::<KitError>()` to tell the failure
//! classes apart.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error("No skillkit manifest found{}", hint_suffix(.0))]
    NotFound(Option<PathBuf>),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unknown target '{tag}' in {}", .manifest.display())]
    UnknownTarget { tag: String, manifest: PathBuf },

    #[error("Install root {} no longer exists (was the project moved or deleted?)", .0.display())]
    MissingWorkdir(PathBuf),

    #[error("Failed to fetch {locator}: {reason}. Use --source <dir> for offline updates")]
    Fetch { locator: String, reason: String },

    #[error("{} is not a skillkit source: missing {missing}", .dir.display())]
    InvalidSource { dir: PathBuf, missing: String },

    #[error("Doctor found {0} failing check(s)")]
    Verification(usize),

    #[error("Could not remove {0} path(s); manifest kept so uninstall can be retried")]
    PartialRemoval(usize),

    #[error("Failed to parse manifest {}: {reason}", .path.display())]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Installer exited with {0}")]
    InstallerFailed(String),

    #[error("Installer not found at {}. Set SKILLKIT_HOME or pass --home", .0.display())]
    InstallerMissing(PathBuf),

    #[error("{failed} of {total} manifest(s) failed to update")]
    UpdateFailed { failed: usize, total: usize },
}

fn hint_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}
