use super::DiscoveredSet;
use crate::error::KitError;
use crate::ui::{prompt, Ui};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Pick exactly one manifest from a discovered set.
///
/// Prompts when stdin is a terminal; otherwise the first candidate wins so
/// scripted runs never block.
pub fn select(set: &DiscoveredSet, ui: &Ui, searched: Option<&Path>) -> Result<PathBuf> {
    select_with(set.paths(), ui.interactive, searched, |paths| {
        prompt::pick_manifest(ui, paths)
    })
}

/// Selection with an injectable prompt
pub fn select_with<F>(
    paths: &[PathBuf],
    interactive: bool,
    searched: Option<&Path>,
    ask: F,
) -> Result<PathBuf>
where
    F: FnOnce(&[PathBuf]) -> Result<String>,
{
    match paths {
        [] => Err(KitError::NotFound(searched.map(Path::to_path_buf)).into()),
        [only] => Ok(only.clone()),
        _ if !interactive => {
            tracing::info!(
                count = paths.len(),
                chosen = %paths[0].display(),
                "multiple manifests, non-interactive: using first"
            );
            Ok(paths[0].clone())
        }
        _ => {
            let answer = ask(paths)?;
            let index = prompt::parse_selection(&answer, paths.len())?;
            Ok(paths[index].clone())
        }
    }
}
