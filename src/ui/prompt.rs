use super::Ui;
use crate::error::KitError;
use anyhow::Result;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// Parse a 1-indexed selection; empty input selects the first entry.
///
/// Returns the 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    match trimmed.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(KitError::InvalidSelection(format!(
            "'{}' (expected 1-{})",
            trimmed, count
        ))
        .into()),
    }
}

/// Print a numbered list of manifests and read the user's choice
pub fn pick_manifest(ui: &Ui, paths: &[PathBuf]) -> Result<String> {
    println!("{}", ui.bold("Multiple installations found:"));
    for (index, path) in paths.iter().enumerate() {
        println!("  {}) {}", index + 1, path.display());
    }

    let answer: String = Input::new()
        .with_prompt("Select installation [1]")
        .allow_empty(true)
        .interact_text()?;
    Ok(answer)
}

/// Ask a yes/no question
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(answer)
}
