use crate::app::AppContext;
use crate::models::{Manifest, ManifestFile};
use crate::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Manifest file or install directory (default: search known locations)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// One discovered installation as printed by `list --json`
#[derive(Debug, Serialize)]
struct ListEntry {
    path: PathBuf,
    #[serde(flatten)]
    manifest: Option<Manifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ListEntry {
    fn load(path: &Path) -> Self {
        match ManifestFile::load(path) {
            Ok(file) => Self {
                path: file.path,
                manifest: Some(file.manifest),
                error: None,
            },
            Err(e) => Self {
                path: path.to_path_buf(),
                manifest: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Run list command
pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let set = ctx.discover(args.path.as_deref());
    let entries: Vec<ListEntry> = set.paths().iter().map(|p| ListEntry::load(p)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        ctx.ui.warn("No installations found. Run 'skillkit install' first.");
        return Ok(());
    }

    println!("{}", ctx.ui.bold("📋 Installations:"));
    for entry in &entries {
        match (&entry.manifest, &entry.error) {
            (Some(manifest), _) => println!(
                "   • {} {} (v{}, installed {}, {} skill(s), {} agent(s){})",
                ctx.ui.cyan(&manifest.target),
                entry.path.display(),
                manifest.version,
                manifest.installed_at,
                manifest.skills.len(),
                manifest.agents.len(),
                if manifest.hooks { ", hooks" } else { "" }
            ),
            (None, error) => println!(
                "   • {} {}",
                entry.path.display(),
                ctx.ui.red(error.as_deref().unwrap_or("unreadable"))
            ),
        }
    }
    Ok(())
}
