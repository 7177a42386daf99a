use crate::app::AppContext;
use crate::discovery;
use crate::error::KitError;
use crate::orchestrator::update::{self, UpdateOptions};
use crate::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateArgs {
    /// Manifest file or install directory (default: search known locations)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Update every discovered installation
    #[arg(long)]
    pub all: bool,

    /// Show what the installer would do without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite installed files (default)
    #[arg(long, overrides_with = "no_force")]
    pub force: bool,

    /// Keep files that already exist
    #[arg(long, overrides_with = "force")]
    pub no_force: bool,
}

impl UpdateArgs {
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions {
            dry_run: self.dry_run,
            force: !self.no_force,
        }
    }

    /// Flags to forward unchanged to another `skillkit update`
    pub fn passthrough(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.all {
            args.push("--all".to_string());
        }
        if let Some(path) = &self.path {
            args.push("--path".to_string());
            args.push(path.display().to_string());
        }
        if self.dry_run {
            args.push("--dry-run".to_string());
        }
        if self.no_force {
            args.push("--no-force".to_string());
        } else if self.force {
            args.push("--force".to_string());
        }
        args
    }
}

/// Run update command
pub async fn run(ctx: &AppContext, args: &UpdateArgs) -> Result<()> {
    let options = args.options();
    let set = ctx.discover(args.path.as_deref());

    if args.all {
        if set.is_empty() {
            return Err(KitError::NotFound(args.path.clone()).into());
        }
        let installer = ctx.installer()?;
        ctx.ui.info(&format!("🔄 Updating {} installation(s)...", set.len()));
        update::update_all(set.paths(), &installer, options, ctx.user_home(), &ctx.ui).await?;
        ctx.ui.success("All installations updated");
        return Ok(());
    }

    let manifest = discovery::select(&set, &ctx.ui, args.path.as_deref())?;
    let installer = ctx.installer()?;
    let plan = update::update_one(&manifest, &installer, options, ctx.user_home(), &ctx.ui).await?;
    if options.dry_run {
        ctx.ui.success(&format!("Dry run finished for {}", plan.target));
    } else {
        ctx.ui.success(&format!("Updated {}", plan.manifest_path.display()));
    }
    Ok(())
}
