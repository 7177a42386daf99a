use crate::app::AppContext;
use crate::error::KitError;
use crate::models::ManifestFile;
use crate::services::{self, RemovalOutcome, RemovalPlan};
use crate::ui::{prompt, Ui};
use crate::Result;
use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct UninstallArgs {
    /// Manifest file or install directory (default: search known locations)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Remove without asking for confirmation
    #[arg(short, long, alias = "force")]
    pub yes: bool,

    /// Show what would be removed and exit
    #[arg(long)]
    pub dry_run: bool,
}

/// Run uninstall command
pub fn run(ctx: &AppContext, args: &UninstallArgs) -> Result<()> {
    let manifest_path = ctx.select_one(args.path.as_deref())?;
    let file = ManifestFile::load(&manifest_path)?;
    let plan = services::plan_removal(&file)?;

    print_plan(&ctx.ui, &plan);

    if args.dry_run {
        ctx.ui.info("Dry run: nothing removed.");
        return Ok(());
    }

    if !args.yes {
        if !ctx.ui.interactive {
            bail!("Refusing to uninstall without confirmation; pass --yes");
        }
        if !prompt::confirm("Remove these files?", false)? {
            ctx.ui.info("Aborted, nothing removed.");
            return Ok(());
        }
    }

    let outcome = services::execute(&plan);
    print_outcome(&ctx.ui, &plan, &outcome);

    if !outcome.failed.is_empty() {
        return Err(KitError::PartialRemoval(outcome.failed.len()).into());
    }
    Ok(())
}

fn print_plan(ui: &Ui, plan: &RemovalPlan) {
    println!(
        "{} {} ({})",
        ui.bold("Uninstalling"),
        plan.target,
        plan.manifest_path.display()
    );
    for path in plan.entries.iter().chain(plan.generated.iter()) {
        let marker = if path.exists() { "-" } else { "·" };
        println!("   {} {}", marker, path.display());
    }
    println!("   - {}", plan.manifest_path.display());
    for rejected in &plan.rejected {
        ui.warn(&format!("skipping {}; manifest will be kept", rejected));
    }
    println!();
}

fn print_outcome(ui: &Ui, plan: &RemovalPlan, outcome: &RemovalOutcome) {
    for (path, reason) in &outcome.failed {
        ui.error(&format!("{}: {}", path.display(), reason));
    }

    if outcome.is_complete() {
        ui.success(&format!(
            "Removed {} path(s), {} already absent",
            outcome.removed.len(),
            outcome.skipped.len()
        ));
    } else {
        ui.warn(&format!(
            "Manifest kept at {}; rerun uninstall to retry",
            plan.manifest_path.display()
        ));
    }

    for config in &plan.shared_configs {
        ui.warn(&format!(
            "{} may still reference removed hooks; edit it by hand",
            config.display()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: UninstallArgs,
    }

    #[test]
    fn test_force_is_alias_for_yes() {
        let parsed = Harness::try_parse_from(["t", "--force"]).unwrap();
        assert!(parsed.args.yes);
        let parsed = Harness::try_parse_from(["t", "-y", "--dry-run"]).unwrap();
        assert!(parsed.args.yes && parsed.args.dry_run);
    }
}
