use crate::app::AppContext;
use crate::error::KitError;
use crate::services::{self, ManifestReport};
use crate::ui::Ui;
use crate::Result;
use chrono::{DateTime, Local};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct DoctorArgs {
    /// Manifest file or install directory (default: search known locations)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Run doctor command
pub fn run(ctx: &AppContext, args: &DoctorArgs) -> Result<()> {
    let set = ctx.discover(args.path.as_deref());
    if set.is_empty() {
        return Err(KitError::NotFound(args.path.clone()).into());
    }

    ctx.ui.info(&format!("🩺 Checking {} installation(s)...", set.len()));
    println!();

    let report = services::run_checks(set.paths());
    for manifest in &report.manifests {
        print_manifest(&ctx.ui, manifest);
    }

    let passed = report.passed();
    let failed = report.failed();
    let summary = format!("{} passed, {} failed", passed, failed);
    if failed == 0 {
        println!("{}", ctx.ui.green(&summary));
        Ok(())
    } else {
        println!("{}", ctx.ui.red(&summary));
        Err(KitError::Verification(failed).into())
    }
}

fn print_manifest(ui: &Ui, report: &ManifestReport) {
    let target = report
        .target
        .map(|t| t.to_string())
        .or_else(|| report.manifest.as_ref().map(|m| m.target.clone()))
        .unwrap_or_else(|| "unknown".to_string());

    println!("{} {}", ui.bold(&target), report.path.display());
    if let Some(manifest) = &report.manifest {
        if !manifest.version.is_empty() {
            println!("   version:   {}", manifest.version);
        }
        if !manifest.installed_at.is_empty() {
            println!("   installed: {}", format_timestamp(&manifest.installed_at));
        }
    }

    if let Some(error) = &report.error {
        ui.error(error);
    }

    for check in &report.checks {
        if check.passed {
            println!("   {} {} {}", ui.green("✓"), check.kind, check.id);
        } else {
            ui.error(&format!(
                "missing {} {} ({})",
                check.kind,
                check.id,
                check.path.display()
            ));
        }
    }

    for rejected in &report.rejected {
        ui.error(&rejected.to_string());
    }

    for warning in &report.warnings {
        ui.warn(warning);
    }
    println!();
}

/// Render an RFC 3339 timestamp in local time; unparseable values pass through
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
