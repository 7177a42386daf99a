use super::update::UpdateArgs;
use crate::app::AppContext;
use crate::error::KitError;
use crate::orchestrator::fetch::{self, FetchedSource, SourceRequest};
use crate::orchestrator::ScriptRunner;
use crate::ui::prompt;
use crate::Result;
use clap::Args;
use semver::Version;
use std::path::PathBuf;

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Args, Debug, Clone, Default)]
pub struct SelfUpdateArgs {
    /// Use a local skillkit checkout instead of cloning
    #[arg(long, conflicts_with = "repo")]
    pub source: Option<PathBuf>,

    /// Repository to clone (default from config)
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch or tag to clone
    #[arg(long = "ref", value_name = "REF")]
    pub reference: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub update: UpdateArgs,
}

/// Run self-update command
pub async fn run(ctx: &AppContext, args: &SelfUpdateArgs) -> Result<()> {
    let request = SourceRequest::resolve(
        args.source.clone(),
        args.repo.clone(),
        args.reference.clone(),
        &ctx.config,
    );

    ctx.ui.info(&format!("🔍 Resolving skillkit source: {}", request.describe()));
    let source = fetch::fetch(&request, &ctx.ui)?;

    let result = update_from(ctx, args, &source).await;
    let cleanup = source.cleanup();
    result?;
    cleanup
}

async fn update_from(ctx: &AppContext, args: &SelfUpdateArgs, source: &FetchedSource) -> Result<()> {
    source.validate(&ctx.config)?;

    println!("   Source:          {}", source.dir().display());
    match source.version() {
        Some(fetched) => {
            println!(
                "   Version:         {} → {}",
                ctx.ui.yellow(CURRENT_VERSION),
                ctx.ui.green(&fetched)
            );
            if is_newer(CURRENT_VERSION, &fetched) {
                ctx.ui.warn("Source is older than the running skillkit");
            }
        }
        None => println!(
            "   Version:         {} → {}",
            ctx.ui.yellow(CURRENT_VERSION),
            ctx.ui.yellow("unknown")
        ),
    }
    println!();

    if ctx.ui.interactive && !args.yes {
        let proceed = prompt::confirm("Update installations from this source?", true)?;
        if !proceed {
            ctx.ui.info("Aborted, nothing changed.");
            return Ok(());
        }
    }

    let cli_entry = source.dir().join(&ctx.config.cli_entry);
    let mut forwarded = vec!["update".to_string()];
    forwarded.extend(args.update.passthrough());
    if ctx.no_color_flag {
        forwarded.push("--no-color".to_string());
    }

    tracing::info!(entry = %cli_entry.display(), args = ?forwarded, "delegating to fetched skillkit");
    let cwd = std::env::current_dir()?;
    let status = ScriptRunner::new()
        .run(&cli_entry, &forwarded, &cwd, &[("SKILLKIT_HOME", source.dir())])
        .await?;

    if !status.success() {
        return Err(KitError::InstallerFailed(format!(
            "{} ({})",
            status,
            cli_entry.display()
        ))
        .into());
    }

    ctx.ui.success("Self-update complete");
    Ok(())
}

/// True when `candidate` is a later release than `baseline`.
///
/// A leading `v` is ignored. Unparseable versions compare as plain strings.
pub fn is_newer(candidate: &str, baseline: &str) -> bool {
    let candidate = candidate.trim_start_matches('v');
    let baseline = baseline.trim_start_matches('v');

    match (Version::parse(candidate), Version::parse(baseline)) {
        (Ok(candidate), Ok(baseline)) => candidate > baseline,
        (Ok(_), Err(_)) => true,
        (Err(_), _) => candidate > baseline,
    }
}
