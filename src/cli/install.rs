use crate::app::AppContext;
use crate::Result;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Arguments passed through to the installer (e.g. --claude --no-hooks)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Run install command
pub async fn run(ctx: &AppContext, args: &InstallArgs) -> Result<()> {
    let installer = ctx.installer()?;
    let cwd = std::env::current_dir()?;

    ctx.ui.info(&format!(
        "📦 Running installer from {}",
        installer.toolkit_home.display()
    ));
    installer.run_raw(&args.args, &cwd).await?;
    ctx.ui.success("Install complete");
    Ok(())
}
