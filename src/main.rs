use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use skillkit::app::AppContext;
use skillkit::cli::{doctor, install, list, self_update, uninstall, update};
use skillkit::ui::Ui;
use skillkit::Result;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "skillkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage skills, agents and hooks installed for AI coding assistants", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Toolkit checkout containing the installer (overrides SKILLKIT_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install components by running the toolkit installer
    Install(install::InstallArgs),

    /// Re-run the installer with the settings recorded in a manifest
    Update(update::UpdateArgs),

    /// Fetch a fresh toolkit and update installations with it
    #[command(name = "self-update")]
    SelfUpdate(self_update::SelfUpdateArgs),

    /// Verify that every recorded component exists on disk
    Doctor(doctor::DoctorArgs),

    /// Remove exactly what a manifest recorded
    Uninstall(uninstall::UninstallArgs),

    /// List discovered installations
    List(list::ListArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let ui = Ui::from_env(cli.no_color);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli, ui)) {
        eprintln!("{}", ui.red(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli, ui: Ui) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "skillkit", &mut io::stdout());
        return Ok(());
    }

    let ctx = AppContext::new(ui, cli.no_color, cli.home)?;

    match cli.command {
        Commands::Install(args) => install::run(&ctx, &args).await?,
        Commands::Update(args) => update::run(&ctx, &args).await?,
        Commands::SelfUpdate(args) => self_update::run(&ctx, &args).await?,
        Commands::Doctor(args) => doctor::run(&ctx, &args)?,
        Commands::Uninstall(args) => uninstall::run(&ctx, &args)?,
        Commands::List(args) => list::run(&ctx, &args)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillkit=info",
        1 => "info,skillkit=debug",
        _ => "debug,skillkit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}
