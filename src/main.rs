use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use mod_version_check::config::CheckerConfig;
use mod_version_check::logging::{self, LogOptions};
use mod_version_check::mods::discover_mods;
use mod_version_check::report::{render_json, render_text};
use mod_version_check::session::Session;
use mod_version_check::version::transports::HttpTransport;

#[derive(Parser)]
#[command(name = "mod-version-check")]
#[command(version, about = "Checks installed mods against their published versions")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check every mod under a mods directory
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Directory containing one subdirectory per installed mod
    mods_dir: PathBuf,

    /// Config file (defaults to config.json in the data directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the per-request timeout
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(LogOptions {
        stderr: cli.log_stderr,
        json: cli.log_json,
    })?;

    match cli.command {
        Command::Check(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_check(args)),
    }
}

async fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let mut config = CheckerConfig::load_or_default(args.config.as_deref())?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.fetch.timeout_ms = timeout_ms;
    }

    let mods = discover_mods(&args.mods_dir)
        .with_context(|| format!("list mods in {}", args.mods_dir.display()))?;
    let transport = Arc::new(HttpTransport::new(&config.fetch.user_agent));

    let mut session = Session::open(&mods, &config.descriptor_path, transport, &config.fetch)?;
    session.wait().await;

    let snapshot = session.store().snapshot()?;
    if args.json {
        println!("{}", render_json(&snapshot)?);
    } else {
        print!("{}", render_text(&snapshot));
    }

    session.close();
    Ok(())
}
