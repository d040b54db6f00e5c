mod cli;
mod commands;
mod logging;

use anyhow::Context as _;
use clap::Parser;
use cli::Cli;
use quickmanage_board::board::InitBoard;
use quickmanage_board::{BoardConfig, BoardContext, BoardOperationProcessor, Notification};
use std::path::{Path, PathBuf};
use std::process;
use tokio::sync::broadcast;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

/// Config files in increasing precedence: user config dir, working
/// directory, then an explicit `--config`.
fn config_files(cwd: &Path, explicit: Option<PathBuf>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("quickmanage").join("config.toml"));
    }
    files.push(cwd.join("quickmanage.toml"));
    files.push(cwd.join("quickmanage.json"));
    files.extend(explicit);
    files
}

fn load_config(cli: &Cli) -> anyhow::Result<BoardConfig> {
    let cwd = std::env::current_dir().context("reading the working directory")?;
    let mut config = BoardConfig::load(&config_files(&cwd, cli.config.clone()))?;
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    Ok(config)
}

fn report_notifications(receiver: &mut broadcast::Receiver<Notification>) {
    while let Ok(notification) = receiver.try_recv() {
        if notification.is_error() {
            eprintln!("{}", notification.message);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!(storage_dir = %config.storage_dir.display(), "using board");

    let ctx = BoardContext::with_file_store(config);
    let mut notifications = ctx.subscribe();
    let processor = BoardOperationProcessor::for_context(&ctx);
    processor.process(&InitBoard::new(), &ctx).await?;

    let result = commands::run(cli.command, &ctx, &processor).await;
    let flushed = ctx.flush().await;
    report_notifications(&mut notifications);

    let value = result?;
    flushed?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::configure_logging(cli.verbose, cli.debug, cli.quiet);

    match run(cli).await {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_ERROR);
        }
    }
}
