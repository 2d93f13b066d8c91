// sortscope - Sorting algorithm visualizer for the terminal
//
// Each algorithm runs on a private copy of the array and reports every
// comparison, swap and write as a sequence-numbered frame. A scheduler paces
// the frames in real time and hands them to a consumer.
//
// Architecture:
// - Sorting core: instrumented engines emitting frames through a sink
// - Scheduler: one run at a time, blocking engine task feeding a timed stream
// - TUI (ratatui): bars colored by highlight, status line, log panel
// - Headless runner: the same stream printed as text or JSON lines
// - Event system: mpsc channels connect the engine, delivery and consumer

mod cli;
mod config;
mod events;
mod headless;
mod logging;
mod scheduler;
mod sorting;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use config::Config;
use logging::LogBuffer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that don't need logging or a runtime loop
    match &cli.command {
        Some(Commands::List) => {
            cli::handle_list();
            return Ok(());
        }
        Some(Commands::Config { show, reset, path }) => {
            return cli::handle_config(*show, *reset, *path);
        }
        _ => {}
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    // The TUI only runs for the default command; `run` is always headless
    let use_tui = config.enable_tui && cli.command.is_none();

    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, use_tui, &log_buffer);

    tracing::debug!(
        algorithm = ?config.algorithm,
        size = config.sample.size,
        base_duration_ms = config.animation.base_duration_ms,
        "Configuration loaded"
    );

    match cli.command {
        Some(Commands::Run(args)) => headless::run(&config, args).await,
        _ if use_tui => {
            tracing::info!("Starting TUI");
            tui::run_tui(config, log_buffer).await
        }
        _ => {
            tracing::info!("TUI disabled, running in headless mode");
            headless::run(&config, RunArgs::default()).await
        }
    }
}
