// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - run: stream one sort to stdout (text or JSON lines)
// - list: print algorithm identifiers
// - config --show | --path | --reset: configuration management

use crate::config::{Config, VERSION};
use crate::sorting::Algorithm;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// Sorting algorithm visualizer
#[derive(Parser, Debug)]
#[command(name = "sortscope")]
#[command(version = VERSION)]
#[command(about = "Watch sorting algorithms work, one comparison at a time", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one sort without the TUI and print its frames
    Run(RunArgs),

    /// List available algorithms
    List,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Algorithm identifier (see `sortscope list`); defaults to the configured one
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Number of random values to sort
    #[arg(short = 'n', long, conflicts_with = "values")]
    pub size: Option<usize>,

    /// Explicit input, comma separated (e.g. 3,1,2)
    #[arg(long, value_delimiter = ',')]
    pub values: Option<Vec<u32>>,

    /// Seed for reproducible random input
    #[arg(long)]
    pub seed: Option<u64>,

    /// Deliver frames without delay
    #[arg(long)]
    pub instant: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn handle_list() {
    for algorithm in Algorithm::ALL {
        println!("{:<10} {}", algorithm.id(), algorithm.name());
    }
}

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: sortscope config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!("# enable_tui = {}", config.enable_tui);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let path = Config::default().save()?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_values() {
        let cli = Cli::try_parse_from([
            "sortscope", "run", "-a", "quick", "--values", "3,1,2", "--instant", "--json",
        ])
        .unwrap();

        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.algorithm, Some(Algorithm::Quick));
        assert_eq!(args.values, Some(vec![3, 1, 2]));
        assert!(args.instant);
        assert!(args.json);
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["sortscope", "run", "-a", "sleep"]).is_err());
    }

    #[test]
    fn test_size_and_values_conflict() {
        assert!(Cli::try_parse_from(["sortscope", "run", "-n", "4", "--values", "1,2"]).is_err());
    }

    #[test]
    fn test_no_subcommand_runs_default_mode() {
        let cli = Cli::try_parse_from(["sortscope"]).unwrap();
        assert!(cli.command.is_none());
    }
}
