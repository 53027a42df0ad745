//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod run;
pub mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lotwatch - Marketplace listing watcher with Telegram notifications.
#[derive(Parser, Debug)]
#[command(name = "lotwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one fetch, filter and notify cycle
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Inspect the seen-listings store
    #[command(subcommand)]
    Store(StoreCommand),
}

/// Subcommands for `lotwatch check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Send a Telegram test message
    Telegram(ConfigPathArg),
}

/// Subcommands for `lotwatch store`
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Show how many listings have been seen
    Stats(StoreStatsArgs),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `store stats` subcommand.
#[derive(Parser, Debug)]
pub struct StoreStatsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Print every remembered listing
    #[arg(long)]
    pub list: bool,
}
