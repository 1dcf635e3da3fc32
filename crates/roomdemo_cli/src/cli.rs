//! Command-line surface of the `roomdemo` binary.
//!
//! # Responsibility
//! - Declare global flags (with `ROOMDEMO_*` environment fallbacks) and
//!   subcommands.

use clap::{Parser, Subcommand};
use roomdemo_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roomdemo", version, about = "Product inventory over a local SQLite store")]
pub struct Cli {
    #[arg(long, global = true, env = DB_PATH_ENV, help = "SQLite database file")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true, env = LOG_LEVEL_ENV, help = "trace|debug|info|warn|error")]
    pub log_level: Option<String>,
    #[arg(
        long,
        global = true,
        env = LOG_DIR_ENV,
        help = "Absolute directory for rolling log files (logging is off when unset)"
    )]
    pub log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a product.
    Add { name: String, quantity: String },
    /// List products whose name starts with NAME.
    Search { name: String },
    /// Delete every product named NAME.
    Delete { name: String },
    /// List every product.
    List,
    /// Interactive form: type `help` for commands.
    Shell,
}
