//! `roomdemo` terminal front-end.
//!
//! # Responsibility
//! - Parse flags and environment into an `AppConfig`.
//! - Drive the core product screen through one-shot subcommands or the
//!   interactive form shell.

use clap::Parser;

mod cli;
mod commands;
mod render;
mod shell;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = commands::run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
