// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! viki: manage and run jobs in a local home directory.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use viki_daemon::{logging, startup, Config};

use commands::Command;
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "viki", version, about = "Job definition store and step runner")]
#[command(styles = color::styles())]
struct Cli {
    /// Home directory (default: $VIKI_HOME, then ~/.viki)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.home {
        Some(home) => Config::for_home(home)?,
        None => Config::load()?,
    };

    let command = match cli.command {
        Command::Lock => return commands::lock::handle(&config, cli.format),
        Command::Job(command) => command,
    };

    let _log_guard = logging::init(&config)?;
    let daemon = startup(&config)?;
    let result = commands::job::handle(command, daemon.service(), cli.format).await;
    daemon.shutdown()?;
    result
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
