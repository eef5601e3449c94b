//! Catalog command-line front end.
//!
//! # Responsibility
//! - Parse arguments, open the catalog database and start logging.
//! - Route writes through the request workflow so notices match other front ends.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use musiclib_core::{default_log_level, init_logging, open_db};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match &cli.command {
        Command::Ping => {
            println!("musiclib_core ping={}", musiclib_core::ping());
            Ok(())
        }
        Command::Version => {
            println!("musiclib_core version={}", musiclib_core::core_version());
            Ok(())
        }
        command => {
            let conn = open_db(&cli.db)
                .with_context(|| format!("failed to open catalog `{}`", cli.db.display()))?;
            commands::run(&conn, &cli.locale, command)
        }
    }
}
