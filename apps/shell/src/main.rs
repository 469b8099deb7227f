mod args;
mod commands;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tessera::domain::config::TesseraConfig;
use tessera::kernel::config::load_config;
use tessera_logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: TesseraConfig =
        load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = Logger::from_config(&config.logging).context("Failed to initialize logging")?;

    let platform = tessera::init(config).context("Failed to bootstrap feature slices")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let json = cli.json;

    match cli.command {
        Command::Features {} => commands::features(&platform, json, &mut out)?,
        Command::Entities { key, feature } => {
            commands::entities(&platform, &key, feature, json, &mut out)?;
        }
        Command::Pending {} => commands::pending(&platform, json, &mut out)?,
        Command::Choices { key } => commands::choices(&platform, &key, json, &mut out)?,
        Command::Summary {} => commands::summary(&platform, json, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
