// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! pulsedeck - a terminal dashboard for PulseAudio devices and streams.
//!
//! Polls `pactl` for sinks, streams, sources and outputs, and drives volume,
//! mute, routing, loopbacks and defaults from the keyboard.

mod app;
mod cli;
mod config;
mod control;
mod device;
mod keymap;
mod message;
mod state;
#[cfg(test)]
mod testing;
mod tui;
mod ui;

use app::{App, AppError};
use clap::Parser;
use cli::Args;
use config::{AppConfig, ConfigManager, Environment, Settings};
use pulsedeck_pactl::Pactl;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CONFIG_READ_ERROR: &str = "error reading config file";

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // stdout belongs to the TUI, so everything goes to the file.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pulsedeck=info,pulsedeck_pactl=info")),
        )
        .init();
    Ok(())
}

/// Report a fatal precondition and exit.
fn fail(e: AppError) -> ! {
    error!("{}", e);
    eprintln!("pulsedeck: {}", e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let manager = match &args.config {
        Some(path) => ConfigManager::with_config_path(path),
        None => ConfigManager::new()?,
    };

    let log_path = args.log_file.clone().unwrap_or_else(|| manager.log_path());
    if let Err(e) = init_logging(&log_path) {
        eprintln!("pulsedeck: logging disabled, cannot open {}: {}", log_path.display(), e);
    }
    info!("Starting pulsedeck {}", env!("CARGO_PKG_VERSION"));

    if args.write_config {
        if let Err(e) = manager.write_effective() {
            error!("Not writing {}: {}", manager.config_path().display(), e);
            eprintln!(
                "pulsedeck: not writing {}: {}",
                manager.config_path().display(),
                e
            );
            std::process::exit(1);
        }
        println!("{}", manager.config_path().display());
        return Ok(());
    }

    let (config, config_status) = match manager.load_config() {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("Failed to read {}: {}", manager.config_path().display(), e);
            (AppConfig::default(), Some(CONFIG_READ_ERROR))
        }
    };

    let settings = Settings::resolve(&config, &args.overrides(), Environment::detect());

    let pactl = Pactl::new();
    if let Err(e) = pactl.check_available() {
        if e.is_not_found() {
            fail(AppError::MissingPactl);
        }
        warn!("pactl availability check failed: {}", e);
    }

    let mut terminal = tui::init(settings.fullscreen)?;

    let mut app = App::new(settings, Arc::new(pactl));
    if let Some(status) = config_status {
        app = app.with_status(status);
    }
    let result = app.run(&mut terminal).await;

    tui::restore(&mut terminal)?;

    match result {
        Ok(()) => {
            info!("Exiting pulsedeck");
            Ok(())
        }
        Err(AppError::Io(e)) => Err(e.into()),
        Err(e) => fail(e),
    }
}
