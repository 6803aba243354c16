// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command line flags.

use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

/// Control PulseAudio (or pipewire-pulse) devices and streams from the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Draw on the alternate screen (true) or inline (false)
    #[arg(short = 'f', long, value_name = "BOOL")]
    pub fullscreen: Option<bool>,

    /// Hide the key help
    #[arg(short = 'H', long)]
    pub no_help: bool,

    /// Hide the title
    #[arg(short = 't', long)]
    pub no_title: bool,

    /// Hide status messages
    #[arg(short = 'v', long)]
    pub no_messages: bool,

    /// Devices per page (1-12)
    #[arg(short = 'i', long, value_name = "N", allow_negative_numbers = true)]
    pub max_items: Option<i64>,

    /// Maximum content width (45-300)
    #[arg(short = 'w', long, value_name = "COLUMNS", allow_negative_numbers = true)]
    pub max_width: Option<i64>,

    /// Volume ceiling for volume up, in percent (50-180)
    #[arg(short = 'm', long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub max_volume: Option<i64>,

    /// Percent per volume step (1-30)
    #[arg(short = 's', long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub volume_steps: Option<i64>,

    /// Plain ASCII instead of unicode icons
    #[arg(short = 'u', long)]
    pub no_symbols: bool,

    /// Entry detail level (1-3)
    #[arg(short = 'd', long, value_name = "LEVEL", allow_negative_numbers = true)]
    pub device_display: Option<i64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the effective config file (defaults where missing) and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            fullscreen: self.fullscreen,
            no_help: self.no_help,
            no_title: self.no_title,
            no_messages: self.no_messages,
            no_symbols: self.no_symbols,
            items: self.max_items,
            width: self.max_width,
            volume_limit: self.max_volume,
            volume_step: self.volume_steps,
            device_display: self.device_display,
        }
    }
}
