// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Effective settings: config file, then command line, range-checked.

use super::app_config::{AppConfig, ColorsConfig};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::warn;

pub const WIDTH_RANGE: RangeInclusive<i64> = 45..=300;
pub const ITEMS_RANGE: RangeInclusive<i64> = 1..=12;
pub const VOLUME_LIMIT_RANGE: RangeInclusive<i64> = 50..=180;
pub const VOLUME_STEP_RANGE: RangeInclusive<i64> = 1..=30;
pub const DEVICE_DISPLAY_RANGE: RangeInclusive<i64> = 1..=3;
pub const REFRESH_RANGE: RangeInclusive<i64> = 250..=10_000;

/// How much of each device entry to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLevel {
    Compact,
    Normal,
    Detailed,
}

impl DisplayLevel {
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::Compact),
            2 => Some(Self::Normal),
            3 => Some(Self::Detailed),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Compact => 1,
            Self::Normal => 2,
            Self::Detailed => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Compact => Self::Normal,
            Self::Normal => Self::Detailed,
            Self::Detailed => Self::Compact,
        }
    }

    /// Header rows drawn above the channel bars.
    pub fn header_rows(self) -> u16 {
        match self {
            Self::Compact | Self::Normal => 1,
            Self::Detailed => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Plain,
    Rounded,
    Thick,
    Double,
    Hidden,
}

impl BorderStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "normal" => Some(Self::Plain),
            "rounded" => Some(Self::Rounded),
            "thick" => Some(Self::Thick),
            "double" => Some(Self::Double),
            "hidden" | "none" => Some(Self::Hidden),
            _ => None,
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fullscreen: Option<bool>,
    pub no_help: bool,
    pub no_title: bool,
    pub no_messages: bool,
    pub no_symbols: bool,
    pub items: Option<i64>,
    pub width: Option<i64>,
    pub volume_limit: Option<i64>,
    pub volume_step: Option<i64>,
    pub device_display: Option<i64>,
}

/// What the process environment says about the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    /// `NO_COLOR` is set.
    pub no_color: bool,
    /// No graphical session, likely a bare virtual console.
    pub console: bool,
}

impl Environment {
    pub fn detect() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            console: std::env::var_os("DISPLAY").is_none()
                && std::env::var_os("WAYLAND_DISPLAY").is_none(),
        }
    }
}

/// Immutable settings, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fullscreen: bool,
    pub show_messages: bool,
    pub show_help: bool,
    pub show_title: bool,
    pub width: u16,
    pub items: usize,
    pub volume_limit: u32,
    pub volume_step: u32,
    pub symbols: bool,
    pub device_display: DisplayLevel,
    pub refresh_interval: Duration,
    pub colors: ColorsConfig,
    pub no_color: bool,
    pub border: BorderStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&AppConfig::default(), &Overrides::default(), Environment::default())
    }
}

impl Settings {
    pub fn resolve(config: &AppConfig, overrides: &Overrides, env: Environment) -> Self {
        let file = &config.settings;
        let defaults = AppConfig::default().settings;

        let width = layered("width", file.width, overrides.width, &WIDTH_RANGE, defaults.width);
        let items = layered("items", file.items, overrides.items, &ITEMS_RANGE, defaults.items);
        let volume_limit = layered(
            "volume_limit",
            file.volume_limit,
            overrides.volume_limit,
            &VOLUME_LIMIT_RANGE,
            defaults.volume_limit,
        );
        let volume_step = layered(
            "volume_step",
            file.volume_step,
            overrides.volume_step,
            &VOLUME_STEP_RANGE,
            defaults.volume_step,
        );
        let device_display = layered(
            "device_display",
            file.device_display,
            overrides.device_display,
            &DEVICE_DISPLAY_RANGE,
            defaults.device_display,
        );
        let refresh = checked(
            "refresh_interval_ms",
            file.refresh_interval_ms,
            &REFRESH_RANGE,
            defaults.refresh_interval_ms,
        );

        let border = BorderStyle::parse(&config.style.border).unwrap_or_else(|| {
            warn!("Unknown border style {:?}, using plain", config.style.border);
            BorderStyle::Plain
        });

        // Ranges above are all non-negative, so the casts cannot wrap.
        Self {
            fullscreen: overrides.fullscreen.unwrap_or(file.fullscreen),
            show_messages: file.show_messages && !overrides.no_messages,
            show_help: file.show_help && !overrides.no_help,
            show_title: file.show_title && !overrides.no_title,
            width: width as u16,
            items: items as usize,
            volume_limit: volume_limit as u32,
            volume_step: volume_step as u32,
            symbols: file.symbols && !overrides.no_symbols && !env.console,
            device_display: DisplayLevel::from_level(device_display)
                .unwrap_or(DisplayLevel::Normal),
            refresh_interval: Duration::from_millis(refresh as u64),
            colors: config.colors.clone(),
            no_color: env.no_color,
            border,
        }
    }
}

fn checked(name: &str, value: i64, range: &RangeInclusive<i64>, fallback: i64) -> i64 {
    if range.contains(&value) {
        value
    } else {
        warn!(
            "{} = {} is outside {}..={}, using {}",
            name,
            value,
            range.start(),
            range.end(),
            fallback
        );
        fallback
    }
}

/// File value checked against the default, then the flag checked against
/// the file value.
fn layered(
    name: &str,
    file: i64,
    flag: Option<i64>,
    range: &RangeInclusive<i64>,
    default: i64,
) -> i64 {
    let base = checked(name, file, range, default);
    match flag {
        Some(value) => checked(name, value, range, base),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.width, 100);
        assert_eq!(settings.items, 4);
        assert_eq!(settings.volume_limit, 110);
        assert_eq!(settings.volume_step, 5);
        assert_eq!(settings.device_display, DisplayLevel::Normal);
        assert_eq!(settings.refresh_interval, Duration::from_secs(1));
        assert!(settings.symbols);
        assert!(settings.fullscreen);
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let mut config = AppConfig::default();
        config.settings.items = 40;
        config.settings.volume_step = 0;
        config.settings.width = 20;
        config.style.border = "wavy".to_string();
        let settings = Settings::resolve(&config, &Overrides::default(), Environment::default());
        assert_eq!(settings.items, 4);
        assert_eq!(settings.volume_step, 5);
        assert_eq!(settings.width, 100);
        assert_eq!(settings.border, BorderStyle::Plain);
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = AppConfig::default();
        config.settings.items = 6;
        config.settings.volume_limit = 150;
        let overrides = Overrides {
            items: Some(2),
            volume_limit: Some(500),
            fullscreen: Some(false),
            no_help: true,
            ..Overrides::default()
        };
        let settings = Settings::resolve(&config, &overrides, Environment::default());
        assert_eq!(settings.items, 2);
        // A bad flag keeps the file's value, not the default.
        assert_eq!(settings.volume_limit, 150);
        assert!(!settings.fullscreen);
        assert!(!settings.show_help);
    }

    #[test]
    fn test_console_disables_symbols() {
        let env = Environment {
            no_color: true,
            console: true,
        };
        let settings = Settings::resolve(&AppConfig::default(), &Overrides::default(), env);
        assert!(!settings.symbols);
        assert!(settings.no_color);
    }

    #[test]
    fn test_display_level_cycle() {
        let level = DisplayLevel::Compact;
        assert_eq!(level.next().next().next(), level);
        assert_eq!(DisplayLevel::from_level(3).map(DisplayLevel::level), Some(3));
        assert_eq!(DisplayLevel::from_level(0), None);
    }
}
