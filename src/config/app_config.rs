// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! On-disk configuration (`config.toml`).
//!
//! Numbers are kept as `i64` here so that a negative or oversized value still
//! parses; range checks happen when [`Settings`](super::Settings) are built.

use serde::{Deserialize, Serialize};

/// Layout and behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Draw on the alternate screen.
    pub fullscreen: bool,
    pub show_messages: bool,
    pub show_help: bool,
    pub show_title: bool,
    /// Maximum content width in columns.
    pub width: i64,
    /// Devices per page.
    pub items: i64,
    /// Ceiling for relative volume increases, in percent.
    pub volume_limit: i64,
    /// Percent per volume step.
    pub volume_step: i64,
    /// Unicode icons.
    pub symbols: bool,
    /// Verbosity of device entries, 1 to 3.
    pub device_display: i64,
    pub refresh_interval_ms: i64,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            show_messages: true,
            show_help: true,
            show_title: true,
            width: 100,
            items: 4,
            volume_limit: 110,
            volume_step: 5,
            symbols: true,
            device_display: 2,
            refresh_interval_ms: 1000,
        }
    }
}

/// Colour names as understood by ratatui (`"blue"`, `"dark gray"`, `"#ff8800"`, `"13"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub inactive: String,
    pub active: String,
    pub sink: String,
    pub stream: String,
    pub source: String,
    pub output: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            inactive: "dark gray".to_string(),
            active: "magenta".to_string(),
            sink: "white".to_string(),
            stream: "blue".to_string(),
            source: "white".to_string(),
            output: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// plain, rounded, thick, double or hidden.
    pub border: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            border: "plain".to_string(),
        }
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl AppConfig {
    /// Load config from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r##"
            [settings]
            items = 6

            [colors]
            active = "#ff8800"
            "##,
        )
        .unwrap();
        assert_eq!(config.settings.items, 6);
        assert_eq!(config.settings.width, 100);
        assert_eq!(config.colors.active, "#ff8800");
        assert_eq!(config.colors.stream, "blue");
        assert_eq!(config.style.border, "plain");
    }

    #[test]
    fn test_out_of_range_numbers_still_parse() {
        let config = AppConfig::from_toml("[settings]\nvolume_step = -4\n").unwrap();
        assert_eq!(config.settings.volume_step, -4);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(AppConfig::from_toml("[settings]\nitems = \"four\"\n").is_err());
    }
}
