// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colours, borders and icons.

use crate::config::{BorderStyle, Settings};
use crate::device::DeviceKind;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{BorderType, Borders};
use std::str::FromStr;
use tracing::warn;

// ============================================================================
// Icons
// ============================================================================

/// Glyphs used in entry headers. The plain set is ASCII only.
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    pub unicode: bool,
    pub cursor_prefix: &'static str,
    pub cursor_suffix: &'static str,
    pub channel_marker: &'static str,
    pub muted: &'static str,
    pub playing: &'static str,
    pub recording: &'static str,
    pub idle: &'static str,
    pub suspended: &'static str,
}

pub const UNICODE_SYMBOLS: Symbols = Symbols {
    unicode: true,
    cursor_prefix: "▸ ",
    cursor_suffix: " ◂",
    channel_marker: "› ",
    muted: "🔇 ",
    playing: "🔊 ",
    recording: "🎤 ",
    idle: "💤 ",
    suspended: "⏸ ",
};

pub const PLAIN_SYMBOLS: Symbols = Symbols {
    unicode: false,
    cursor_prefix: "> ",
    cursor_suffix: " <",
    channel_marker: "> ",
    muted: "(muted) ",
    playing: "running ",
    recording: "",
    idle: "idle ",
    suspended: "suspended ",
};

// ============================================================================
// Theme
// ============================================================================

#[derive(Debug, Clone)]
pub struct Theme {
    pub inactive: Style,
    pub active: Style,
    sink: Style,
    stream: Style,
    source: Style,
    output: Style,
    pub borders: Borders,
    pub border_type: BorderType,
    pub symbols: Symbols,
    pub show_title: bool,
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        let colors = &settings.colors;
        let style = |name: &str, value: &str, fallback: Color| -> Style {
            if settings.no_color {
                return Style::default();
            }
            Style::default().fg(parse_color(name, value, fallback))
        };

        let (borders, border_type) = match settings.border {
            BorderStyle::Plain => (Borders::ALL, BorderType::Plain),
            BorderStyle::Rounded => (Borders::ALL, BorderType::Rounded),
            BorderStyle::Thick => (Borders::ALL, BorderType::Thick),
            BorderStyle::Double => (Borders::ALL, BorderType::Double),
            BorderStyle::Hidden => (Borders::NONE, BorderType::Plain),
        };

        Self {
            inactive: style("inactive", &colors.inactive, Color::DarkGray),
            active: style("active", &colors.active, Color::Magenta).add_modifier(Modifier::BOLD),
            sink: style("sink", &colors.sink, Color::White),
            stream: style("stream", &colors.stream, Color::Blue),
            source: style("source", &colors.source, Color::White),
            output: style("output", &colors.output, Color::Blue),
            borders,
            border_type,
            symbols: if settings.symbols {
                UNICODE_SYMBOLS
            } else {
                PLAIN_SYMBOLS
            },
            show_title: settings.show_title,
        }
    }

    /// Gauge colour for a device kind.
    pub fn kind(&self, kind: DeviceKind) -> Style {
        match kind {
            DeviceKind::Sink => self.sink,
            DeviceKind::Stream => self.stream,
            DeviceKind::Source => self.source,
            DeviceKind::Output | DeviceKind::Card => self.output,
        }
    }
}

fn parse_color(name: &str, value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        warn!("Unknown {} colour {:?}, using {:?}", name, value, fallback);
        fallback
    })
}
