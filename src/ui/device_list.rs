// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! One entry per device: header text plus a gauge per channel.

use super::theme::{Symbols, Theme};
use crate::config::DisplayLevel;
use crate::device::{Device, DeviceInfo, DeviceKind, DeviceRegistry, DeviceState};
use crate::state::navigation::ChannelMode;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{LineGauge, Paragraph};
use ratatui::Frame;

/// Gauges are full at this percentage; louder channels pin at full.
const FULL_SCALE: f64 = 100.0;
/// Channel marker, abbreviation and percentage in front of each gauge.
const LABEL_WIDTH: u16 = 10;

/// Truncate to `max` characters, marking the cut.
pub fn cut_text(s: &str, max: usize) -> String {
    const MARK: &str = " ..";
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(MARK.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(MARK);
    out
}

pub fn channel_abbrev(name: &str) -> &'static str {
    match name {
        "mono" => "M",
        "front-left" => "L",
        "front-right" => "R",
        "front-center" => "C",
        "rear-left" => "l",
        "rear-right" => "r",
        "rear-center" => "c",
        "lfe" => "S",
        _ => "A",
    }
}

fn state_icon(device: &Device, symbols: &Symbols) -> &'static str {
    if device.mute() == Some(true) {
        return symbols.muted;
    }
    match device.state() {
        Some(DeviceState::Running) => symbols.playing,
        Some(DeviceState::Idle) => symbols.idle,
        Some(DeviceState::Suspended) => symbols.suspended,
        _ => "",
    }
}

fn battery(level: &str) -> String {
    if level.is_empty() {
        String::new()
    } else {
        format!("{} ", level)
    }
}

/// Header lines above the gauges. Compact entries only carry the cursor.
pub fn header_text(
    device: &Device,
    level: DisplayLevel,
    registry: &DeviceRegistry,
    symbols: &Symbols,
) -> Vec<String> {
    if level == DisplayLevel::Compact {
        return vec![String::new()];
    }
    let detailed = level == DisplayLevel::Detailed;
    let muted = device.mute() == Some(true);

    match &device.info {
        DeviceInfo::Sink(e) | DeviceInfo::Source(e) => {
            let icon = state_icon(device, symbols);
            if !detailed {
                return vec![format!("{}{}{}", icon, battery(&e.battery), e.description)];
            }
            vec![
                format!("{}{}", battery(&e.battery), e.description),
                format!(
                    "{}{} #{} {} {}",
                    icon,
                    device.kind(),
                    device.index,
                    e.sample_spec,
                    e.port
                )
                .trim_end()
                .to_string(),
            ]
        }
        DeviceInfo::Stream(s) => {
            let icon = if muted { symbols.muted } else { symbols.playing };
            if !detailed {
                return vec![format!("{}{}", icon, device.display_name())];
            }
            let sink = s
                .sink
                .and_then(|index| registry.find(DeviceKind::Sink, index))
                .map(|sink| match &sink.info {
                    DeviceInfo::Sink(e) => format!("sink #{} {}", sink.index, e.port),
                    _ => String::new(),
                })
                .unwrap_or_default();
            vec![
                device.description().to_string(),
                format!("{}{} #{} {}", icon, s.binary, device.index, sink)
                    .trim_end()
                    .to_string(),
            ]
        }
        DeviceInfo::Output(o) => {
            let icon = if muted { symbols.muted } else { symbols.recording };
            if !detailed {
                return vec![format!("{}{}", icon, o.title)];
            }
            let source = o
                .source
                .and_then(|index| registry.find(DeviceKind::Source, index))
                .map(|source| match &source.info {
                    DeviceInfo::Source(e) => e.card_name.clone(),
                    _ => String::new(),
                })
                .unwrap_or_default();
            vec![
                o.title.clone(),
                format!(
                    "{}#{} {} {} {}µs",
                    icon, device.index, source, o.sample_spec, o.latency_usec
                ),
            ]
        }
        DeviceInfo::Card(c) => vec![c.description.clone()],
    }
}

/// Rows an entry occupies.
pub fn entry_height(device: &Device, level: DisplayLevel) -> u16 {
    level.header_rows() + device.channels().len() as u16
}

/// Draw one entry into `area`.
#[allow(clippy::too_many_arguments)]
pub fn render_entry(
    frame: &mut Frame,
    area: Rect,
    device: &Device,
    chosen: bool,
    channel: ChannelMode,
    level: DisplayLevel,
    registry: &DeviceRegistry,
    theme: &Theme,
    bar_width: u16,
) {
    let text_style = if chosen { theme.active } else { theme.inactive };
    let max = area.width as usize;
    let mut rows = area.rows();

    for (i, text) in header_text(device, level, registry, &theme.symbols)
        .into_iter()
        .enumerate()
    {
        let Some(row) = rows.next() else {
            return;
        };
        let text = if i == 0 && chosen {
            let prefix = theme.symbols.cursor_prefix;
            let suffix = theme.symbols.cursor_suffix;
            let budget = max.saturating_sub(prefix.chars().count() + suffix.chars().count());
            format!("{}{}{}", prefix, cut_text(&text, budget), suffix)
        } else {
            cut_text(&text, max)
        };
        frame.render_widget(Paragraph::new(Line::from(text).centered()).style(text_style), row);
    }

    let gauge_style = theme.kind(device.kind());
    for (i, ch) in device.channels().iter().enumerate() {
        let Some(row) = rows.next() else {
            return;
        };
        let focused = chosen && channel == ChannelMode::Single(i);
        let marker = if focused {
            theme.symbols.channel_marker
        } else {
            "  "
        };
        let label = format!("{}{} {:>4}%", marker, channel_abbrev(&ch.name), ch.percent);
        let [slot] = Layout::horizontal([Constraint::Length(bar_width + LABEL_WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        let gauge = LineGauge::default()
            .ratio((ch.percent as f64 / FULL_SCALE).clamp(0.0, 1.0))
            .label(label)
            .line_set(symbols::line::THICK)
            .style(if focused { theme.active } else { text_style })
            .filled_style(if focused { theme.active } else { gauge_style })
            .unfilled_style(theme.inactive);
        frame.render_widget(gauge, slot);
    }
}
