// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Normalized device model.

pub use pulsedeck_pactl::DeviceKind;
use pulsedeck_pactl::LOOPBACK_DRIVER;

/// Sink/source run state as reported by pactl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    Running,
    Idle,
    Suspended,
    #[default]
    Unknown,
}

impl DeviceState {
    pub fn parse(s: &str) -> Self {
        match s {
            "RUNNING" => Self::Running,
            "IDLE" => Self::Idle,
            "SUSPENDED" => Self::Suspended,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Idle => "idle",
            Self::Suspended => "suspended",
            Self::Unknown => "unknown",
        }
    }
}

/// One channel and its volume in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub percent: u32,
}

/// Attributes shared by sinks and sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub description: String,
    pub state: DeviceState,
    pub sample_spec: String,
    pub card_name: String,
    pub port: String,
    pub bus: String,
    pub battery: String,
    pub device_string: String,
    pub channels: Vec<Channel>,
    pub mute: bool,
    pub balance: f64,
}

/// An application's playback connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    /// Process binary name.
    pub binary: String,
    /// Media title, recovered from the text listing when possible.
    pub title: String,
    pub sink: Option<u32>,
    pub pid: String,
    pub channels: Vec<Channel>,
    pub mute: bool,
    pub balance: f64,
}

/// An application's capture connection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputInfo {
    pub title: String,
    pub icon: String,
    pub source: Option<u32>,
    pub sample_spec: String,
    pub latency_usec: f64,
    pub pid: String,
    pub channels: Vec<Channel>,
    pub mute: bool,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardInfo {
    pub description: String,
    pub battery: String,
}

/// Kind-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceInfo {
    Sink(Endpoint),
    Stream(StreamInfo),
    Source(Endpoint),
    Output(OutputInfo),
    Card(CardInfo),
}

/// A normalized pactl record.
///
/// Devices are rebuilt from scratch on every refresh; nothing holds on to one
/// across generations.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Position in the registry of the generation that produced it.
    pub ordinal: usize,
    /// pactl index, unique within the kind.
    pub index: u32,
    pub driver: String,
    /// Owning module id, used to unload loopbacks.
    pub module: String,
    pub info: DeviceInfo,
}

impl Device {
    pub fn kind(&self) -> DeviceKind {
        match self.info {
            DeviceInfo::Sink(_) => DeviceKind::Sink,
            DeviceInfo::Stream(_) => DeviceKind::Stream,
            DeviceInfo::Source(_) => DeviceKind::Source,
            DeviceInfo::Output(_) => DeviceKind::Output,
            DeviceInfo::Card(_) => DeviceKind::Card,
        }
    }

    /// Short identifier: card name for endpoints, binary for streams,
    /// media name for outputs.
    pub fn name(&self) -> &str {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => &e.name,
            DeviceInfo::Stream(s) => &s.binary,
            DeviceInfo::Output(o) => &o.title,
            DeviceInfo::Card(_) => "",
        }
    }

    pub fn description(&self) -> &str {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => &e.description,
            DeviceInfo::Stream(s) => &s.title,
            DeviceInfo::Output(o) => &o.icon,
            DeviceInfo::Card(c) => &c.description,
        }
    }

    /// Best label for status lines.
    pub fn display_name(&self) -> &str {
        let preferred = match self.kind() {
            DeviceKind::Output => self.name(),
            _ => self.description(),
        };
        if !preferred.is_empty() {
            preferred
        } else if !self.name().is_empty() {
            self.name()
        } else {
            self.description()
        }
    }

    pub fn channels(&self) -> &[Channel] {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => &e.channels,
            DeviceInfo::Stream(s) => &s.channels,
            DeviceInfo::Output(o) => &o.channels,
            DeviceInfo::Card(_) => &[],
        }
    }

    /// Mute flag; cards have none.
    pub fn mute(&self) -> Option<bool> {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => Some(e.mute),
            DeviceInfo::Stream(s) => Some(s.mute),
            DeviceInfo::Output(o) => Some(o.mute),
            DeviceInfo::Card(_) => None,
        }
    }

    pub fn balance(&self) -> f64 {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => e.balance,
            DeviceInfo::Stream(s) => s.balance,
            DeviceInfo::Output(o) => o.balance,
            DeviceInfo::Card(_) => 0.0,
        }
    }

    /// Run state, only meaningful for sinks and sources.
    pub fn state(&self) -> Option<DeviceState> {
        match &self.info {
            DeviceInfo::Sink(e) | DeviceInfo::Source(e) => Some(e.state),
            _ => None,
        }
    }

    /// Index of the sink a stream plays to, or the source an output reads.
    pub fn link_index(&self) -> Option<u32> {
        match &self.info {
            DeviceInfo::Stream(s) => s.sink,
            DeviceInfo::Output(o) => o.source,
            _ => None,
        }
    }

    pub fn pid(&self) -> Option<&str> {
        match &self.info {
            DeviceInfo::Stream(s) if !s.pid.is_empty() => Some(&s.pid),
            DeviceInfo::Output(o) if !o.pid.is_empty() => Some(&o.pid),
            _ => None,
        }
    }

    /// Streams created by module-loopback have no process of their own.
    pub fn is_loopback(&self) -> bool {
        self.driver == LOOPBACK_DRIVER
    }
}

/// Per-kind record counts of one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCount {
    pub sinks: usize,
    pub streams: usize,
    pub sources: usize,
    pub outputs: usize,
    pub cards: usize,
}

impl DeviceCount {
    pub fn record(&mut self, kind: DeviceKind) {
        match kind {
            DeviceKind::Sink => self.sinks += 1,
            DeviceKind::Stream => self.streams += 1,
            DeviceKind::Source => self.sources += 1,
            DeviceKind::Output => self.outputs += 1,
            DeviceKind::Card => self.cards += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.sinks + self.streams + self.sources + self.outputs + self.cards
    }

    /// Devices reachable by the cursor.
    pub fn navigable_total(&self) -> usize {
        self.total() - self.cards
    }
}

/// Result of one refresh: the complete device list and its counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub devices: Vec<Device>,
    pub counts: DeviceCount,
}
