// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Application state and the key-driven state machine.
//!
//! Everything here runs on the event loop. Work that touches pactl is handed
//! back to the caller as an [`Effect`].

pub mod navigation;
pub mod reconcile;
pub mod selection;

use crate::config::{DisplayLevel, Settings};
use crate::control::Job;
use crate::device::{Device, DeviceKind, DeviceRegistry, Snapshot};
use crate::keymap::Action;
use navigation::{ChannelMode, Cursor, Pagination};
use reconcile::reconcile;
use selection::{resolve, Selection};
use tracing::debug;

/// Smallest usable terminal.
pub const MIN_WIDTH: u16 = 45;
pub const MIN_HEIGHT: u16 = 8;

/// Border, title, selection line, blank, pager, blank and help.
const CHROME_ROWS: u16 = 8;

pub const LATENCY_MIN_MS: u32 = 10;
pub const LATENCY_MAX_MS: u32 = 500;
pub const LATENCY_STEP_MS: u32 = 10;

/// Side effects requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    Run(Job),
    /// Enter (`true`) or leave the alternate screen.
    SetFullscreen(bool),
    Quit,
    /// Exit with a message for the user.
    Halt(String),
}

/// Terminal-derived sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    /// Width of entry text.
    pub content_width: u16,
    pub bar_width: u16,
}

pub struct AppState {
    settings: Settings,
    pub registry: DeviceRegistry,
    pub cursor: Cursor,
    pub pagination: Pagination,
    pub selection: Option<Selection>,
    pub status: String,
    pub display: DisplayLevel,
    pub latency_ms: u32,
    pub layout: Layout,
    pub show_messages: bool,
    pub full_help: bool,
    pub fullscreen: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            cursor: Cursor::default(),
            pagination: Pagination::new(settings.items),
            selection: None,
            status: String::new(),
            display: settings.device_display,
            latency_ms: LATENCY_MIN_MS,
            layout: Layout::default(),
            show_messages: settings.show_messages,
            full_help: false,
            fullscreen: settings.fullscreen,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Device under the cursor, if the list is not empty.
    pub fn cursor_device(&self) -> Option<&Device> {
        self.registry
            .get(self.cursor.position)
            .filter(|device| device.kind().is_navigable())
    }

    /// Install a freshly collected generation.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.registry.replace(snapshot);
        if self.layout.height > 0 {
            self.fit_pages();
        } else {
            self.reconcile();
        }
    }

    fn reconcile(&mut self) {
        reconcile(&mut self.cursor, &mut self.pagination, &self.registry);
    }

    /// Recompute layout for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) -> Vec<Effect> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return vec![Effect::Halt(format!(
                "pulsedeck exit: terminal is {}x{}, needs at least {}x{}",
                width, height, MIN_WIDTH, MIN_HEIGHT
            ))];
        }

        let content_width = width.saturating_sub(4).min(self.settings.width);
        self.layout = Layout {
            width,
            height,
            content_width,
            bar_width: content_width / 4 * 3,
        };
        self.fit_pages();
        Vec::new()
    }

    /// Size pages so that every entry fits, budgeting for the device with the
    /// most channels plus a blank separator row.
    fn fit_pages(&mut self) {
        let channels = self
            .registry
            .navigable()
            .iter()
            .map(|device| device.channels().len())
            .max()
            .unwrap_or(0)
            .max(1);
        let channels = u16::try_from(channels).unwrap_or(u16::MAX);
        let rows_per_entry = self
            .display
            .header_rows()
            .saturating_add(channels)
            .saturating_add(1);
        let fits = self.layout.height.saturating_sub(CHROME_ROWS) / rows_per_entry;
        let per_page = (fits as usize).clamp(1, self.settings.items.max(1));
        self.pagination.set_per_page(per_page);
        self.reconcile();
    }

    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Move(movement) => {
                let len = self.registry.counts().navigable_total();
                if self.cursor.apply(&mut self.pagination, len, movement) {
                    vec![Effect::Refresh]
                } else {
                    Vec::new()
                }
            }
            Action::Select => {
                match self.cursor_device() {
                    Some(device) => {
                        let selection = Selection::arm(device);
                        self.status = format!("{} #{} selected", selection.kind, selection.index);
                        self.selection = Some(selection);
                    }
                    None => self.status = "nothing to select".to_string(),
                }
                Vec::new()
            }
            Action::Perform => self.perform(),
            Action::Escape => {
                self.selection = None;
                self.cursor.channel = ChannelMode::All;
                self.status.clear();
                vec![Effect::Refresh]
            }
            Action::Mute => match self.cursor_device().and_then(Job::toggle_mute) {
                Some(job) => vec![Effect::Run(job)],
                None => Vec::new(),
            },
            Action::VolumeUp | Action::VolumeDown => {
                let Some(device) = self.cursor_device() else {
                    return Vec::new();
                };
                let job = Job::volume_step(
                    device,
                    self.cursor.channel,
                    self.settings.volume_step,
                    self.settings.volume_limit,
                    action == Action::VolumeUp,
                );
                self.run_or_report(job)
            }
            Action::SetVolume(percent) => {
                let Some(device) = self.cursor_device() else {
                    return Vec::new();
                };
                let job = Job::set_volume(device, percent);
                self.cursor.channel = ChannelMode::All;
                self.run_or_report(job)
            }
            Action::CycleChannel => {
                let Some(device) = self.cursor_device() else {
                    return Vec::new();
                };
                let channels = device.channels();
                let mode = self.cursor.channel.next(channels.len());
                self.status = match mode {
                    ChannelMode::All => "all channels".to_string(),
                    ChannelMode::Single(i) => format!(
                        "channel {} (balance {:.2})",
                        channels[i].name,
                        device.balance()
                    ),
                };
                self.cursor.channel = mode;
                Vec::new()
            }
            Action::Kill => {
                let Some(device) = self.cursor_device() else {
                    return Vec::new();
                };
                let job = Job::kill(device);
                self.run_or_report(job)
            }
            Action::UnloadLoopbacks => {
                self.selection = None;
                vec![Effect::Run(Job::unload_loopbacks())]
            }
            Action::LatencyUp => {
                self.latency_ms = if self.latency_ms + LATENCY_STEP_MS > LATENCY_MAX_MS {
                    LATENCY_MIN_MS
                } else {
                    self.latency_ms + LATENCY_STEP_MS
                };
                self.status = format!("loopback latency {} ms", self.latency_ms);
                Vec::new()
            }
            Action::LatencyDown => {
                self.latency_ms = if self.latency_ms < LATENCY_MIN_MS + LATENCY_STEP_MS {
                    LATENCY_MAX_MS
                } else {
                    self.latency_ms - LATENCY_STEP_MS
                };
                self.status = format!("loopback latency {} ms", self.latency_ms);
                Vec::new()
            }
            Action::CycleDisplay => {
                self.display = self.display.next();
                self.status = format!("display level {}", self.display.level());
                if self.layout.height > 0 {
                    self.fit_pages();
                }
                Vec::new()
            }
            Action::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                self.status = if self.fullscreen { "fullscreen" } else { "inline" }.to_string();
                vec![Effect::SetFullscreen(self.fullscreen)]
            }
            Action::ToggleMessages => {
                self.show_messages = !self.show_messages;
                Vec::new()
            }
            Action::ToggleHelp => {
                self.full_help = !self.full_help;
                Vec::new()
            }
            Action::Refresh => vec![Effect::Refresh],
            Action::Quit => vec![Effect::Quit],
        }
    }

    fn perform(&mut self) -> Vec<Effect> {
        let Some(target) = self.cursor_device() else {
            return Vec::new();
        };

        match resolve(self.selection.as_ref(), target) {
            Ok(dispatch) => {
                debug!("Dispatching {:?}", dispatch);
                let streams: Vec<u32> = self
                    .registry
                    .of_kind(DeviceKind::Stream)
                    .map(|stream| stream.index)
                    .collect();
                let job = Job::from_dispatch(&dispatch, &streams, self.latency_ms);
                self.selection = None;
                vec![Effect::Run(job)]
            }
            Err(rejection) => {
                debug!("Dispatch rejected: {}", rejection);
                self.status = rejection.to_string();
                Vec::new()
            }
        }
    }

    fn run_or_report(&mut self, job: Result<Job, String>) -> Vec<Effect> {
        match job {
            Ok(job) => vec![Effect::Run(job)],
            Err(message) => {
                self.status = message;
                Vec::new()
            }
        }
    }
}
