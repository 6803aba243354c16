// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The event loop.
//!
//! Ticks, terminal events and completions from the blocking pool all funnel
//! into one `select!`, so state is only ever touched from here.

use crate::config::Settings;
use crate::control::Job;
use crate::device;
use crate::keymap;
use crate::message::Message;
use crate::state::{AppState, Effect};
use crate::tui;
use crate::ui::{self, Theme};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use pulsedeck_pactl::CommandRunner;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("pactl not found in PATH, install pulseaudio-utils or pipewire-pulse")]
    MissingPactl,
    #[error("{0}")]
    TerminalTooSmall(String),
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

pub struct App {
    state: AppState,
    theme: Theme,
    runner: Arc<dyn CommandRunner>,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    refresh_in_flight: bool,
    refresh_pending: bool,
    /// Screen mode to switch to before the next draw.
    screen_change: Option<bool>,
}

impl App {
    pub fn new(settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            theme: Theme::from_settings(&settings),
            state: AppState::new(settings),
            runner,
            tx,
            rx,
            refresh_in_flight: false,
            refresh_pending: false,
            screen_change: None,
        }
    }

    /// Status line shown until the first action replaces it.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.state.set_status(status);
        self
    }

    /// Run until the user quits or the terminal becomes unusable.
    pub async fn run(mut self, terminal: &mut Tui) -> Result<(), AppError> {
        let (width, height) = crossterm::terminal::size()?;
        let effects = self.state.resize(width, height);
        self.apply(effects)?;

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.state.settings().refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if let Some(fullscreen) = self.screen_change.take() {
                tui::set_fullscreen(terminal, fullscreen)?;
            }
            terminal.draw(|frame| ui::render(frame, &self.state, &self.theme))?;

            let message = tokio::select! {
                _ = ticker.tick() => Some(Message::Tick),
                Some(message) = self.rx.recv() => Some(message),
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        keymap::action_for(&key).map(Message::Key)
                    }
                    Some(Ok(Event::Resize(width, height))) => Some(Message::Resized(width, height)),
                    Some(Ok(_)) => None,
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        info!("Terminal event stream closed");
                        return Ok(());
                    }
                },
            };

            let Some(message) = message else {
                continue;
            };
            let effects = self.update(message);
            if !self.apply(effects)? {
                return Ok(());
            }
        }
    }

    /// Fold one message into the state.
    fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Tick => vec![Effect::Refresh],
            Message::Key(action) => self.state.handle(action),
            Message::Resized(width, height) => self.state.resize(width, height),
            Message::Refreshed(snapshot) => {
                self.refresh_in_flight = false;
                self.state.apply_snapshot(snapshot);
                if std::mem::take(&mut self.refresh_pending) {
                    vec![Effect::Refresh]
                } else {
                    Vec::new()
                }
            }
            Message::RefreshFailed => {
                self.refresh_in_flight = false;
                Vec::new()
            }
            Message::JobFinished(status) => {
                self.state.set_status(status);
                vec![Effect::Refresh]
            }
        }
    }

    /// Carry out effects. Returns `Ok(false)` when the loop should stop.
    fn apply(&mut self, effects: Vec<Effect>) -> Result<bool, AppError> {
        for effect in effects {
            match effect {
                Effect::Refresh => self.request_refresh(),
                Effect::Run(job) => self.spawn_job(job),
                Effect::SetFullscreen(fullscreen) => self.screen_change = Some(fullscreen),
                Effect::Quit => return Ok(false),
                Effect::Halt(reason) => return Err(AppError::TerminalTooSmall(reason)),
            }
        }
        Ok(true)
    }

    /// Start a refresh unless one is already running, in which case one more
    /// is queued behind it.
    fn request_refresh(&mut self) {
        if self.refresh_in_flight {
            self.refresh_pending = true;
            return;
        }
        self.refresh_in_flight = true;

        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || device::collect(runner.as_ref())).await;
            let message = match result {
                Ok(snapshot) => Message::Refreshed(snapshot),
                Err(e) => {
                    error!("Refresh task failed: {}", e);
                    Message::RefreshFailed
                }
            };
            // The loop is gone when the send fails; nothing left to update.
            let _ = tx.send(message);
        });
    }

    fn spawn_job(&self, job: Job) {
        debug!("Spawning {:?}", job);
        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let status = job.execute(runner.as_ref());
            let _ = tx.send(Message::JobFinished(status));
        });
    }
}
