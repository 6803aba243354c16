// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scripted [`CommandRunner`] for unit tests.

use pulsedeck_pactl::{CommandRunner, ControlCommand, DeviceKind, RunnerError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned listings and records every command it is asked to run.
///
/// Kinds without a canned listing fail like an unreachable server would.
#[derive(Default)]
pub struct FakeRunner {
    listings: HashMap<DeviceKind, String>,
    texts: HashMap<DeviceKind, String>,
    query_reply: String,
    failing: Vec<ControlCommand>,
    issued: Mutex<Vec<ControlCommand>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, kind: DeviceKind, json: &str) -> Self {
        self.listings.insert(kind, json.to_string());
        self
    }

    pub fn with_text(mut self, kind: DeviceKind, text: &str) -> Self {
        self.texts.insert(kind, text.to_string());
        self
    }

    pub fn with_query_reply(mut self, reply: &str) -> Self {
        self.query_reply = reply.to_string();
        self
    }

    /// Make `command` fail when run.
    pub fn failing(mut self, command: ControlCommand) -> Self {
        self.failing.push(command);
        self
    }

    pub fn issued(&self) -> Vec<ControlCommand> {
        self.issued.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, command: &ControlCommand) -> Result<(), RunnerError> {
        if let Ok(mut issued) = self.issued.lock() {
            issued.push(command.clone());
        }
        if self.failing.contains(command) {
            return Err(RunnerError::Failed {
                program: command.program().to_string(),
                status: "exit status: 1".to_string(),
                stderr: "Failure: No such entity".to_string(),
            });
        }
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    fn list(&self, kind: DeviceKind) -> Result<Vec<u8>, RunnerError> {
        self.listings
            .get(&kind)
            .map(|json| json.clone().into_bytes())
            .ok_or_else(|| RunnerError::Failed {
                program: "pactl".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "Connection failure: Connection refused".to_string(),
            })
    }

    fn text_list(&self, kind: DeviceKind) -> Result<String, RunnerError> {
        Ok(self.texts.get(&kind).cloned().unwrap_or_default())
    }

    fn run(&self, command: &ControlCommand) -> Result<(), RunnerError> {
        self.record(command)
    }

    fn query(&self, command: &ControlCommand) -> Result<String, RunnerError> {
        self.record(command)?;
        Ok(self.query_reply.clone())
    }
}
