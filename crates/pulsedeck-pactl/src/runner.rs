// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Running pactl.
//!
//! All calls block until the child exits. Callers on an async runtime are
//! expected to move them onto a blocking thread.

use crate::command::ControlCommand;
use crate::kind::DeviceKind;
use std::io;
use std::process::{Command, Output};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("{0} produced non UTF-8 output")]
    NotUtf8(String),
}

impl RunnerError {
    /// The executable itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Request/response contract with the sound server's control tool.
pub trait CommandRunner: Send + Sync {
    /// JSON listing for one kind.
    fn list(&self, kind: DeviceKind) -> Result<Vec<u8>, RunnerError>;

    /// Plain text listing for one kind.
    fn text_list(&self, kind: DeviceKind) -> Result<String, RunnerError>;

    /// Execute a mutation. Only success or failure is reported.
    fn run(&self, command: &ControlCommand) -> Result<(), RunnerError>;

    /// Execute a query and return its stdout.
    fn query(&self, command: &ControlCommand) -> Result<String, RunnerError>;
}

/// [`CommandRunner`] backed by the `pactl` and `kill` executables.
#[derive(Debug, Clone)]
pub struct Pactl {
    binary: String,
}

impl Default for Pactl {
    fn default() -> Self {
        Self::new()
    }
}

impl Pactl {
    pub fn new() -> Self {
        Self {
            binary: "pactl".to_string(),
        }
    }

    /// Use a different pactl binary (e.g. an absolute path).
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Check that pactl can be executed at all.
    pub fn check_available(&self) -> Result<(), RunnerError> {
        self.exec(&self.binary, &["--version".to_string()]).map(|_| ())
    }

    fn program_for<'a>(&'a self, command: &ControlCommand) -> &'a str {
        match command.program() {
            "pactl" => self.binary.as_str(),
            other => other,
        }
    }

    fn exec(&self, program: &str, args: &[String]) -> Result<Vec<u8>, RunnerError> {
        trace!("Running {} {}", program, args.join(" "));

        let output: Output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| RunnerError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("{} failed: {}", program, stderr.trim());
            return Err(RunnerError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    fn exec_command(&self, command: &ControlCommand) -> Result<Vec<u8>, RunnerError> {
        let args = command
            .args()
            .ok_or_else(|| RunnerError::InvalidCommand(format!("{:?}", command)))?;
        self.exec(self.program_for(command), &args)
    }
}

impl CommandRunner for Pactl {
    fn list(&self, kind: DeviceKind) -> Result<Vec<u8>, RunnerError> {
        let args = ["-f", "json", "list", kind.list_target()].map(String::from);
        self.exec(&self.binary, &args)
    }

    fn text_list(&self, kind: DeviceKind) -> Result<String, RunnerError> {
        let args = ["-f", "text", "list", kind.list_target()].map(String::from);
        let stdout = self.exec(&self.binary, &args)?;
        String::from_utf8(stdout).map_err(|_| RunnerError::NotUtf8(self.binary.clone()))
    }

    fn run(&self, command: &ControlCommand) -> Result<(), RunnerError> {
        self.exec_command(command).map(|_| ())
    }

    fn query(&self, command: &ControlCommand) -> Result<String, RunnerError> {
        let stdout = self.exec_command(command)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}
