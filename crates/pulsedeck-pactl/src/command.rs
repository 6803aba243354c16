// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Control commands understood by the runner.

use crate::kind::DeviceKind;
use std::fmt;

/// Driver reported by streams that belong to a loopback module.
pub const LOOPBACK_DRIVER: &str = "module-loopback.c";

/// Module name passed to `load-module` / `unload-module`.
pub const LOOPBACK_MODULE: &str = "module-loopback";

/// A single mutation or query against the sound server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    SetDefaultSink(u32),
    SetDefaultSource(u32),
    /// Suspend (`true`) or resume (`false`) a sink or source.
    Suspend {
        kind: DeviceKind,
        index: u32,
        suspend: bool,
    },
    MoveStream {
        stream: u32,
        sink: u32,
    },
    MoveOutput {
        output: u32,
        source: u32,
    },
    LoadLoopback {
        source: u32,
        sink: u32,
        latency_ms: u32,
    },
    /// Unload a module by id, or every instance when given a module name.
    UnloadModule(String),
    /// One volume argument per channel, e.g. `+5%`, `-0%` or `40%`.
    SetVolume {
        kind: DeviceKind,
        index: u32,
        volumes: Vec<String>,
    },
    ToggleMute {
        kind: DeviceKind,
        index: u32,
    },
    GetMute {
        kind: DeviceKind,
        index: u32,
    },
    /// SIGKILL the process owning a stream.
    KillProcess(String),
}

impl ControlCommand {
    /// Executable that carries out the command.
    pub fn program(&self) -> &'static str {
        match self {
            Self::KillProcess(_) => "kill",
            _ => "pactl",
        }
    }

    /// Arguments after the program name.
    ///
    /// Commands that make no sense for the given kind (muting a card,
    /// suspending a stream) yield `None`.
    pub fn args(&self) -> Option<Vec<String>> {
        let args = match self {
            Self::SetDefaultSink(index) => vec!["set-default-sink".into(), index.to_string()],
            Self::SetDefaultSource(index) => {
                vec!["set-default-source".into(), index.to_string()]
            }
            Self::Suspend {
                kind,
                index,
                suspend,
            } => vec![
                kind.suspend_verb()?.into(),
                index.to_string(),
                (if *suspend { "1" } else { "0" }).to_string(),
            ],
            Self::MoveStream { stream, sink } => {
                vec!["move-sink-input".into(), stream.to_string(), sink.to_string()]
            }
            Self::MoveOutput { output, source } => vec![
                "move-source-output".into(),
                output.to_string(),
                source.to_string(),
            ],
            Self::LoadLoopback {
                source,
                sink,
                latency_ms,
            } => vec![
                "load-module".into(),
                LOOPBACK_MODULE.into(),
                format!("latency_msec={}", latency_ms),
                format!("sink={}", sink),
                format!("source={}", source),
            ],
            Self::UnloadModule(module) => vec!["unload-module".into(), module.clone()],
            Self::SetVolume {
                kind,
                index,
                volumes,
            } => {
                if volumes.is_empty() {
                    return None;
                }
                let mut args = vec![kind.volume_verb()?.to_string(), index.to_string()];
                args.extend(volumes.iter().cloned());
                args
            }
            Self::ToggleMute { kind, index } => {
                vec![kind.mute_verb()?.into(), index.to_string(), "toggle".into()]
            }
            Self::GetMute { kind, index } => {
                vec![kind.mute_query_verb()?.into(), index.to_string()]
            }
            Self::KillProcess(pid) => {
                if pid.is_empty() || !pid.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                vec!["-9".into(), pid.clone()]
            }
        };
        Some(args)
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.args() {
            Some(args) => write!(f, "{} {}", self.program(), args.join(" ")),
            None => write!(f, "{} <invalid {:?}>", self.program(), self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_arguments() {
        let cmd = ControlCommand::LoadLoopback {
            source: 3,
            sink: 1,
            latency_ms: 40,
        };
        assert_eq!(
            cmd.to_string(),
            "pactl load-module module-loopback latency_msec=40 sink=1 source=3"
        );
    }

    #[test]
    fn test_suspend_only_for_endpoints() {
        let sink = ControlCommand::Suspend {
            kind: DeviceKind::Sink,
            index: 2,
            suspend: true,
        };
        assert_eq!(
            sink.args(),
            Some(vec!["suspend-sink".into(), "2".into(), "1".into()])
        );
        let stream = ControlCommand::Suspend {
            kind: DeviceKind::Stream,
            index: 2,
            suspend: false,
        };
        assert_eq!(stream.args(), None);
    }

    #[test]
    fn test_volume_per_channel() {
        let cmd = ControlCommand::SetVolume {
            kind: DeviceKind::Output,
            index: 8,
            volumes: vec!["+5%".into(), "+0%".into()],
        };
        assert_eq!(cmd.to_string(), "pactl set-source-output-volume 8 +5% +0%");
    }

    #[test]
    fn test_kill_requires_numeric_pid() {
        assert_eq!(ControlCommand::KillProcess(String::new()).args(), None);
        assert_eq!(ControlCommand::KillProcess("12; rm".into()).args(), None);
        let kill = ControlCommand::KillProcess("4242".into());
        assert_eq!(kill.program(), "kill");
        assert_eq!(kill.args(), Some(vec!["-9".into(), "4242".into()]));
    }

    #[test]
    fn test_mute_query_only_for_endpoints() {
        let query = ControlCommand::GetMute {
            kind: DeviceKind::Stream,
            index: 1,
        };
        assert!(query.args().is_none());
    }
}
