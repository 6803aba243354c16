// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Control jobs.
//!
//! A job is a short batch of pactl commands built on the event loop and run
//! on the blocking pool. It never touches application state; its only output
//! is the status line it reports back.

use crate::device::{Device, DeviceKind};
use crate::state::navigation::ChannelMode;
use crate::state::selection::Dispatch;
use pulsedeck_pactl::{CommandRunner, ControlCommand, LOOPBACK_MODULE};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Run `steps` in order, stopping at the first failure. `follow_up`
    /// commands are best effort and do not affect the reported outcome.
    Run {
        steps: Vec<ControlCommand>,
        follow_up: Vec<ControlCommand>,
        success: String,
        failure: String,
    },
    /// Toggle mute, then ask the server what the flag ended up as.
    ToggleMute {
        kind: DeviceKind,
        index: u32,
        name: String,
    },
}

impl Job {
    fn single(command: ControlCommand, success: String, failure: &str) -> Self {
        Self::Run {
            steps: vec![command],
            follow_up: Vec::new(),
            success,
            failure: failure.to_string(),
        }
    }

    /// Job for a resolved dispatch. `streams` are the indexes of all current
    /// streams, moved along when the default sink changes.
    pub fn from_dispatch(dispatch: &Dispatch, streams: &[u32], latency_ms: u32) -> Self {
        match dispatch {
            Dispatch::SetDefaultSink { sink, name } => Self::Run {
                steps: vec![ControlCommand::SetDefaultSink(*sink)],
                follow_up: streams
                    .iter()
                    .map(|&stream| ControlCommand::MoveStream {
                        stream,
                        sink: *sink,
                    })
                    .collect(),
                success: format!("default sink: {}", name),
                failure: "could not set default sink".to_string(),
            },
            Dispatch::SetDefaultSource { source, name } => Self::single(
                ControlCommand::SetDefaultSource(*source),
                format!("default source: {}", name),
                "could not set default source",
            ),
            Dispatch::Suspend {
                kind,
                index,
                suspend,
                name,
            } => Self::single(
                ControlCommand::Suspend {
                    kind: *kind,
                    index: *index,
                    suspend: *suspend,
                },
                format!(
                    "{} {}",
                    name,
                    if *suspend { "suspended" } else { "resumed" }
                ),
                if *suspend {
                    "could not suspend device"
                } else {
                    "could not resume device"
                },
            ),
            Dispatch::MoveStream { stream, sink, name } => Self::single(
                ControlCommand::MoveStream {
                    stream: *stream,
                    sink: *sink,
                },
                format!("stream moved to {}", name),
                "could not move stream",
            ),
            Dispatch::Loopback { source, sink, name } => Self::single(
                ControlCommand::LoadLoopback {
                    source: *source,
                    sink: *sink,
                    latency_ms,
                },
                format!("loopback to {} ({} ms)", name, latency_ms),
                "could not load loopback",
            ),
            Dispatch::MoveOutput {
                output,
                source,
                name,
            } => Self::single(
                ControlCommand::MoveOutput {
                    output: *output,
                    source: *source,
                },
                format!("output moved to {}", name),
                "could not move output",
            ),
        }
    }

    pub fn toggle_mute(device: &Device) -> Option<Self> {
        device.mute()?;
        Some(Self::ToggleMute {
            kind: device.kind(),
            index: device.index,
            name: device.display_name().to_string(),
        })
    }

    /// Relative volume change by `step` percent on the channels `mode`
    /// selects. Raising stops at `limit`, lowering at 0.
    pub fn volume_step(
        device: &Device,
        mode: ChannelMode,
        step: u32,
        limit: u32,
        raise: bool,
    ) -> Result<Self, String> {
        let channels = device.channels();
        if channels.is_empty() {
            return Err(format!("{} has no volume", device.display_name()));
        }

        let deltas: Vec<u32> = channels
            .iter()
            .enumerate()
            .map(|(i, channel)| {
                if !mode.targets(i) {
                    0
                } else if raise {
                    step.min(limit.saturating_sub(channel.percent))
                } else {
                    step.min(channel.percent)
                }
            })
            .collect();

        if deltas.iter().all(|&d| d == 0) {
            return Err(if raise {
                format!("volume limit of {}% reached", limit)
            } else {
                "volume already at 0%".to_string()
            });
        }

        let sign = if raise { '+' } else { '-' };
        Ok(Self::single(
            ControlCommand::SetVolume {
                kind: device.kind(),
                index: device.index,
                volumes: deltas.iter().map(|d| format!("{}{}%", sign, d)).collect(),
            },
            format!(
                "{} volume {}",
                device.display_name(),
                if raise { "up" } else { "down" }
            ),
            "could not change volume",
        ))
    }

    /// Set every channel to `percent`.
    pub fn set_volume(device: &Device, percent: u32) -> Result<Self, String> {
        if device.channels().is_empty() {
            return Err(format!("{} has no volume", device.display_name()));
        }
        Ok(Self::single(
            ControlCommand::SetVolume {
                kind: device.kind(),
                index: device.index,
                volumes: vec![format!("{}%", percent)],
            },
            format!("{} volume {}%", device.display_name(), percent),
            "could not set volume",
        ))
    }

    /// Remove a stream or output: unload its loopback module, or kill the
    /// owning process.
    pub fn kill(device: &Device) -> Result<Self, String> {
        if !device.kind().is_connection() {
            return Err(format!("a {} cannot be killed", device.kind()));
        }
        let name = device.display_name();

        if device.is_loopback() {
            if device.module.is_empty() {
                return Err(format!("no module owns {}", name));
            }
            return Ok(Self::single(
                ControlCommand::UnloadModule(device.module.clone()),
                format!("loopback {} unloaded", device.module),
                "could not unload loopback",
            ));
        }

        match device.pid() {
            Some(pid) => Ok(Self::single(
                ControlCommand::KillProcess(pid.to_string()),
                format!("{} killed", name),
                "could not kill process",
            )),
            None => Err(format!("no process id for {}", name)),
        }
    }

    pub fn unload_loopbacks() -> Self {
        Self::single(
            ControlCommand::UnloadModule(LOOPBACK_MODULE.to_string()),
            "loopbacks unloaded".to_string(),
            "no loopback to unload",
        )
    }

    /// Run the job and describe the outcome in one line.
    pub fn execute(&self, runner: &dyn CommandRunner) -> String {
        match self {
            Self::Run {
                steps,
                follow_up,
                success,
                failure,
            } => {
                for command in steps {
                    info!("{}", command);
                    if let Err(e) = runner.run(command) {
                        warn!("{} failed: {}", command, e);
                        return format!("{}: {}", failure, e);
                    }
                }
                for command in follow_up {
                    info!("{}", command);
                    if let Err(e) = runner.run(command) {
                        warn!("{} failed: {}", command, e);
                    }
                }
                success.clone()
            }
            Self::ToggleMute { kind, index, name } => {
                let toggle = ControlCommand::ToggleMute {
                    kind: *kind,
                    index: *index,
                };
                info!("{}", toggle);
                if let Err(e) = runner.run(&toggle) {
                    warn!("{} failed: {}", toggle, e);
                    return format!("could not toggle mute: {}", e);
                }

                let query = ControlCommand::GetMute {
                    kind: *kind,
                    index: *index,
                };
                if query.args().is_none() {
                    return format!("mute toggled for {}", name);
                }
                match runner.query(&query) {
                    Ok(reply) if reply.contains("yes") => format!("{} muted", name),
                    Ok(reply) if reply.contains("no") => format!("{} unmuted", name),
                    Ok(_) => format!("mute toggled for {}", name),
                    Err(e) => {
                        warn!("{} failed: {}", query, e);
                        format!("mute toggled for {}", name)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Channel, DeviceInfo, Endpoint, StreamInfo};
    use crate::testing::FakeRunner;

    fn sink(percents: &[u32]) -> Device {
        Device {
            ordinal: 0,
            index: 3,
            driver: String::new(),
            module: String::new(),
            info: DeviceInfo::Sink(Endpoint {
                description: "Speakers".to_string(),
                channels: percents
                    .iter()
                    .enumerate()
                    .map(|(i, &percent)| Channel {
                        name: format!("ch{}", i),
                        percent,
                    })
                    .collect(),
                ..Endpoint::default()
            }),
        }
    }

    fn stream(driver: &str, module: &str, pid: &str) -> Device {
        Device {
            ordinal: 1,
            index: 12,
            driver: driver.to_string(),
            module: module.to_string(),
            info: DeviceInfo::Stream(StreamInfo {
                binary: "mpv".to_string(),
                pid: pid.to_string(),
                ..StreamInfo::default()
            }),
        }
    }

    fn volumes(job: &Job) -> Vec<String> {
        match job {
            Job::Run { steps, .. } => match &steps[0] {
                ControlCommand::SetVolume { volumes, .. } => volumes.clone(),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_volume_up_is_capped_per_channel() {
        let job = Job::volume_step(&sink(&[108, 90]), ChannelMode::All, 5, 110, true).unwrap();
        assert_eq!(volumes(&job), vec!["+2%", "+5%"]);
    }

    #[test]
    fn test_volume_step_on_single_channel() {
        let job =
            Job::volume_step(&sink(&[50, 50]), ChannelMode::Single(1), 5, 110, false).unwrap();
        assert_eq!(volumes(&job), vec!["-0%", "-5%"]);
    }

    #[test]
    fn test_volume_at_bounds_issues_nothing() {
        assert!(Job::volume_step(&sink(&[110, 110]), ChannelMode::All, 5, 110, true).is_err());
        assert!(Job::volume_step(&sink(&[0]), ChannelMode::All, 5, 110, false).is_err());
        assert!(Job::volume_step(&sink(&[]), ChannelMode::All, 5, 110, true).is_err());
    }

    #[test]
    fn test_kill_prefers_loopback_module() {
        let job = Job::kill(&stream("module-loopback.c", "31", "")).unwrap();
        let runner = FakeRunner::new();
        job.execute(&runner);
        assert_eq!(
            runner.issued(),
            vec![ControlCommand::UnloadModule("31".to_string())]
        );

        let job = Job::kill(&stream("protocol-native.c", "9", "4242")).unwrap();
        let runner = FakeRunner::new();
        assert_eq!(job.execute(&runner), "mpv killed");
        assert_eq!(
            runner.issued(),
            vec![ControlCommand::KillProcess("4242".to_string())]
        );

        assert!(Job::kill(&stream("protocol-native.c", "9", "")).is_err());
        assert!(Job::kill(&sink(&[50])).is_err());
    }

    #[test]
    fn test_default_sink_moves_streams_best_effort() {
        let dispatch = Dispatch::SetDefaultSink {
            sink: 1,
            name: "Speakers".to_string(),
        };
        let job = Job::from_dispatch(&dispatch, &[10, 11], 40);
        let runner = FakeRunner::new().failing(ControlCommand::MoveStream { stream: 10, sink: 1 });

        assert_eq!(job.execute(&runner), "default sink: Speakers");
        assert_eq!(runner.issued().len(), 3);
    }

    #[test]
    fn test_failure_is_reported_and_stops() {
        let dispatch = Dispatch::MoveStream {
            stream: 10,
            sink: 2,
            name: "Headset".to_string(),
        };
        let job = Job::from_dispatch(&dispatch, &[], 40);
        let runner = FakeRunner::new().failing(ControlCommand::MoveStream { stream: 10, sink: 2 });
        let status = job.execute(&runner);
        assert!(status.starts_with("could not move stream"));
    }

    #[test]
    fn test_mute_requeries_endpoints() {
        let job = Job::toggle_mute(&sink(&[50])).unwrap();
        let runner = FakeRunner::new().with_query_reply("Mute: yes\n");
        assert_eq!(job.execute(&runner), "Speakers muted");
        assert_eq!(
            runner.issued(),
            vec![
                ControlCommand::ToggleMute {
                    kind: DeviceKind::Sink,
                    index: 3
                },
                ControlCommand::GetMute {
                    kind: DeviceKind::Sink,
                    index: 3
                },
            ]
        );

        let job = Job::toggle_mute(&stream("protocol-native.c", "9", "1")).unwrap();
        let runner = FakeRunner::new();
        assert_eq!(job.execute(&runner), "mute toggled for mpv");
        assert_eq!(runner.issued().len(), 1);
    }

    #[test]
    fn test_loopback_uses_latency() {
        let dispatch = Dispatch::Loopback {
            source: 5,
            sink: 2,
            name: "Headset".to_string(),
        };
        let job = Job::from_dispatch(&dispatch, &[], 120);
        let runner = FakeRunner::new();
        job.execute(&runner);
        assert_eq!(
            runner.issued(),
            vec![ControlCommand::LoadLoopback {
                source: 5,
                sink: 2,
                latency_ms: 120
            }]
        );
    }
}
