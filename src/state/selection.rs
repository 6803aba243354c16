// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-step select-then-act dispatch.
//!
//! The user arms a device with the select key, moves the cursor and fires
//! with the action key. What happens depends on the armed kind and the kind
//! under the cursor:
//!
//! | armed \ target | Sink            | Stream          | Source          | Output          |
//! |----------------|-----------------|-----------------|-----------------|-----------------|
//! | nothing        | default sink    | -               | default source  | -               |
//! | Sink           | suspend/resume  | move to sink    | loopback        | -               |
//! | Source         | -               | -               | suspend/resume  | move to source  |
//!
//! Suspend/resume only fires when the cursor is on the armed device itself.
//! A running device is suspended; an idle or suspended one is resumed.

use crate::device::{Device, DeviceKind, DeviceState};
use thiserror::Error;

/// An armed device, remembered by kind and index so it survives refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: DeviceKind,
    pub index: u32,
    pub name: String,
}

impl Selection {
    pub fn arm(device: &Device) -> Self {
        Self {
            kind: device.kind(),
            index: device.index,
            name: device.display_name().to_string(),
        }
    }
}

/// The operation a dispatch resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    SetDefaultSink { sink: u32, name: String },
    SetDefaultSource { source: u32, name: String },
    Suspend {
        kind: DeviceKind,
        index: u32,
        suspend: bool,
        name: String,
    },
    MoveStream { stream: u32, sink: u32, name: String },
    /// Loop `source` back into the armed `sink`.
    Loopback { source: u32, sink: u32, name: String },
    MoveOutput { output: u32, source: u32, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("nothing to do for a {0} without a selection, select a sink or source first")]
    NeedsSelection(DeviceKind),
    #[error("not a valid pairing: selected {armed} with {target}")]
    NotAPairing {
        armed: DeviceKind,
        target: DeviceKind,
    },
    #[error("not a valid pairing: move the cursor back to the selected {0} to suspend it")]
    OtherDevice(DeviceKind),
    #[error("a {0} cannot be selected as a target")]
    NotNavigable(DeviceKind),
}

/// Resolve the armed selection against the device under the cursor.
pub fn resolve(armed: Option<&Selection>, target: &Device) -> Result<Dispatch, Rejection> {
    let kind = target.kind();
    let index = target.index;
    let name = target.display_name().to_string();

    if !kind.is_navigable() {
        return Err(Rejection::NotNavigable(kind));
    }

    let Some(armed) = armed else {
        return match kind {
            DeviceKind::Sink => Ok(Dispatch::SetDefaultSink { sink: index, name }),
            DeviceKind::Source => Ok(Dispatch::SetDefaultSource {
                source: index,
                name,
            }),
            _ => Err(Rejection::NeedsSelection(kind)),
        };
    };

    match (armed.kind, kind) {
        (DeviceKind::Sink, DeviceKind::Sink) | (DeviceKind::Source, DeviceKind::Source) => {
            if armed.index != index {
                return Err(Rejection::OtherDevice(kind));
            }
            let suspend = target.state() == Some(DeviceState::Running);
            Ok(Dispatch::Suspend {
                kind,
                index,
                suspend,
                name,
            })
        }
        (DeviceKind::Sink, DeviceKind::Stream) => Ok(Dispatch::MoveStream {
            stream: index,
            sink: armed.index,
            name: armed.name.clone(),
        }),
        (DeviceKind::Sink, DeviceKind::Source) => Ok(Dispatch::Loopback {
            source: index,
            sink: armed.index,
            name: armed.name.clone(),
        }),
        (DeviceKind::Source, DeviceKind::Output) => Ok(Dispatch::MoveOutput {
            output: index,
            source: armed.index,
            name: armed.name.clone(),
        }),
        (armed, target) => Err(Rejection::NotAPairing { armed, target }),
    }
}
