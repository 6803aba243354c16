// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! pactl plumbing for pulsedeck.
//!
//! This crate knows how to talk to `pactl`: which listing to request for each
//! device kind, how to turn the JSON and text listings into raw records, and
//! how to phrase the control commands the dashboard issues. It has no notion of
//! cursors, pages or selections.

pub mod command;
pub mod kind;
pub mod record;
pub mod runner;
pub mod titles;

pub use command::{ControlCommand, LOOPBACK_DRIVER, LOOPBACK_MODULE};
pub use kind::DeviceKind;
pub use record::{parse_records, ParseError, RawRecord};
pub use runner::{CommandRunner, Pactl, RunnerError};
pub use titles::extract_titles;
