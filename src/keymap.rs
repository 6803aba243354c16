// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Key bindings.

use crate::state::navigation::Movement;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Movement),
    /// Arm the device under the cursor.
    Select,
    /// Fire the armed selection at the cursor device.
    Perform,
    /// Drop the selection and channel focus.
    Escape,
    Mute,
    VolumeUp,
    VolumeDown,
    /// Absolute volume in percent.
    SetVolume(u32),
    CycleChannel,
    Kill,
    UnloadLoopbacks,
    LatencyUp,
    LatencyDown,
    CycleDisplay,
    /// Switch between the alternate screen and inline drawing.
    ToggleFullscreen,
    ToggleMessages,
    ToggleHelp,
    Refresh,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('k') | KeyCode::Up => Action::Move(Movement::Up),
        KeyCode::Char('j') | KeyCode::Down => Action::Move(Movement::Down),
        KeyCode::Char('g') | KeyCode::Home => Action::Move(Movement::First),
        KeyCode::Char('G') | KeyCode::End => Action::Move(Movement::Last),
        KeyCode::Char('n') | KeyCode::PageDown => Action::Move(Movement::NextPage),
        KeyCode::Char('p') | KeyCode::Char('N') | KeyCode::PageUp => {
            Action::Move(Movement::PrevPage)
        }
        KeyCode::Char('m') | KeyCode::Char(' ') => Action::Mute,
        KeyCode::Char('l') | KeyCode::Char('K') | KeyCode::Right => Action::VolumeUp,
        KeyCode::Char('h') | KeyCode::Char('J') | KeyCode::Left => Action::VolumeDown,
        KeyCode::Char(c @ '1'..='9') => Action::SetVolume((c as u32 - '0' as u32) * 10),
        KeyCode::Char('0') => Action::SetVolume(100),
        KeyCode::Char('s') => Action::Select,
        KeyCode::Enter => Action::Perform,
        KeyCode::Esc => Action::Escape,
        KeyCode::Char('x') | KeyCode::Delete => Action::Kill,
        KeyCode::Char('X') => Action::UnloadLoopbacks,
        KeyCode::Char('c') => Action::CycleChannel,
        KeyCode::Char('+') => Action::LatencyUp,
        KeyCode::Char('-') => Action::LatencyDown,
        KeyCode::Char('t') => Action::CycleDisplay,
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('v') => Action::ToggleMessages,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Key hints for the help bar, short list first.
pub const SHORT_HELP: &[(&str, &str)] = &[("?", "help"), ("q", "quit")];

pub const FULL_HELP: &[(&str, &str)] = &[
    ("↑/k", "up"),
    ("↓/j", "down"),
    ("g/G", "first/last"),
    ("n/p", "page"),
    ("→/l", "vol +"),
    ("←/h", "vol -"),
    ("1-0", "vol 10-100%"),
    ("m", "mute"),
    ("c", "channel"),
    ("s", "select"),
    ("enter", "act"),
    ("esc", "clear"),
    ("x", "kill"),
    ("X", "unload loopbacks"),
    ("+/-", "latency"),
    ("t", "detail"),
    ("f", "fullscreen"),
    ("v", "messages"),
    ("r", "refresh"),
    ("q", "quit"),
];
