// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Events handled by the event loop.

use crate::device::Snapshot;
use crate::keymap::Action;

#[derive(Debug)]
pub enum Message {
    // ==================== Timer ====================
    /// Poll interval elapsed.
    Tick,

    // ==================== Terminal ====================
    /// A key mapped to an action.
    Key(Action),
    /// Terminal resized (columns, rows).
    Resized(u16, u16),

    // ==================== Background work ====================
    /// A refresh finished.
    Refreshed(Snapshot),
    /// A refresh task died before producing a snapshot.
    RefreshFailed,
    /// A control job finished, with its status line.
    JobFinished(String),
}
