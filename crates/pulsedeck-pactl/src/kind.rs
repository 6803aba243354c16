// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Device kinds as pactl enumerates them.

use std::fmt;

/// The five record families pactl can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceKind {
    /// Playback endpoint (speakers, headphones, null sink).
    Sink,
    /// Application playback connection routed to a sink (sink-input).
    Stream,
    /// Capture endpoint (microphone, monitor).
    Source,
    /// Application capture connection reading from a source (source-output).
    Output,
    /// Physical or logical adapter. Counted, never navigated.
    Card,
}

impl DeviceKind {
    /// Kinds in registry order.
    pub const ALL: [DeviceKind; 5] = [
        DeviceKind::Sink,
        DeviceKind::Stream,
        DeviceKind::Source,
        DeviceKind::Output,
        DeviceKind::Card,
    ];

    /// Argument to `pactl list` for this kind.
    pub fn list_target(self) -> &'static str {
        match self {
            Self::Sink => "sinks",
            Self::Stream => "sink-inputs",
            Self::Source => "sources",
            Self::Output => "source-outputs",
            Self::Card => "cards",
        }
    }

    /// Short human label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sink => "sink",
            Self::Stream => "stream",
            Self::Source => "source",
            Self::Output => "output",
            Self::Card => "card",
        }
    }

    /// Whether the kind shows up in the navigable list.
    pub fn is_navigable(self) -> bool {
        !matches!(self, Self::Card)
    }

    /// Whether the kind is an application connection rather than an endpoint.
    pub fn is_connection(self) -> bool {
        matches!(self, Self::Stream | Self::Output)
    }

    pub(crate) fn volume_verb(self) -> Option<&'static str> {
        match self {
            Self::Sink => Some("set-sink-volume"),
            Self::Stream => Some("set-sink-input-volume"),
            Self::Source => Some("set-source-volume"),
            Self::Output => Some("set-source-output-volume"),
            Self::Card => None,
        }
    }

    pub(crate) fn mute_verb(self) -> Option<&'static str> {
        match self {
            Self::Sink => Some("set-sink-mute"),
            Self::Stream => Some("set-sink-input-mute"),
            Self::Source => Some("set-source-mute"),
            Self::Output => Some("set-source-output-mute"),
            Self::Card => None,
        }
    }

    /// pactl only offers a mute query for endpoints.
    pub(crate) fn mute_query_verb(self) -> Option<&'static str> {
        match self {
            Self::Sink => Some("get-sink-mute"),
            Self::Source => Some("get-source-mute"),
            _ => None,
        }
    }

    pub(crate) fn suspend_verb(self) -> Option<&'static str> {
        match self {
            Self::Sink => Some("suspend-sink"),
            Self::Source => Some("suspend-source"),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let mut sorted = DeviceKind::ALL;
        sorted.sort();
        assert_eq!(sorted, DeviceKind::ALL);
        assert_eq!(DeviceKind::ALL[4], DeviceKind::Card);
    }

    #[test]
    fn test_only_endpoints_can_be_queried_or_suspended() {
        for kind in DeviceKind::ALL {
            let endpoint = matches!(kind, DeviceKind::Sink | DeviceKind::Source);
            assert_eq!(kind.mute_query_verb().is_some(), endpoint);
            assert_eq!(kind.suspend_verb().is_some(), endpoint);
        }
        assert!(DeviceKind::Card.volume_verb().is_none());
        assert!(!DeviceKind::Card.is_navigable());
    }
}
