// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Device ingestion: pactl listings in, one [`Snapshot`] out.

pub mod normalize;
pub mod registry;
pub mod types;

pub use normalize::Listing;
pub use registry::DeviceRegistry;
pub use types::{
    CardInfo, Channel, Device, DeviceCount, DeviceInfo, DeviceKind, DeviceState, Endpoint,
    OutputInfo, Snapshot, StreamInfo,
};

use pulsedeck_pactl::{extract_titles, parse_records, CommandRunner};
use tracing::debug;

/// Query every kind and build a fresh snapshot.
///
/// A kind that fails to list, fails to parse or lists nothing is left out of
/// this generation. Blocks on the runner.
pub fn collect(runner: &dyn CommandRunner) -> Snapshot {
    let mut listing = Listing::new();

    for kind in DeviceKind::ALL {
        let bytes = match runner.list(kind) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping {} this cycle: {}", kind, e);
                continue;
            }
        };
        let records = match parse_records(kind, &bytes) {
            Ok(records) if records.is_empty() => continue,
            Ok(records) => records,
            Err(e) => {
                debug!("Skipping {} this cycle: {}", kind, e);
                continue;
            }
        };

        if kind == DeviceKind::Stream {
            match runner.text_list(kind) {
                Ok(text) => listing.set_stream_titles(extract_titles(&text)),
                Err(e) => debug!("No stream titles this cycle: {}", e),
            }
        }
        listing.insert(kind, records);
    }

    listing.into_snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;

    #[test]
    fn test_collect_skips_broken_kinds() {
        let runner = FakeRunner::new()
            .with_listing(DeviceKind::Sink, r#"[{"index": 1, "description": "Speakers"}]"#)
            .with_listing(DeviceKind::Source, "[{\"index\": 2,")
            .with_listing(DeviceKind::Output, "[]")
            .with_listing(DeviceKind::Card, r#"[{"index": 0}]"#);

        let snapshot = collect(&runner);
        assert_eq!(snapshot.counts.sinks, 1);
        assert_eq!(snapshot.counts.sources, 0);
        assert_eq!(snapshot.counts.streams, 0);
        assert_eq!(snapshot.counts.cards, 1);
        assert_eq!(snapshot.devices[0].description(), "Speakers");
    }

    #[test]
    fn test_collect_recovers_stream_titles() {
        let runner = FakeRunner::new()
            .with_listing(
                DeviceKind::Stream,
                r#"[
                    {"index": 1, "properties": {"media.name": "(null)"}},
                    {"index": 2, "properties": {"media.name": "(null)"}},
                    {"index": 3, "properties": {"media.name": "(null)"}}
                ]"#,
            )
            .with_text(
                DeviceKind::Stream,
                "Sink Input #1\n\t\tmedia.name = \"Ambient\"\n\
                 Sink Input #2\n\t\tmedia.name = \"Voice\"\n\
                 Sink Input #3\n\t\tmedia.name = \"Music Player\"\n",
            );

        let snapshot = collect(&runner);
        assert_eq!(snapshot.counts.streams, 3);
        assert_eq!(snapshot.devices[2].description(), "Music Player");
    }

    #[test]
    fn test_collect_without_server_is_empty() {
        let snapshot = collect(&FakeRunner::new());
        assert!(snapshot.devices.is_empty());
        assert_eq!(snapshot.counts.total(), 0);
    }
}
