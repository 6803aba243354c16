// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raw record to [`Device`] conversion.

use super::types::{
    CardInfo, Channel, Device, DeviceCount, DeviceInfo, DeviceKind, DeviceState, Endpoint,
    OutputInfo, Snapshot, StreamInfo,
};
use pulsedeck_pactl::RawRecord;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// pactl's placeholder for values it could not encode.
const NULL_MARKER: &str = "(null)";

/// Records of one refresh, grouped by kind.
#[derive(Debug, Default)]
pub struct Listing {
    records: BTreeMap<DeviceKind, Vec<RawRecord>>,
    stream_titles: HashMap<u32, String>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: DeviceKind, records: Vec<RawRecord>) {
        self.records.insert(kind, records);
    }

    /// Titles recovered from the stream text listing, by stream index.
    pub fn set_stream_titles(&mut self, titles: HashMap<u32, String>) {
        self.stream_titles = titles;
    }

    /// Normalize every record and flatten them in kind order.
    pub fn into_snapshot(self) -> Snapshot {
        let streams = self.records.get(&DeviceKind::Stream).map_or(&[][..], Vec::as_slice);
        let untitled = streams
            .iter()
            .filter(|record| !self.stream_titles.contains_key(&record.index()))
            .count();
        if untitled > 0 || streams.len() != self.stream_titles.len() {
            debug!(
                "Text listing has {} titles for {} streams, {} fall back to JSON titles",
                self.stream_titles.len(),
                streams.len(),
                untitled
            );
        }

        let mut counts = DeviceCount::default();
        let mut devices = Vec::new();
        for kind in DeviceKind::ALL {
            let Some(records) = self.records.get(&kind) else {
                continue;
            };
            for record in records {
                let title = match kind {
                    DeviceKind::Stream => self
                        .stream_titles
                        .get(&record.index())
                        .map(String::as_str),
                    _ => None,
                };
                counts.record(kind);
                devices.push(normalize(record, title, devices.len()));
            }
        }

        Snapshot { devices, counts }
    }
}

/// Normalize one record. `title` is the stream title recovered from the text
/// listing, if any.
pub fn normalize(record: &RawRecord, title: Option<&str>, ordinal: usize) -> Device {
    let info = match record.kind() {
        DeviceKind::Sink => DeviceInfo::Sink(endpoint(record)),
        DeviceKind::Source => DeviceInfo::Source(endpoint(record)),
        DeviceKind::Stream => DeviceInfo::Stream(StreamInfo {
            binary: record.property("application.process.binary").to_string(),
            title: title.map_or_else(|| structured_title(record), str::to_string),
            sink: record.link("sink"),
            pid: record.property("application.process.id").to_string(),
            channels: channels(record),
            mute: record.flag("mute"),
            balance: record.number("balance"),
        }),
        DeviceKind::Output => DeviceInfo::Output(OutputInfo {
            title: record.property("media.name").to_string(),
            icon: record.property("application.icon_name").to_string(),
            source: record.link("source"),
            sample_spec: record.text("sample_specification").to_string(),
            latency_usec: record.number("source_latency_usec"),
            pid: record.property("application.process.id").to_string(),
            channels: channels(record),
            mute: record.flag("mute"),
            balance: record.number("balance"),
        }),
        DeviceKind::Card => DeviceInfo::Card(CardInfo {
            description: record.property("device.description").to_string(),
            battery: record.property("bluetooth.battery").to_string(),
        }),
    };

    Device {
        ordinal,
        index: record.index(),
        driver: record.text("driver").to_string(),
        module: record.owner_module(),
        info,
    }
}

fn endpoint(record: &RawRecord) -> Endpoint {
    Endpoint {
        name: record.text("name").to_string(),
        description: record.text("description").to_string(),
        state: DeviceState::parse(record.text("state")),
        sample_spec: record.text("sample_specification").to_string(),
        card_name: record.property("alsa.card_name").to_string(),
        port: record.text("active_port").to_string(),
        bus: record.property("device.bus").to_string(),
        battery: record.property("bluetooth.battery").to_string(),
        device_string: record.property("device.string").to_string(),
        channels: channels(record),
        mute: record.flag("mute"),
        balance: record.number("balance"),
    }
}

fn channels(record: &RawRecord) -> Vec<Channel> {
    record
        .channel_volumes()
        .into_iter()
        .map(|(name, percent)| Channel { name, percent })
        .collect()
}

fn structured_title(record: &RawRecord) -> String {
    let media = record.property("media.name");
    if !media.is_empty() && media != NULL_MARKER {
        return media.to_string();
    }
    record.property("application.name").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsedeck_pactl::parse_records;

    fn records(kind: DeviceKind, json: &str) -> Vec<RawRecord> {
        parse_records(kind, json.as_bytes()).unwrap()
    }

    const STREAMS: &str = r#"[
        {"index": 10, "sink": 1, "driver": "protocol-native.c", "owner_module": 9,
         "properties": {"media.name": "(null)", "application.name": "mpv",
                        "application.process.binary": "mpv", "application.process.id": "100"}},
        {"index": 11, "sink": 1, "driver": "protocol-native.c",
         "properties": {"media.name": "Playback", "application.process.binary": "firefox"}},
        {"index": 12, "sink": 2, "driver": "module-loopback.c", "owner_module": "31",
         "properties": {"media.name": "(null)", "application.process.binary": "cmus"}}
    ]"#;

    fn titles(pairs: &[(u32, &str)]) -> HashMap<u32, String> {
        pairs
            .iter()
            .map(|&(index, title)| (index, title.to_string()))
            .collect()
    }

    #[test]
    fn test_stream_titles_pair_by_index() {
        let mut listing = Listing::new();
        listing.insert(DeviceKind::Stream, records(DeviceKind::Stream, STREAMS));
        listing.set_stream_titles(titles(&[
            (12, "Music Player"),
            (10, "Ñandú"),
            (11, "Playback"),
        ]));

        let snapshot = listing.into_snapshot();
        assert_eq!(snapshot.devices[2].description(), "Music Player");
        assert_eq!(snapshot.devices[0].description(), "Ñandú");
        assert_eq!(snapshot.devices[0].name(), "mpv");
        assert_eq!(snapshot.devices[2].module, "31");
        assert!(snapshot.devices[2].is_loopback());
    }

    #[test]
    fn test_missing_titles_fall_back_to_structured_fields() {
        let mut listing = Listing::new();
        listing.insert(DeviceKind::Stream, records(DeviceKind::Stream, STREAMS));
        listing.set_stream_titles(titles(&[(10, "Only one")]));

        let snapshot = listing.into_snapshot();
        assert_eq!(snapshot.devices[0].description(), "Only one");
        assert_eq!(snapshot.devices[1].description(), "Playback");
        // `(null)` with no application.name leaves the title empty.
        assert_eq!(snapshot.devices[2].description(), "");
    }

    #[test]
    fn test_extra_stream_in_text_listing_does_not_shift_titles() {
        let json = r#"[
            {"index": 2, "properties": {"media.name": "(null)"}},
            {"index": 3, "properties": {"media.name": "(null)"}}
        ]"#;
        let mut listing = Listing::new();
        listing.insert(DeviceKind::Stream, records(DeviceKind::Stream, json));
        // Stream #1 went away between the two pactl calls.
        listing.set_stream_titles(titles(&[(1, "Ghost"), (2, "Alpha"), (3, "Beta")]));

        let snapshot = listing.into_snapshot();
        let paired: Vec<_> = snapshot
            .devices
            .iter()
            .map(|device| (device.index, device.description()))
            .collect();
        assert_eq!(paired, vec![(2, "Alpha"), (3, "Beta")]);
    }

    #[test]
    fn test_ordinals_follow_kind_order() {
        let mut listing = Listing::new();
        // Inserted out of order on purpose.
        let card = r#"[{"index": 0, "properties": {"device.description": "HDA"}}]"#;
        listing.insert(DeviceKind::Card, records(DeviceKind::Card, card));
        let source = r#"[{"index": 5, "description": "Mic", "state": "SUSPENDED"}]"#;
        listing.insert(DeviceKind::Source, records(DeviceKind::Source, source));
        listing.insert(
            DeviceKind::Sink,
            records(DeviceKind::Sink, r#"[{"index": 1}, {"index": 2}]"#),
        );

        let snapshot = listing.into_snapshot();
        let kinds: Vec<_> = snapshot.devices.iter().map(Device::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeviceKind::Sink,
                DeviceKind::Sink,
                DeviceKind::Source,
                DeviceKind::Card
            ]
        );
        for (i, device) in snapshot.devices.iter().enumerate() {
            assert_eq!(device.ordinal, i);
        }
        assert_eq!(snapshot.counts.total(), 4);
        assert_eq!(snapshot.counts.navigable_total(), 3);
        assert_eq!(snapshot.devices[2].state(), Some(DeviceState::Suspended));
        assert_eq!(snapshot.devices[3].description(), "HDA");
    }

    #[test]
    fn test_output_fields() {
        let json = r#"[{"index": 4, "source": 5, "source_latency_usec": 1200.0,
            "channel_map": "mono", "volume": {"mono": {"value_percent": "80%"}},
            "properties": {"media.name": "Recording", "application.icon_name": "obs"}}]"#;
        let device = normalize(&records(DeviceKind::Output, json)[0], None, 0);
        assert_eq!(device.name(), "Recording");
        assert_eq!(device.description(), "obs");
        assert_eq!(device.display_name(), "Recording");
        assert_eq!(device.link_index(), Some(5));
        assert_eq!(
            device.channels(),
            &[Channel {
                name: "mono".to_string(),
                percent: 80
            }]
        );
    }
}
