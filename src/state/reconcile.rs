// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Re-establish cursor and page invariants after the list or layout changes.

use super::navigation::{ChannelMode, Cursor, Pagination};
use crate::device::DeviceRegistry;

/// Clamp cursor and page against the registry's current generation.
///
/// Leaves the selection alone and is idempotent.
pub fn reconcile(cursor: &mut Cursor, pagination: &mut Pagination, registry: &DeviceRegistry) {
    let navigable = registry.navigable();
    let len = navigable.len();
    pagination.set_total_items(len);

    while pagination.page > pagination.last_page() {
        pagination.page -= 1;
    }

    if len == 0 {
        cursor.position = 0;
        cursor.channel = ChannelMode::All;
        return;
    }
    if cursor.position > len - 1 {
        cursor.position = len - 1;
    }

    // A smaller page size can leave the cursor off the visible page.
    if !pagination.contains(cursor.position) {
        pagination.page = (cursor.position / pagination.per_page()).min(pagination.last_page());
    }

    if let ChannelMode::Single(channel) = cursor.channel {
        if channel >= navigable[cursor.position].channels().len() {
            cursor.channel = ChannelMode::All;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Channel, Device, DeviceCount, DeviceInfo, Endpoint, Snapshot};

    fn registry_with(sinks: usize, channels: usize) -> DeviceRegistry {
        let devices: Vec<Device> = (0..sinks)
            .map(|i| Device {
                ordinal: i,
                index: i as u32,
                driver: String::new(),
                module: String::new(),
                info: DeviceInfo::Sink(Endpoint {
                    channels: (0..channels)
                        .map(|c| Channel {
                            name: format!("ch{}", c),
                            percent: 50,
                        })
                        .collect(),
                    ..Endpoint::default()
                }),
            })
            .collect();
        let mut counts = DeviceCount::default();
        for d in &devices {
            counts.record(d.kind());
        }
        let mut registry = DeviceRegistry::new();
        registry.replace(Snapshot { devices, counts });
        registry
    }

    #[test]
    fn test_shrink_from_second_page() {
        let registry = registry_with(3, 2);
        let mut pages = Pagination::new(4);
        pages.set_total_items(5);
        pages.page = 1;
        let mut cursor = Cursor {
            position: 4,
            channel: ChannelMode::All,
        };

        reconcile(&mut cursor, &mut pages, &registry);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.page, 0);
        assert_eq!(cursor.position, 2);
    }

    #[test]
    fn test_empty_list() {
        let registry = registry_with(0, 0);
        let mut pages = Pagination::new(4);
        pages.page = 3;
        let mut cursor = Cursor {
            position: 7,
            channel: ChannelMode::Single(1),
        };

        reconcile(&mut cursor, &mut pages, &registry);
        assert_eq!(pages.total_pages(), 0);
        assert_eq!(pages.page, 0);
        assert_eq!(cursor, Cursor::default());
    }

    #[test]
    fn test_clamp_holds_for_all_sizes() {
        for len in 0..12 {
            for per_page in 1..6 {
                for position in 0..14 {
                    for page in 0..6 {
                        let registry = registry_with(len, 2);
                        let mut pages = Pagination::new(per_page);
                        pages.page = page;
                        let mut cursor = Cursor {
                            position,
                            channel: ChannelMode::Single(1),
                        };
                        reconcile(&mut cursor, &mut pages, &registry);

                        if len == 0 {
                            assert_eq!(cursor.position, 0);
                            assert_eq!(pages.page, 0);
                        } else {
                            assert!(cursor.position < len);
                            assert!(pages.page < pages.total_pages());
                            assert!(pages.contains(cursor.position));
                            assert_eq!(pages.total_pages(), len.div_ceil(per_page));
                        }

                        let once = (cursor, pages);
                        reconcile(&mut cursor, &mut pages, &registry);
                        assert_eq!((cursor, pages), once);
                    }
                }
            }
        }
    }

    #[test]
    fn test_channel_mode_dropped_when_device_has_fewer_channels() {
        let registry = registry_with(2, 1);
        let mut pages = Pagination::new(4);
        let mut cursor = Cursor {
            position: 1,
            channel: ChannelMode::Single(1),
        };
        reconcile(&mut cursor, &mut pages, &registry);
        assert_eq!(cursor.channel, ChannelMode::All);

        cursor.channel = ChannelMode::Single(0);
        reconcile(&mut cursor, &mut pages, &registry);
        assert_eq!(cursor.channel, ChannelMode::Single(0));
    }
}
