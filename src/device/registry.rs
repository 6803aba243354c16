// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The current device generation.

use super::types::{Device, DeviceCount, DeviceKind, Snapshot};

/// Holds exactly one generation of devices, replaced wholesale on refresh.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    counts: DeviceCount,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new generation.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.devices = snapshot.devices;
        self.counts = snapshot.counts;
    }

    pub fn get(&self, ordinal: usize) -> Option<&Device> {
        self.devices.get(ordinal)
    }

    /// Devices the cursor can reach. Cards sort last, so this is a prefix.
    pub fn navigable(&self) -> &[Device] {
        let end = self.counts.navigable_total().min(self.devices.len());
        &self.devices[..end]
    }

    pub fn counts(&self) -> DeviceCount {
        self.counts
    }

    pub fn find(&self, kind: DeviceKind, index: u32) -> Option<&Device> {
        self.devices
            .iter()
            .find(|device| device.kind() == kind && device.index == index)
    }

    pub fn of_kind(&self, kind: DeviceKind) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |device| device.kind() == kind)
    }
}
