// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raw records from `pactl -f json list <kind>`.
//!
//! pactl's JSON is loosely typed: `owner_module` is sometimes a number and
//! sometimes a string, `active_port` may be `null`, and volume entries are
//! nested maps of strings. Records are therefore kept as a bag of JSON values
//! and read through lenient accessors, so one odd field never discards a
//! whole listing.

use crate::kind::DeviceKind;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed {kind} listing: {source}")]
    Json {
        kind: DeviceKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} listing is not a JSON array")]
    NotAnArray(DeviceKind),
}

/// One record of a pactl listing.
#[derive(Debug, Clone)]
pub struct RawRecord {
    kind: DeviceKind,
    index: u32,
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Build a record from a JSON object. Records without a numeric `index`
    /// cannot be addressed by any command and are rejected.
    pub fn from_object(kind: DeviceKind, fields: Map<String, Value>) -> Option<Self> {
        let index = fields
            .get("index")
            .and_then(Value::as_u64)
            .and_then(|i| u32::try_from(i).ok())?;
        Some(Self {
            kind,
            index,
            fields,
        })
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// A top-level string field, empty when absent or not a string.
    pub fn text(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// A top-level numeric field that refers to another record's index.
    pub fn link(&self, key: &str) -> Option<u32> {
        self.fields
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|i| u32::try_from(i).ok())
    }

    pub fn number(&self, key: &str) -> f64 {
        self.fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.fields.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A `properties.<key>` string, empty when absent.
    pub fn property(&self, key: &str) -> &str {
        self.fields
            .get("properties")
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Owning module id as text. pactl prints it as a number for most
    /// records and as a string for some (e.g. `"4294967295"`).
    pub fn owner_module(&self) -> String {
        match self.fields.get("owner_module") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.trim_matches('"').to_string(),
            _ => String::new(),
        }
    }

    /// Channel names from the comma-separated `channel_map`.
    pub fn channel_names(&self) -> Vec<&str> {
        self.text("channel_map")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// `(channel, percent)` pairs in channel-map order.
    ///
    /// Channels whose `volume.<name>.value_percent` is missing or does not
    /// parse are left out.
    pub fn channel_volumes(&self) -> Vec<(String, u32)> {
        let volume = self.fields.get("volume");
        self.channel_names()
            .into_iter()
            .filter_map(|name| {
                let raw = volume?.get(name)?.get("value_percent")?.as_str()?;
                match parse_percent(raw) {
                    Some(percent) => Some((name.to_string(), percent)),
                    None => {
                        trace!("Dropping channel {} with volume {:?}", name, raw);
                        None
                    }
                }
            })
            .collect()
    }
}

fn parse_percent(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round() as u32)
}

/// Parse one kind's JSON listing.
///
/// Non-object elements and records without an index are dropped.
pub fn parse_records(kind: DeviceKind, bytes: &[u8]) -> Result<Vec<RawRecord>, ParseError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| ParseError::Json { kind, source })?;
    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray(kind));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => RawRecord::from_object(kind, fields),
            _ => None,
        })
        .collect())
}
