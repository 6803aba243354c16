// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Stream title recovery from `pactl -f text list sink-inputs`.
//!
//! pactl's JSON encoder emits `(null)` for some non-ASCII `media.name` values,
//! while the text listing prints them intact. The two listings come from
//! separate pactl calls and can disagree when a stream appears or goes away in
//! between, so titles are keyed by the stream index from each `Sink Input #N`
//! header rather than by position.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn header_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Sink Input #(\d+)\s*$").expect("header pattern is valid"))
}

fn media_name_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*media\.name\s*=\s*(.*?)\s*$").expect("media.name pattern is valid")
    })
}

/// `media.name` of every stream in the listing, unquoted, by stream index.
///
/// A `media.name` line before any header is ignored. When a block carries
/// more than one, the first wins.
pub fn extract_titles(text: &str) -> HashMap<u32, String> {
    let mut titles = HashMap::new();
    let mut current: Option<u32> = None;

    for line in text.lines() {
        if let Some(caps) = header_line().captures(line) {
            current = caps.get(1).and_then(|m| m.as_str().parse().ok());
            continue;
        }
        let Some(index) = current else {
            continue;
        };
        let Some(caps) = media_name_line().captures(line) else {
            continue;
        };
        let value = caps.get(1).map_or("", |m| m.as_str());
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        titles
            .entry(index)
            .or_insert_with(|| value.trim().to_string());
    }

    titles
}
