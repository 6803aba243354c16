// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cursor and page movement over the navigable device list.

use std::ops::Range;

/// Which channels a volume step applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    #[default]
    All,
    /// Offset into the cursor device's channel list.
    Single(usize),
}

impl ChannelMode {
    /// All → 0 → … → count-1 → All.
    pub fn next(self, count: usize) -> Self {
        let next = match self {
            Self::All => 0,
            Self::Single(i) => i + 1,
        };
        if next < count {
            Self::Single(next)
        } else {
            Self::All
        }
    }

    pub fn targets(self, channel: usize) -> bool {
        match self {
            Self::All => true,
            Self::Single(i) => i == channel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: usize,
    pub channel: ChannelMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    per_page: usize,
    total_pages: usize,
}

impl Pagination {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
            total_pages: 0,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Recompute the page count for `items` navigable devices.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = if items == 0 {
            0
        } else {
            items.div_ceil(self.per_page).max(1)
        };
    }

    pub fn last_page(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }

    /// Ordinal of the first slot on the current page.
    pub fn first_slot(&self) -> usize {
        self.page * self.per_page
    }

    /// Ordinals shown on the current page.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = self.first_slot().min(len);
        let end = (start + self.per_page).min(len);
        start..end
    }

    pub fn contains(&self, position: usize) -> bool {
        let start = self.first_slot();
        position >= start && position < start + self.per_page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Up,
    Down,
    First,
    Last,
    PrevPage,
    NextPage,
}

impl Cursor {
    /// Apply `movement` over `len` navigable devices.
    ///
    /// Returns whether position or page changed. The channel mode is reset
    /// either way.
    pub fn apply(&mut self, pagination: &mut Pagination, len: usize, movement: Movement) -> bool {
        self.channel = ChannelMode::All;
        if len == 0 {
            return false;
        }

        let before = (self.position, pagination.page);
        match movement {
            Movement::Up => {
                if self.position == 0 {
                    return false;
                }
                self.position -= 1;
                if self.position < pagination.first_slot() {
                    pagination.page = pagination.page.saturating_sub(1);
                }
            }
            Movement::Down => {
                if self.position + 1 >= len {
                    return false;
                }
                self.position += 1;
                if !pagination.contains(self.position) && pagination.page < pagination.last_page()
                {
                    pagination.page += 1;
                }
            }
            Movement::First => {
                pagination.page = 0;
                self.position = 0;
            }
            Movement::Last => {
                pagination.page = pagination.last_page();
                self.position = len - 1;
            }
            Movement::PrevPage => {
                pagination.page = pagination.page.saturating_sub(1);
                self.position = pagination.first_slot();
            }
            Movement::NextPage => {
                if pagination.page < pagination.last_page() {
                    pagination.page += 1;
                }
                self.position = pagination.first_slot().min(len - 1);
            }
        }
        (self.position, pagination.page) != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(len: usize, per_page: usize) -> Pagination {
        let mut p = Pagination::new(per_page);
        p.set_total_items(len);
        p
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(paged(0, 4).total_pages(), 0);
        assert_eq!(paged(1, 4).total_pages(), 1);
        assert_eq!(paged(4, 4).total_pages(), 1);
        assert_eq!(paged(5, 4).total_pages(), 2);
        assert_eq!(paged(12, 1).total_pages(), 12);
    }

    #[test]
    fn test_down_crosses_to_first_slot_of_next_page() {
        let mut pages = paged(6, 4);
        let mut cursor = Cursor {
            position: 3,
            channel: ChannelMode::Single(1),
        };
        assert!(cursor.apply(&mut pages, 6, Movement::Down));
        assert_eq!(cursor.position, 4);
        assert_eq!(pages.page, 1);
        assert_eq!(cursor.channel, ChannelMode::All);
    }

    #[test]
    fn test_up_crosses_to_last_slot_of_previous_page() {
        let mut pages = paged(6, 4);
        pages.page = 1;
        let mut cursor = Cursor {
            position: 4,
            channel: ChannelMode::All,
        };
        assert!(cursor.apply(&mut pages, 6, Movement::Up));
        assert_eq!(cursor.position, 3);
        assert_eq!(pages.page, 0);
    }

    #[test]
    fn test_ends_are_no_ops_but_reset_channel() {
        let mut pages = paged(3, 4);
        let mut cursor = Cursor {
            position: 0,
            channel: ChannelMode::Single(0),
        };
        assert!(!cursor.apply(&mut pages, 3, Movement::Up));
        assert_eq!(cursor.channel, ChannelMode::All);

        cursor.position = 2;
        cursor.channel = ChannelMode::Single(1);
        assert!(!cursor.apply(&mut pages, 3, Movement::Down));
        assert_eq!(cursor.position, 2);
        assert_eq!(cursor.channel, ChannelMode::All);
    }

    #[test]
    fn test_first_last_and_page_jumps() {
        let mut pages = paged(10, 4);
        let mut cursor = Cursor::default();

        cursor.apply(&mut pages, 10, Movement::Last);
        assert_eq!((cursor.position, pages.page), (9, 2));

        cursor.apply(&mut pages, 10, Movement::PrevPage);
        assert_eq!((cursor.position, pages.page), (4, 1));

        cursor.apply(&mut pages, 10, Movement::NextPage);
        assert_eq!((cursor.position, pages.page), (8, 2));

        // Clamped at the last page.
        assert!(!cursor.apply(&mut pages, 10, Movement::NextPage));
        assert_eq!((cursor.position, pages.page), (8, 2));

        cursor.apply(&mut pages, 10, Movement::First);
        assert_eq!((cursor.position, pages.page), (0, 0));
    }

    #[test]
    fn test_every_movement_resets_channel_mode() {
        let moves = [
            Movement::Up,
            Movement::Down,
            Movement::First,
            Movement::Last,
            Movement::PrevPage,
            Movement::NextPage,
        ];
        for movement in moves {
            for len in [0, 1, 5] {
                let mut pages = paged(len, 2);
                let mut cursor = Cursor {
                    position: 0,
                    channel: ChannelMode::Single(0),
                };
                cursor.apply(&mut pages, len, movement);
                assert_eq!(cursor.channel, ChannelMode::All, "{:?} len {}", movement, len);
            }
        }
    }

    #[test]
    fn test_channel_cycle() {
        let mode = ChannelMode::All;
        let mode = mode.next(2);
        assert_eq!(mode, ChannelMode::Single(0));
        let mode = mode.next(2);
        assert_eq!(mode, ChannelMode::Single(1));
        assert_eq!(mode.next(2), ChannelMode::All);
        assert_eq!(ChannelMode::All.next(0), ChannelMode::All);
        assert!(ChannelMode::Single(1).targets(1));
        assert!(!ChannelMode::Single(1).targets(0));
    }
}
