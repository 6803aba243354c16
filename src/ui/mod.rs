// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Terminal rendering for pulsedeck.

pub mod device_list;
pub mod theme;

pub use theme::Theme;

use crate::keymap::{FULL_HELP, SHORT_HELP};
use crate::state::AppState;
use device_list::{cut_text, entry_height, render_entry};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    let mut block = Block::default()
        .borders(theme.borders)
        .border_type(theme.border_type)
        .border_style(theme.inactive);
    if theme.show_title {
        block = block.title(Line::styled(" pulsedeck ", theme.active).centered());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = state.layout.content_width.min(inner.width).max(1);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(inner);

    let help_rows = match (state.settings().show_help, state.full_help) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 3,
    };
    let [selection_area, list_area, footer_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(help_rows),
    ])
    .areas(column);

    render_selection(frame, selection_area, state, theme);
    render_list(frame, list_area, state, theme);
    render_footer(frame, footer_area, state, theme);
    if help_rows > 0 {
        render_help(frame, help_area, state, theme);
    }
}

fn render_selection(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(selection) = &state.selection else {
        return;
    };
    let text = format!("{} #{} {}", selection.kind, selection.index, selection.name);
    let text = cut_text(&text, (area.width / 2) as usize);
    frame.render_widget(Paragraph::new(Line::styled(text, theme.active)), area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let navigable = state.registry.navigable();
    if navigable.is_empty() {
        let placeholder =
            Paragraph::new(Line::styled("no devices to report", theme.active).centered());
        frame.render_widget(placeholder, area);
        return;
    }

    let bounds = state.pagination.bounds(navigable.len());
    let page = &navigable[bounds.clone()];
    let heights: Vec<u16> = page
        .iter()
        .map(|device| entry_height(device, state.display))
        .collect();
    let skip = state
        .cursor
        .position
        .checked_sub(bounds.start)
        .filter(|offset| *offset < page.len())
        .map_or(0, |offset| first_visible(&heights, offset, area.height));

    let mut y = area.y;
    for (offset, device) in page.iter().enumerate().skip(skip) {
        let height = heights[offset];
        if y + height > area.bottom() {
            break;
        }
        let entry = Rect::new(area.x, y, area.width, height);
        render_entry(
            frame,
            entry,
            device,
            bounds.start + offset == state.cursor.position,
            state.cursor.channel,
            state.display,
            &state.registry,
            theme,
            state.layout.bar_width,
        );
        // Blank row between entries.
        y += height + 1;
    }
}

/// Index of the first entry to draw so the entry at `cursor` fits in `rows`,
/// counting a blank row between entries.
fn first_visible(heights: &[u16], cursor: usize, rows: u16) -> usize {
    let span = |entries: &[u16]| {
        let separators = entries.len().saturating_sub(1) as u32;
        entries.iter().map(|h| u32::from(*h)).sum::<u32>() + separators
    };
    let mut start = 0;
    while start < cursor && span(&heights[start..=cursor]) > u32::from(rows) {
        start += 1;
    }
    start
}

/// Page dots on the left, status message on the right.
fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let total = state.pagination.total_pages();
    let pager = if total <= 1 {
        String::new()
    } else if !theme.symbols.unicode {
        format!("{}/{}", state.pagination.page + 1, total)
    } else {
        (0..total)
            .map(|page| if page == state.pagination.page { "●" } else { "○" })
            .collect()
    };

    let pager_width = pager.chars().count() as u16;
    let [pager_area, status_area] =
        Layout::horizontal([Constraint::Length(pager_width + 2), Constraint::Fill(1)])
            .areas(Rect { height: 1, ..area });
    frame.render_widget(Paragraph::new(Span::styled(pager, theme.inactive)), pager_area);

    if state.show_messages && !state.status.is_empty() {
        let status = cut_text(&state.status, status_area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::styled(status, theme.active).right_aligned()),
            status_area,
        );
    }
}

fn render_help(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let bindings = if state.full_help { FULL_HELP } else { SHORT_HELP };
    let spans: Vec<Span> = bindings
        .iter()
        .enumerate()
        .flat_map(|(i, (key, what))| {
            let separator = if i == 0 { "" } else { " • " };
            [
                Span::styled(separator, theme.inactive),
                Span::styled(*key, theme.active),
                Span::styled(format!(" {}", what), theme.inactive),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans).centered()).wrap(Wrap { trim: true }),
        area,
    );
}
