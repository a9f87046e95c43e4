//! TUI utility functions - layout helpers

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Height in rows of one plant card, borders included
pub const CARD_HEIGHT: u16 = 5;

/// Index of the card under screen row `row`, if any
pub fn card_at_row(list: Rect, row: u16, scroll: usize, count: usize) -> Option<usize> {
    if row < list.y || row >= list.y + list.height {
        return None;
    }
    let idx = scroll + ((row - list.y) / CARD_HEIGHT) as usize;
    (idx < count).then_some(idx)
}

/// First card to draw so that `selected` stays visible
pub fn scroll_for(selected: usize, scroll: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if selected < scroll {
        selected
    } else if selected >= scroll + visible {
        selected + 1 - visible
    } else {
        scroll
    }
}
