//! TUI input handling - keyboard and mouse event handlers

use std::time::Instant;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::error::Result;

use super::state::*;
use super::types::*;
use super::utils::card_at_row;

/// Main key event dispatcher
pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
    match app.mode {
        Mode::Normal => handle_normal_input(app, key, modifiers),
        Mode::Help => {
            app.mode = Mode::Normal;
            Ok(())
        }
        Mode::AddPlant => handle_form_input(app, key, modifiers),
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if mouse.kind == MouseEventKind::Down(MouseButton::Left) && app.mode == Mode::Normal {
        if let Some(idx) = card_at_row(app.layout_areas.plants, mouse.row, app.scroll, app.cards.len()) {
            app.selected = idx;
        }
    }
    Ok(())
}

fn handle_normal_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.mode = Mode::Help,
        KeyCode::Char('j') | KeyCode::Down => app.next_plant(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_plant(),
        KeyCode::Char('g') | KeyCode::Home => app.first_plant(),
        KeyCode::Char('G') | KeyCode::End => app.last_plant(),
        KeyCode::Char('n') | KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('w') | KeyCode::Enter => app.water_selected(Utc::now(), Instant::now()),
        _ => {}
    }
    Ok(())
}

fn handle_form_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Esc => app.close_add_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.form.next_field(),
        KeyCode::Enter => app.submit_form(Utc::now(), Instant::now()),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
    Ok(())
}
