//! TUI module - Terminal dashboard for sprout
//!
//! Shows one card per plant with a live countdown, plus an add-plant form.
//! Everything runs on one thread: the loop below polls input with a short
//! timeout and lets each card's own timer decide when it refreshes.

#![cfg(feature = "tui")]

mod input;
mod render;
mod state;
mod types;
mod utils;

pub use state::*;
pub use types::*;

use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::config::Config;
use crate::error::Result;

/// Run the TUI
pub fn run(config: &Config) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(config)?;
    info!(plants = app.cards.len(), "dashboard started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    for card in app.cards.iter_mut() {
        card.unmount();
    }
    info!("dashboard closed");
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| render::ui(f, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key_event(app, key.code, key.modifiers)?;
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse_event(app, mouse)?;
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }

        dirty |= app.tick(Utc::now(), Instant::now());
    }
}
