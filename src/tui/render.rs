//! TUI rendering - all UI drawing functions

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::card::PlantCard;
use crate::countdown::{describe_interval, format_remaining, Countdown};
use crate::form::FormField;
use crate::garden::EMPTY_MESSAGE;
use crate::notice::NoticeKind;

use super::state::*;
use super::types::*;
use super::utils::{centered_rect, scroll_for, CARD_HEIGHT};

/// Main UI entry point - called from the main loop
pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(5),     // Plant cards
            Constraint::Length(3),  // Status bar
        ])
        .split(f.area());

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!(" sprout v{} - Plant Watering Timer", version))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.layout_areas = LayoutAreas { plants: chunks[1] };
    render_plants(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        Mode::Help => render_help(f),
        Mode::AddPlant => render_add_form(f, app),
        Mode::Normal => {}
    }
}

fn render_plants(f: &mut Frame, app: &mut App, area: Rect) {
    if app.cards.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", EMPTY_MESSAGE),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("    n", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("  Add a plant"),
            ]),
            Line::from(vec![
                Span::styled("    ?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("  Show all keybindings"),
            ]),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Plants "));
        f.render_widget(paragraph, area);
        return;
    }

    let visible = (area.height / CARD_HEIGHT) as usize;
    app.scroll = scroll_for(app.selected, app.scroll, visible);

    let shown = app.cards.iter().enumerate().skip(app.scroll).take(visible.max(1));
    for (row, (i, card)) in shown.enumerate() {
        let y = area.y + row as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let card_area = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        render_card(f, card, i == app.selected, card_area);
    }
}

fn render_card(f: &mut Frame, card: &PlantCard, selected: bool, area: Rect) {
    let plant = card.plant();
    let due = card.needs_water();

    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut title = vec![Span::styled(format!(" {} ", plant.name), border_style)];
    if due {
        title.push(Span::styled(
            "● ",
            Style::default().fg(Color::Green).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let status = match card.countdown() {
        Countdown::Due => Span::styled(
            "Needs water now!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Countdown::Pending(r) => Span::styled(
            format!("Water in {}", format_remaining(&r)),
            Style::default().fg(Color::White),
        ),
    };

    let text = vec![
        Line::from(Span::styled(
            describe_interval(plant.interval),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(status),
        Line::from(Span::styled(
            if selected { "<w> Mark as Watered" } else { "" },
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title))
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let due = app.cards.iter().filter(|c| c.needs_water()).count();

    let (status, status_color) = match &app.notice {
        Some((notice, _)) => (
            notice.to_string(),
            match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            },
        ),
        None => (format!("{} plants ({} need water)", app.cards.len(), due), Color::Cyan),
    };

    let help_hint = match app.mode {
        Mode::Normal => "<n> add  <w> water  <j/k> navigate  <?> help  <q> quit",
        Mode::AddPlant => "<Tab> switch field  <Enter> add  <Esc> cancel",
        Mode::Help => "any key to close",
    };

    let status_line = Line::from(vec![
        Span::styled(format!(" {} ", status), Style::default().fg(status_color)),
        Span::raw(" ".repeat(area.width.saturating_sub(status.chars().count() as u16 + help_hint.len() as u16 + 4) as usize)),
        Span::styled(help_hint, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]);

    let status_bar = Paragraph::new(status_line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, area);
}

fn render_add_form(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);

    let field = |label: &str, value: &str, placeholder: &str, focused: bool| -> Vec<Line<'static>> {
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let value_line = if value.is_empty() {
            Span::styled(format!("  {}", placeholder), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(format!("  {}{}", value, if focused { "_" } else { "" }))
        };
        vec![
            Line::from(Span::styled(format!(" {}", label), label_style)),
            Line::from(value_line),
            Line::from(""),
        ]
    };

    let mut text = vec![Line::from("")];
    text.extend(field(
        "Plant Name",
        &app.form.name,
        "e.g., Snake Plant",
        app.form.focus == FormField::Name,
    ));
    text.extend(field(
        "Watering Interval (days)",
        &app.form.interval,
        "e.g., 7",
        app.form.focus == FormField::Interval,
    ));
    text.push(Line::from(Span::styled(
        " <Enter> Add Plant  <Esc> Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Add Plant "))
        .style(Style::default().bg(Color::Black));
    f.render_widget(form, area);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![Span::styled(k, Style::default().fg(Color::Yellow)), Span::raw(what)])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(" Plants", Style::default().add_modifier(Modifier::BOLD))),
        key(" j/k     ", "Navigate up/down"),
        key(" g/G     ", "Jump to first/last"),
        key(" n       ", "Add a plant"),
        key(" w       ", "Mark selected plant as watered"),
        Line::from(""),
        Line::from(Span::styled(" Add Form", Style::default().add_modifier(Modifier::BOLD))),
        key(" Tab     ", "Switch field"),
        key(" Enter   ", "Add plant"),
        key(" Esc     ", "Close (keeps what you typed)"),
        Line::from(""),
        key(" q       ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(" Press any key to close ", Style::default().fg(Color::DarkGray))),
    ];

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .style(Style::default().bg(Color::Black));
    f.render_widget(help, area);
}
