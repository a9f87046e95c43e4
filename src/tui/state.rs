//! TUI state - the App and the actions the input layer triggers

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use tracing::{error, warn};

use crate::card::{sync_cards, PlantCard};
use crate::config::Config;
use crate::error::Result;
use crate::form::AddPlantForm;
use crate::garden::Garden;
use crate::notice::Notice;
use crate::store::PlantStore;

use super::types::*;

/// How long a notice stays in the status bar
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Layout areas for click detection
#[derive(Default, Clone, Copy)]
pub struct LayoutAreas {
    pub plants: Rect,
}

/// Main application state
pub struct App {
    pub garden: Garden<PlantStore>,
    /// One mounted card per displayed plant, in list order
    pub cards: Vec<PlantCard>,
    pub form: AddPlantForm,
    pub selected: usize,
    pub scroll: usize,
    pub mode: Mode,
    pub should_quit: bool,
    pub notice: Option<(Notice, Instant)>,
    pub refresh: Duration,
    pub layout_areas: LayoutAreas,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let garden = Garden::load(PlantStore::open(config)?)?;
        Ok(Self::with_garden(garden, config.refresh_interval()))
    }

    pub fn with_garden(garden: Garden<PlantStore>, refresh: Duration) -> Self {
        let mut app = Self {
            garden,
            cards: Vec::new(),
            form: AddPlantForm::new(),
            selected: 0,
            scroll: 0,
            mode: Mode::Normal,
            should_quit: false,
            notice: None,
            refresh,
            layout_areas: LayoutAreas::default(),
        };
        app.sync_cards(Utc::now(), Instant::now());
        app
    }

    /// Mount, update, or drop cards to match the garden
    pub fn sync_cards(&mut self, now: DateTime<Utc>, at: Instant) {
        sync_cards(&mut self.cards, self.garden.plants(), self.refresh, now, at);
        if self.selected >= self.cards.len() {
            self.selected = self.cards.len().saturating_sub(1);
        }
    }

    /// Drive every card's refresh timer and expire old notices.
    /// Returns true when something visible changed.
    pub fn tick(&mut self, now: DateTime<Utc>, at: Instant) -> bool {
        let mut changed = false;
        for card in self.cards.iter_mut() {
            changed |= card.tick(now, at);
        }
        if self.notice.as_ref().is_some_and(|(_, shown)| at.duration_since(*shown) > NOTICE_TTL) {
            self.notice = None;
            changed = true;
        }
        changed
    }

    pub fn show_notice(&mut self, notice: Notice, at: Instant) {
        self.notice = Some((notice, at));
    }

    pub fn selected_card(&self) -> Option<&PlantCard> {
        self.cards.get(self.selected)
    }

    pub fn next_plant(&mut self) {
        if !self.cards.is_empty() {
            self.selected = (self.selected + 1).min(self.cards.len() - 1);
        }
    }

    pub fn previous_plant(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first_plant(&mut self) {
        self.selected = 0;
    }

    pub fn last_plant(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }

    pub fn open_add_form(&mut self) {
        self.mode = Mode::AddPlant;
    }

    /// Leave the form; its text is kept for next time
    pub fn close_add_form(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Submit the add form. Validation problems keep the form open with its
    /// text intact; success closes it and selects the new plant.
    pub fn submit_form(&mut self, now: DateTime<Utc>, at: Instant) {
        let mut outcome = Ok(());
        let garden = &mut self.garden;
        let result = self.form.submit(|name, interval| {
            outcome = garden.add_at(name, interval, now).map(|_| ());
        });

        match result {
            Ok(notice) => {
                self.mode = Mode::Normal;
                self.sync_cards(now, at);
                self.last_plant();
                match outcome {
                    Ok(()) => self.show_notice(notice, at),
                    Err(e) => {
                        error!(error = %e, "failed to save new plant");
                        self.show_notice(Notice::error(format!("Plant added but not saved: {}", e)), at);
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "add form rejected");
                self.show_notice(Notice::error(e.to_string()), at);
            }
        }
    }

    /// "Mark as watered" on the selected card
    pub fn water_selected(&mut self, now: DateTime<Utc>, at: Instant) {
        let Some(card) = self.cards.get(self.selected) else {
            return;
        };

        let mut outcome = Ok(false);
        let garden = &mut self.garden;
        let notice = card.water(|id| outcome = garden.water_at(id, now));

        match outcome {
            Ok(_) => self.show_notice(notice, at),
            Err(e) => {
                error!(error = %e, "failed to save watering");
                self.show_notice(Notice::error(format!("Watered but not saved: {}", e)), at);
            }
        }
        self.sync_cards(now, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorruptDataPolicy;
    use crate::db::Database;
    use crate::store::PlantRepository;
    use chrono::TimeZone;

    const SEC: Duration = Duration::from_secs(1);

    fn app() -> App {
        let store = PlantStore::new(Database::open_in_memory().unwrap(), CorruptDataPolicy::Fail);
        App::with_garden(Garden::load(store).unwrap(), SEC)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn type_into_form(app: &mut App, name: &str, interval: &str) {
        app.open_add_form();
        app.form = AddPlantForm::with_values(name, interval);
    }

    #[test]
    fn test_submit_adds_card_and_persists() {
        let mut app = app();
        let at = Instant::now();
        type_into_form(&mut app, "Fern", "5");
        app.submit_form(t0(), at);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.cards.len(), 1);
        assert!(app.cards[0].is_mounted());
        assert_eq!(app.garden.repository().load().unwrap().len(), 1);
        assert!(app.notice.as_ref().is_some_and(|(n, _)| !n.is_error()));
    }

    #[test]
    fn test_invalid_submit_keeps_form() {
        let mut app = app();
        type_into_form(&mut app, "Fern", "-3");
        app.submit_form(t0(), Instant::now());

        assert_eq!(app.mode, Mode::AddPlant);
        assert_eq!(app.form.interval, "-3");
        assert!(app.cards.is_empty());
        assert!(app.notice.as_ref().is_some_and(|(n, _)| n.is_error()));
    }

    #[test]
    fn test_water_selected_resets_countdown() {
        let mut app = app();
        let at = Instant::now();
        type_into_form(&mut app, "Fern", "1");
        app.submit_form(t0(), at);

        let later = t0() + chrono::Duration::days(3);
        assert!(app.tick(later, at + SEC));
        assert!(app.cards[0].needs_water());

        app.water_selected(later, at + SEC);
        assert!(!app.cards[0].needs_water());
        assert_eq!(app.garden.plants()[0].last_watered, later);
    }

    #[test]
    fn test_water_with_no_plants() {
        let mut app = app();
        app.water_selected(t0(), Instant::now());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_notice_expires() {
        let mut app = app();
        let at = Instant::now();
        app.show_notice(Notice::success("Hi", "there"), at);
        assert!(!app.tick(t0(), at + SEC));
        assert!(app.tick(t0(), at + NOTICE_TTL + SEC));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app();
        let at = Instant::now();
        for name in ["A", "B", "C"] {
            type_into_form(&mut app, name, "2");
            app.submit_form(t0(), at);
        }
        assert_eq!(app.selected, 2);
        app.next_plant();
        assert_eq!(app.selected, 2);
        app.first_plant();
        app.previous_plant();
        assert_eq!(app.selected, 0);
        app.next_plant();
        assert_eq!(app.selected_card().map(|c| c.plant().name.as_str()), Some("B"));
    }
}
