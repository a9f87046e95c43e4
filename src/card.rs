//! Plant card: one plant's live countdown and its "watered" action
//!
//! A card keeps a read-only copy of its plant. It never changes the plant
//! itself; watering goes through the callback handed to [`PlantCard::water`].
//! While mounted, the card re-evaluates its countdown once per refresh period
//! using its own [`RepeatingTask`].

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::countdown::{self, Countdown, Remaining};
use crate::notice::Notice;
use crate::plant::Plant;
use crate::ticker::RepeatingTask;

/// What a card shows, independent of how it is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView {
    pub id: String,
    pub name: String,
    pub interval: u32,
    pub needs_water: bool,
    /// `None` once watering is due
    pub remaining: Option<Remaining>,
}

impl PlantView {
    pub fn of(plant: &Plant, now: DateTime<Utc>) -> Self {
        Self::from_countdown(plant, countdown::countdown(plant.last_watered, plant.interval, now))
    }

    fn from_countdown(plant: &Plant, countdown: Countdown) -> Self {
        Self {
            id: plant.id.clone(),
            name: plant.name.clone(),
            interval: plant.interval.get(),
            needs_water: countdown.is_due(),
            remaining: match countdown {
                Countdown::Due => None,
                Countdown::Pending(r) => Some(r),
            },
        }
    }
}

pub struct PlantCard {
    plant: Plant,
    period: Duration,
    ticker: Option<RepeatingTask>,
    countdown: Countdown,
}

impl PlantCard {
    /// Show `plant` and start refreshing every `period`
    pub fn mount(plant: &Plant, period: Duration, now: DateTime<Utc>, at: Instant) -> Self {
        Self {
            plant: plant.clone(),
            period,
            ticker: Some(RepeatingTask::start(period, at)),
            countdown: countdown::countdown(plant.last_watered, plant.interval, now),
        }
    }

    /// Take a newer copy of the plant. When the schedule inputs changed the
    /// refresh timer is restarted and the countdown recomputed right away.
    pub fn update(&mut self, plant: &Plant, now: DateTime<Utc>, at: Instant) -> bool {
        let changed = plant.last_watered != self.plant.last_watered
            || plant.interval != self.plant.interval;
        self.plant = plant.clone();

        if changed {
            debug!(plant = %self.plant.id, "schedule changed, restarting countdown");
            if let Some(ticker) = self.ticker.as_mut() {
                ticker.cancel();
            }
            self.ticker = Some(RepeatingTask::start(self.period, at));
            self.recompute(now);
        }
        changed
    }

    /// Re-evaluate the countdown if the refresh timer has fired
    pub fn tick(&mut self, now: DateTime<Utc>, at: Instant) -> bool {
        let fired = self.ticker.as_mut().is_some_and(|t| t.poll(at));
        if fired {
            self.recompute(now);
        }
        fired
    }

    /// Stop refreshing; the card is no longer displayed
    pub fn unmount(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.ticker.as_ref().is_some_and(RepeatingTask::is_active)
    }

    fn recompute(&mut self, now: DateTime<Utc>) {
        self.countdown = countdown::countdown(self.plant.last_watered, self.plant.interval, now);
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn id(&self) -> &str {
        &self.plant.id
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn needs_water(&self) -> bool {
        self.countdown.is_due()
    }

    pub fn view(&self) -> PlantView {
        PlantView::from_countdown(&self.plant, self.countdown)
    }

    pub fn status_line(&self) -> String {
        countdown::status_line(&self.countdown)
    }

    /// "Mark as watered": ask the owner to water this plant
    pub fn water(&self, on_water: impl FnOnce(&str)) -> Notice {
        on_water(&self.plant.id);
        Notice::success(
            "Plant Watered! 🌿",
            format!("{} has been watered. Timer reset.", self.plant.name),
        )
    }
}

/// Bring `cards` in line with `plants`: same order, one card per plant.
/// Cards whose plant is gone are unmounted and dropped.
pub fn sync_cards(
    cards: &mut Vec<PlantCard>,
    plants: &[Plant],
    period: Duration,
    now: DateTime<Utc>,
    at: Instant,
) {
    let mut old: Vec<PlantCard> = std::mem::take(cards);

    for plant in plants {
        match old.iter().position(|c| c.id() == plant.id) {
            Some(i) => {
                let mut card = old.swap_remove(i);
                card.update(plant, now, at);
                cards.push(card);
            }
            None => cards.push(PlantCard::mount(plant, period, now, at)),
        }
    }

    for mut card in old {
        card.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::num::NonZeroU32;

    const SEC: Duration = Duration::from_secs(1);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn plant(id: &str, interval: u32) -> Plant {
        Plant {
            id: id.to_string(),
            name: format!("Plant {}", id),
            interval: NonZeroU32::new(interval).unwrap(),
            last_watered: t0(),
        }
    }

    #[test]
    fn test_mount_computes_countdown() {
        let at = Instant::now();
        let card = PlantCard::mount(&plant("p1", 7), SEC, t0() + chrono::Duration::days(6), at);
        assert!(card.is_mounted());
        assert!(!card.needs_water());
        let view = card.view();
        assert_eq!(view.remaining, Some(Remaining { days: 1, hours: 0, minutes: 0, seconds: 0 }));
        assert_eq!(view.interval, 7);
    }

    #[test]
    fn test_tick_refreshes_once_per_period() {
        let at = Instant::now();
        let start = t0() + chrono::Duration::days(7) - chrono::Duration::seconds(1);
        let mut card = PlantCard::mount(&plant("p1", 7), SEC, start, at);
        assert!(!card.needs_water());

        let later = start + chrono::Duration::seconds(2);
        assert!(!card.tick(later, at + Duration::from_millis(500)));
        assert!(!card.needs_water());
        assert!(card.tick(later, at + SEC));
        assert!(card.needs_water());
        assert_eq!(card.view().remaining, None);
    }

    #[test]
    fn test_update_restarts_on_watering() {
        let at = Instant::now();
        let mut card = PlantCard::mount(&plant("p1", 1), SEC, t0() + chrono::Duration::days(2), at);
        assert!(card.needs_water());

        let mut watered = plant("p1", 1);
        watered.last_watered = t0() + chrono::Duration::days(2);
        let at2 = at + Duration::from_millis(700);
        assert!(card.update(&watered, watered.last_watered, at2));
        assert!(!card.needs_water());

        // New timer is anchored at the update, not the mount
        assert!(!card.tick(watered.last_watered, at + SEC));
        assert!(card.tick(watered.last_watered, at2 + SEC));
    }

    #[test]
    fn test_update_without_schedule_change() {
        let at = Instant::now();
        let mut card = PlantCard::mount(&plant("p1", 3), SEC, t0(), at);
        let mut renamed = plant("p1", 3);
        renamed.name = "Monstera".to_string();
        assert!(!card.update(&renamed, t0(), at));
        assert_eq!(card.plant().name, "Monstera");
    }

    #[test]
    fn test_unmount_cancels_timer() {
        let at = Instant::now();
        let mut card = PlantCard::mount(&plant("p1", 3), SEC, t0(), at);
        card.unmount();
        assert!(!card.is_mounted());
        assert!(!card.tick(t0(), at + 5 * SEC));
    }

    #[test]
    fn test_water_dispatches_id() {
        let at = Instant::now();
        let card = PlantCard::mount(&plant("p1", 3), SEC, t0(), at);
        let mut seen = None;
        let notice = card.water(|id| seen = Some(id.to_string()));
        assert_eq!(seen.as_deref(), Some("p1"));
        assert!(!notice.is_error());
        assert!(notice.description.contains("Plant p1"));
        // The card's copy is unchanged until the owner pushes an update
        assert_eq!(card.plant().last_watered, t0());
    }

    #[test]
    fn test_sync_cards_follows_list() {
        let at = Instant::now();
        let mut cards = Vec::new();
        let plants = vec![plant("a", 1), plant("b", 2)];
        sync_cards(&mut cards, &plants, SEC, t0(), at);
        assert_eq!(cards.iter().map(PlantCard::id).collect::<Vec<_>>(), ["a", "b"]);

        let plants = vec![plant("b", 2), plant("c", 3)];
        sync_cards(&mut cards, &plants, SEC, t0(), at);
        assert_eq!(cards.iter().map(PlantCard::id).collect::<Vec<_>>(), ["b", "c"]);
        assert!(cards.iter().all(PlantCard::is_mounted));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = PlantView::of(&plant("p1", 1), t0() + chrono::Duration::days(3));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["needsWater"], true);
        assert!(json["remaining"].is_null());
    }
}
