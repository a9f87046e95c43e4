//! End-to-end countdown scenarios through the public API

use std::num::NonZeroU32;
use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, Duration, TimeZone, Utc};
use sprout::card::{PlantCard, PlantView};
use sprout::countdown::{countdown, Countdown, Remaining};
use sprout::form::{AddPlantForm, ValidationError};
use sprout::plant::Plant;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn snake_plant() -> Plant {
    Plant {
        id: "p1".to_string(),
        name: "Snake Plant".to_string(),
        interval: NonZeroU32::new(7).unwrap(),
        last_watered: t0(),
    }
}

#[test]
fn test_due_one_second_after_interval() {
    let plant = snake_plant();
    let view = PlantView::of(&plant, t0() + Duration::days(7) + Duration::seconds(1));
    assert!(view.needs_water);
    assert_eq!(view.remaining, None);
}

#[test]
fn test_one_whole_day_left() {
    let plant = snake_plant();
    let view = PlantView::of(&plant, t0() + Duration::days(6));
    assert!(!view.needs_water);
    assert_eq!(view.remaining, Some(Remaining { days: 1, hours: 0, minutes: 0, seconds: 0 }));
}

#[test]
fn test_decomposition_across_many_instants() {
    let interval = NonZeroU32::new(30).unwrap();
    let span = 30 * 86_400i64;
    // Walk the interval with an irregular stride so every unit boundary gets hit
    let mut offset = 0i64;
    while offset < span {
        let now = t0() + Duration::seconds(offset);
        match countdown(t0(), interval, now) {
            Countdown::Pending(r) => {
                assert_eq!(r.total_secs() as i64, span - offset);
                assert!(r.hours < 24 && r.minutes < 60 && r.seconds < 60);
            }
            Countdown::Due => panic!("due too early at offset {}", offset),
        }
        offset += 7_919;
    }
    assert!(countdown(t0(), interval, t0() + Duration::seconds(span)).is_due());
}

#[test]
fn test_card_goes_due_while_displayed() {
    let plant = snake_plant();
    let at = Instant::now();
    let start = t0() + Duration::days(7) - Duration::seconds(2);
    let mut card = PlantCard::mount(&plant, StdDuration::from_secs(1), start, at);

    let mut states = Vec::new();
    for step in 1..=3u32 {
        card.tick(start + Duration::seconds(step as i64), at + StdDuration::from_secs(step as u64));
        states.push(card.needs_water());
    }
    assert_eq!(states, [false, true, true]);

    card.unmount();
    assert!(!card.is_mounted());
}

#[test]
fn test_form_rejections() {
    let mut form = AddPlantForm::with_values("", "5");
    assert_eq!(form.submit(|_, _| panic!("must not add")), Err(ValidationError::MissingField));

    let mut form = AddPlantForm::with_values("Fern", "-3");
    assert_eq!(form.submit(|_, _| panic!("must not add")), Err(ValidationError::NonPositiveInterval));
    assert_eq!(form.interval, "-3");
}
