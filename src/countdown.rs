//! Countdown until a plant's next watering
//!
//! Everything here is a pure function of its inputs. Callers decide how often
//! to re-evaluate; see [`crate::card`] for the per-card refresh.

use std::num::NonZeroU32;

use chrono::{DateTime, Days, Utc};
use serde::Serialize;

/// Time left until watering, broken into display units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Remaining {
    /// Split a whole number of seconds. Days are 86 400 s because all
    /// arithmetic happens in UTC.
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u32,
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The next watering time has been reached or passed
    Due,
    Pending(Remaining),
}

impl Countdown {
    pub fn is_due(&self) -> bool {
        matches!(self, Countdown::Due)
    }

    /// Remaining time, zero in every unit once due
    pub fn remaining(&self) -> Remaining {
        match self {
            Countdown::Due => Remaining::default(),
            Countdown::Pending(r) => *r,
        }
    }
}

/// `last_watered` advanced by `interval` calendar days
pub fn next_watering(last_watered: DateTime<Utc>, interval: NonZeroU32) -> DateTime<Utc> {
    last_watered
        .checked_add_days(Days::new(u64::from(interval.get())))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Evaluate the countdown at `now`
pub fn countdown(last_watered: DateTime<Utc>, interval: NonZeroU32, now: DateTime<Utc>) -> Countdown {
    let next = next_watering(last_watered, interval);
    if now >= next {
        return Countdown::Due;
    }

    // Positive, so truncation is floor
    let secs = (next - now).num_seconds().max(0) as u64;
    Countdown::Pending(Remaining::from_secs(secs))
}

/// Whole days since the last watering (negative if it lies in the future)
pub fn days_since_watered(last_watered: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_watered).num_days()
}

/// Format as "1d 02h 03m 04s"
pub fn format_remaining(r: &Remaining) -> String {
    format!("{}d {:02}h {:02}m {:02}s", r.days, r.hours, r.minutes, r.seconds)
}

pub fn status_line(countdown: &Countdown) -> String {
    match countdown {
        Countdown::Due => "Needs water now!".to_string(),
        Countdown::Pending(r) => format!("Water in {}", format_remaining(r)),
    }
}

pub fn describe_interval(interval: NonZeroU32) -> String {
    let n = interval.get();
    format!("Waters every {} day{}", n, if n != 1 { "s" } else { "" })
}
