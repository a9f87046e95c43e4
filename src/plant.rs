use std::num::NonZeroU32;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on a watering interval, in days (100 years)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// A plant and its watering schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// Days between waterings
    pub interval: NonZeroU32,
    #[serde(with = "iso_millis")]
    pub last_watered: DateTime<Utc>,
}

impl Plant {
    /// Create a plant that was just watered at `now`
    pub fn new(name: impl Into<String>, interval: NonZeroU32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            interval,
            last_watered: stamp(now),
        }
    }

    /// Record a watering at `now`
    pub fn water(&mut self, now: DateTime<Utc>) {
        self.last_watered = stamp(now);
    }
}

/// Truncate to the precision the stored format keeps
pub fn stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

/// `2024-01-01T00:00:00.000Z` on write, any RFC 3339 instant on read
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
