//! Plant list persistence
//!
//! The whole list is one value under one key: every save rewrites it.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::{Config, CorruptDataPolicy};
use crate::db::Database;
use crate::error::{Result, SproutError};
use crate::plant::{Plant, MAX_INTERVAL_DAYS};

/// Key holding the serialized plant list
pub const PLANTS_KEY: &str = "plants";

/// Key receiving the raw text of a list that failed to load
pub const CORRUPT_KEY: &str = "plants.corrupt";

/// Storage for the full plant list
pub trait PlantRepository {
    /// Read the stored list; absent data is an empty list
    fn load(&self) -> Result<Vec<Plant>>;

    /// Replace the stored list
    fn save(&self, plants: &[Plant]) -> Result<()>;
}

/// [`PlantRepository`] backed by the key-value database
pub struct PlantStore {
    db: Database,
    policy: CorruptDataPolicy,
}

impl PlantStore {
    pub fn new(db: Database, policy: CorruptDataPolicy) -> Self {
        Self { db, policy }
    }

    /// Open the configured database
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Database::open()?, config.on_corrupt_data))
    }

    /// The stored text, exactly as written
    pub fn raw(&self) -> Result<Option<String>> {
        self.db.get(PLANTS_KEY)
    }
}

impl PlantRepository for PlantStore {
    fn load(&self) -> Result<Vec<Plant>> {
        let Some(raw) = self.db.get(PLANTS_KEY)? else {
            info!("no stored plants, starting empty");
            return Ok(Vec::new());
        };

        match decode_plants(&raw) {
            Ok(plants) => {
                info!(count = plants.len(), "loaded plants");
                Ok(plants)
            }
            Err(e) => match self.policy {
                CorruptDataPolicy::Reset => {
                    warn!(error = %e, backup_key = CORRUPT_KEY, "stored plants unreadable, starting empty");
                    self.db.set(CORRUPT_KEY, &raw)?;
                    Ok(Vec::new())
                }
                CorruptDataPolicy::Fail => Err(e),
            },
        }
    }

    fn save(&self, plants: &[Plant]) -> Result<()> {
        self.db.set(PLANTS_KEY, &encode_plants(plants)?)?;
        info!(count = plants.len(), "saved plants");
        Ok(())
    }
}

pub fn encode_plants(plants: &[Plant]) -> Result<String> {
    Ok(serde_json::to_string(plants)?)
}

/// Parse stored text and check the list invariants
pub fn decode_plants(raw: &str) -> Result<Vec<Plant>> {
    let plants: Vec<Plant> = serde_json::from_str(raw)
        .map_err(|e| SproutError::CorruptData(e.to_string()))?;

    let mut ids = HashSet::new();
    for plant in &plants {
        if plant.name.trim().is_empty() {
            return Err(SproutError::CorruptData(format!("plant {} has an empty name", plant.id)));
        }
        if plant.interval.get() > MAX_INTERVAL_DAYS {
            return Err(SproutError::CorruptData(format!(
                "plant {} has an interval of {} days",
                plant.id, plant.interval
            )));
        }
        if !ids.insert(plant.id.as_str()) {
            return Err(SproutError::CorruptData(format!("duplicate plant id {}", plant.id)));
        }
    }

    Ok(plants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::num::NonZeroU32;

    fn store(policy: CorruptDataPolicy) -> PlantStore {
        PlantStore::new(Database::open_in_memory().unwrap(), policy)
    }

    fn sample() -> Vec<Plant> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        vec![
            Plant::new("Snake Plant", NonZeroU32::new(7).unwrap(), t0),
            Plant::new("Fern", NonZeroU32::new(2).unwrap(), t0 + chrono::Duration::hours(5)),
        ]
    }

    #[test]
    fn test_absent_is_empty() {
        let store = store(CorruptDataPolicy::Fail);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = store(CorruptDataPolicy::Reset);
        let plants = sample();
        store.save(&plants).unwrap();
        assert_eq!(store.load().unwrap(), plants);
    }

    #[test]
    fn test_reads_browser_format() {
        let store = store(CorruptDataPolicy::Fail);
        store.db.set(
            PLANTS_KEY,
            r#"[{"id":"a1b2","name":"Snake Plant","interval":7,"lastWatered":"2024-01-01T00:00:00.000Z"}]"#,
        ).unwrap();
        let plants = store.load().unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id, "a1b2");
        assert_eq!(plants[0].interval.get(), 7);
    }

    #[test]
    fn test_reset_policy_backs_up_raw_text() {
        let store = store(CorruptDataPolicy::Reset);
        store.db.set(PLANTS_KEY, "{not json").unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.db.get(CORRUPT_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_fail_policy_surfaces_error() {
        let store = store(CorruptDataPolicy::Fail);
        store.db.set(PLANTS_KEY, "{not json").unwrap();
        assert!(matches!(store.load(), Err(SproutError::CorruptData(_))));
        assert_eq!(store.db.get(CORRUPT_KEY).unwrap(), None);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"p1","name":"A","interval":1,"lastWatered":"2024-01-01T00:00:00.000Z"},
            {"id":"p1","name":"B","interval":2,"lastWatered":"2024-01-01T00:00:00.000Z"}
        ]"#;
        assert!(matches!(decode_plants(raw), Err(SproutError::CorruptData(_))));
    }

    #[test]
    fn test_rejects_blank_name_and_huge_interval() {
        let blank = r#"[{"id":"p1","name":"  ","interval":1,"lastWatered":"2024-01-01T00:00:00.000Z"}]"#;
        assert!(decode_plants(blank).is_err());
        let huge = r#"[{"id":"p1","name":"A","interval":99999,"lastWatered":"2024-01-01T00:00:00.000Z"}]"#;
        assert!(decode_plants(huge).is_err());
    }

    #[test]
    fn test_save_overwrites() {
        let store = store(CorruptDataPolicy::Reset);
        let mut plants = sample();
        store.save(&plants).unwrap();
        plants.truncate(1);
        store.save(&plants).unwrap();
        assert_eq!(store.load().unwrap(), plants);
    }
}
