//! The garden: sole owner of the plant list
//!
//! Every change goes through here and is written back to the repository
//! before the call returns, one full-list write per change.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::card::PlantView;
use crate::error::{Result, SproutError};
use crate::plant::Plant;
use crate::store::PlantRepository;

pub const EMPTY_MESSAGE: &str = "No plants added yet. Add your first plant above!";

/// Everything needed to draw the plant list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenView {
    pub is_empty: bool,
    pub plants: Vec<PlantView>,
}

pub struct Garden<R: PlantRepository> {
    plants: Vec<Plant>,
    repo: R,
}

impl<R: PlantRepository> Garden<R> {
    /// Load the stored list
    pub fn load(repo: R) -> Result<Self> {
        let plants = repo.load()?;
        Ok(Self { plants, repo })
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn add(&mut self, name: &str, interval: NonZeroU32) -> Result<&Plant> {
        self.add_at(name, interval, Utc::now())
    }

    /// Append a plant watered at `now`.
    ///
    /// If the write fails the plant is still in the list; the error is
    /// returned so the caller can report it.
    pub fn add_at(&mut self, name: &str, interval: NonZeroU32, now: DateTime<Utc>) -> Result<&Plant> {
        let plant = Plant::new(name, interval, now);
        info!(id = %plant.id, name = %plant.name, interval = interval.get(), "plant added");
        self.plants.push(plant);
        self.persist()?;
        Ok(&self.plants[self.plants.len() - 1])
    }

    pub fn water(&mut self, id: &str) -> Result<bool> {
        self.water_at(id, Utc::now())
    }

    /// Mark the plant with `id` as watered at `now`. An unknown id changes
    /// nothing and writes nothing; the return value says whether a plant
    /// matched.
    pub fn water_at(&mut self, id: &str, now: DateTime<Utc>) -> Result<bool> {
        let Some(plant) = self.plants.iter_mut().find(|p| p.id == id) else {
            debug!(id, "water: no such plant");
            return Ok(false);
        };
        plant.water(now);
        info!(id, name = %plant.name, "plant watered");
        self.persist()?;
        Ok(true)
    }

    /// Resolve a user-supplied id or name
    pub fn find(&self, id_or_name: &str) -> Result<&Plant> {
        if let Some(plant) = self.plants.iter().find(|p| p.id == id_or_name) {
            return Ok(plant);
        }

        let wanted = id_or_name.trim().to_lowercase();
        let mut matches = self.plants.iter().filter(|p| p.name.to_lowercase() == wanted);
        match (matches.next(), matches.next()) {
            (Some(plant), None) => Ok(plant),
            (Some(_), Some(_)) => Err(SproutError::AmbiguousPlant(id_or_name.to_string())),
            (None, _) => Err(SproutError::PlantNotFound(id_or_name.to_string())),
        }
    }

    pub fn view(&self, now: DateTime<Utc>) -> GardenView {
        GardenView {
            is_empty: self.plants.is_empty(),
            plants: self.plants.iter().map(|p| PlantView::of(p, now)).collect(),
        }
    }

    fn persist(&self) -> Result<()> {
        self.repo.save(&self.plants)
    }
}
