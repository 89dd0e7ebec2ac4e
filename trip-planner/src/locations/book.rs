//! Favourites and recents, shared by every store implementation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Location;

use super::error::StoreError;

/// Maximum number of recent locations kept.
pub const MAX_RECENTS: usize = 20;

/// The persisted set of saved locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationBook {
    #[serde(default)]
    pub favorites: Vec<Location>,
    /// Most recent first.
    #[serde(default)]
    pub recents: Vec<Location>,
}

impl LocationBook {
    /// Add a favourite, replacing one with the same id or describing the same place.
    pub fn add_favorite(&mut self, location: Location) {
        match self
            .favorites
            .iter_mut()
            .find(|f| f.id == location.id || f.is_same_place(&location))
        {
            Some(existing) => *existing = location,
            None => self.favorites.push(location),
        }
    }

    pub fn update_favorite(&mut self, location: Location) -> Result<(), StoreError> {
        let existing = self
            .favorites
            .iter_mut()
            .find(|f| f.id == location.id)
            .ok_or(StoreError::NotFound(location.id))?;
        *existing = location;
        Ok(())
    }

    pub fn delete_favorite(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);
        if self.favorites.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Move `location` to the front of the recents, dropping duplicates and
    /// anything beyond [`MAX_RECENTS`].
    pub fn add_recent(&mut self, location: Location) {
        self.recents
            .retain(|r| r.id != location.id && !r.is_same_place(&location));
        self.recents.insert(0, location);
        self.recents.truncate(MAX_RECENTS);
    }

    pub fn delete_recent(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.recents.len();
        self.recents.retain(|r| r.id != id);
        if self.recents.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
