//! Location persistence capability.

use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::domain::Location;

use super::book::LocationBook;
use super::error::StoreError;

/// Persistence for favourite and recent locations.
///
/// The planning session only reads from a store; writes come from
/// whatever UI manages favourites.
pub trait LocationStore: Send + Sync {
    fn get_favorites(&self) -> Result<Vec<Location>, StoreError>;

    /// Most recent first.
    fn get_recents(&self) -> Result<Vec<Location>, StoreError>;

    fn add_favorite(&self, location: Location) -> Result<(), StoreError>;

    /// Replace the favourite with the same id.
    fn update_favorite(&self, location: Location) -> Result<(), StoreError>;

    fn delete_favorite(&self, id: Uuid) -> Result<(), StoreError>;

    fn add_recent(&self, location: Location) -> Result<(), StoreError>;

    fn delete_recent(&self, id: Uuid) -> Result<(), StoreError>;
}

/// A store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    book: RwLock<LocationBook>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing book.
    pub fn with_book(book: LocationBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&LocationBook) -> T) -> T {
        let book = self.book.read().unwrap_or_else(PoisonError::into_inner);
        f(&*book)
    }

    fn write<T>(&self, f: impl FnOnce(&mut LocationBook) -> T) -> T {
        let mut book = self.book.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *book)
    }
}

impl LocationStore for InMemoryLocationStore {
    fn get_favorites(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.read(|book| book.favorites.clone()))
    }

    fn get_recents(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.read(|book| book.recents.clone()))
    }

    fn add_favorite(&self, location: Location) -> Result<(), StoreError> {
        self.write(|book| book.add_favorite(location));
        Ok(())
    }

    fn update_favorite(&self, location: Location) -> Result<(), StoreError> {
        self.write(|book| book.update_favorite(location))
    }

    fn delete_favorite(&self, id: Uuid) -> Result<(), StoreError> {
        self.write(|book| book.delete_favorite(id))
    }

    fn add_recent(&self, location: Location) -> Result<(), StoreError> {
        self.write(|book| book.add_recent(location));
        Ok(())
    }

    fn delete_recent(&self, id: Uuid) -> Result<(), StoreError> {
        self.write(|book| book.delete_recent(id))
    }
}
