//! Disk-backed location store.
//!
//! The whole book is a single JSON file, re-read before and rewritten after
//! every change so several processes see each other's writes.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;
use uuid::Uuid;

use crate::domain::Location;

use super::book::LocationBook;
use super::error::StoreError;
use super::store::LocationStore;

/// Configuration for the JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStoreConfig {
    /// Path to the JSON file.
    pub path: PathBuf,
}

impl JsonFileStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStoreConfig {
    fn default() -> Self {
        Self::new("locations.json")
    }
}

/// A `LocationStore` persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileLocationStore {
    config: JsonFileStoreConfig,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileLocationStore {
    pub fn new(config: JsonFileStoreConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Load the book. A missing file is an empty book.
    fn load(&self) -> Result<LocationBook, StoreError> {
        match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LocationBook::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the book, creating parent directories if needed.
    fn save(&self, book: &LocationBook) -> Result<(), StoreError> {
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(book)?;
        std::fs::write(&self.config.path, json)?;
        debug!(path = %self.config.path.display(), "saved location book");
        Ok(())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut LocationBook) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut book = self.load()?;
        let out = f(&mut book)?;
        self.save(&book)?;
        Ok(out)
    }
}

impl LocationStore for JsonFileLocationStore {
    fn get_favorites(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.load()?.favorites)
    }

    fn get_recents(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.load()?.recents)
    }

    fn add_favorite(&self, location: Location) -> Result<(), StoreError> {
        self.modify(|book| {
            book.add_favorite(location);
            Ok(())
        })
    }

    fn update_favorite(&self, location: Location) -> Result<(), StoreError> {
        self.modify(|book| book.update_favorite(location))
    }

    fn delete_favorite(&self, id: Uuid) -> Result<(), StoreError> {
        self.modify(|book| book.delete_favorite(id))
    }

    fn add_recent(&self, location: Location) -> Result<(), StoreError> {
        self.modify(|book| {
            book.add_recent(location);
            Ok(())
        })
    }

    fn delete_recent(&self, id: Uuid) -> Result<(), StoreError> {
        self.modify(|book| book.delete_recent(id))
    }
}
