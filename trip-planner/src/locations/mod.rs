//! Location capabilities consumed by the planning session.
//!
//! Resolving coordinates to named places and persisting favourites and
//! recents are both external concerns. The session sees them only through
//! the [`LocationResolver`] and [`LocationStore`] traits; this module also
//! provides in-memory and JSON-file stores and a caching resolver wrapper.

mod book;
mod cache;
mod error;
mod file_store;
mod resolver;
mod store;

pub use book::{LocationBook, MAX_RECENTS};
pub use cache::{CacheConfig, CachedLocationResolver};
pub use error::StoreError;
pub use file_store::{JsonFileLocationStore, JsonFileStoreConfig};
pub use resolver::LocationResolver;
pub use store::{InMemoryLocationStore, LocationStore};
