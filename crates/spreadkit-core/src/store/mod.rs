//! Persistence collaborator interface.
//!
//! The layout editor never talks to a database. It hands finished locale
//! payloads to a [`SpreadStore`], which creates a spread row or replaces an
//! existing one (scalar update plus delete-all-then-reinsert of positions).

mod memory;

pub use memory::MemorySpreadStore;

use async_trait::async_trait;

use crate::data::{SpreadId, SpreadPayload, SpreadRecord};
use crate::error::StoreError;

/// Storage backend for spreads, keyed by `(slug, locale)`.
#[async_trait]
pub trait SpreadStore: Send + Sync {
    /// Inserts a new spread row with its positions.
    async fn create(&self, payload: SpreadPayload) -> Result<SpreadRecord, StoreError>;

    /// Updates a spread row and replaces all of its positions.
    async fn replace(&self, id: SpreadId, payload: SpreadPayload) -> Result<(), StoreError>;

    /// Deletes a spread row; its positions go with it.
    async fn delete(&self, id: SpreadId) -> Result<(), StoreError>;

    /// Loads one spread row with positions.
    async fn get(&self, id: SpreadId) -> Result<SpreadRecord, StoreError>;

    /// Loads every locale variant sharing a slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Vec<SpreadRecord>, StoreError>;
}
