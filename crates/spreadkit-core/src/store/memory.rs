//! In-memory spread store.
//!
//! Mirrors the admin API's storage rules: `(slug, locale)` is unique, a
//! spread owns its positions, and replacing a spread discards every old
//! position row before inserting the new list with fresh ids.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;

use super::SpreadStore;
use crate::data::{Position, PositionId, SpreadId, SpreadPayload, SpreadRecord};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Tables {
    spreads: BTreeMap<SpreadId, SpreadRecord>,
    next_spread_id: i64,
    next_position_id: i64,
    requests: usize,
}

impl Tables {
    fn insert_positions(&mut self, positions: Vec<Position>) -> Vec<Position> {
        positions
            .into_iter()
            .map(|p| {
                self.next_position_id += 1;
                Position {
                    identity: Some(PositionId(self.next_position_id)),
                    ..p
                }
            })
            .collect()
    }
}

/// Thread-safe in-memory [`SpreadStore`].
#[derive(Debug, Default)]
pub struct MemorySpreadStore {
    tables: Mutex<Tables>,
}

fn optional(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl MemorySpreadStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored spread rows.
    pub fn len(&self) -> usize {
        self.tables.lock().spreads.len()
    }

    /// Whether the store holds no spreads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of write requests (create/replace/delete) received so far.
    pub fn request_count(&self) -> usize {
        self.tables.lock().requests
    }

    /// Total number of position rows across all spreads.
    pub fn position_count(&self) -> usize {
        self.tables
            .lock()
            .spreads
            .values()
            .map(|s| s.positions.len())
            .sum()
    }
}

#[async_trait]
impl SpreadStore for MemorySpreadStore {
    async fn create(&self, payload: SpreadPayload) -> Result<SpreadRecord, StoreError> {
        let mut tables = self.tables.lock();
        tables.requests += 1;

        for (field, value) in [
            ("slug", &payload.slug),
            ("name", &payload.name),
            ("description", &payload.description),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::MissingField { field });
            }
        }

        let taken = tables
            .spreads
            .values()
            .any(|s| s.slug == payload.slug && s.locale == payload.locale);
        if taken {
            return Err(StoreError::Duplicate {
                slug: payload.slug,
                locale: payload.locale,
            });
        }

        tables.next_spread_id += 1;
        let id = SpreadId(tables.next_spread_id);
        let now = Utc::now();
        let positions = tables.insert_positions(payload.positions);
        let record = SpreadRecord {
            id,
            slug: payload.slug,
            locale: payload.locale,
            name: payload.name,
            description: payload.description,
            detail: optional(payload.detail),
            difficulty: optional(payload.difficulty),
            recommended: payload.recommended,
            tags: payload.tags,
            positions,
            created_at: now,
            updated_at: now,
        };
        tables.spreads.insert(id, record.clone());
        tracing::debug!(%id, slug = %record.slug, locale = %record.locale, "spread created");
        Ok(record)
    }

    async fn replace(&self, id: SpreadId, payload: SpreadPayload) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        tables.requests += 1;

        if !tables.spreads.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }
        let clash = tables.spreads.values().any(|s| {
            s.id != id && s.slug == payload.slug && s.locale == payload.locale
        });
        if clash {
            return Err(StoreError::Duplicate {
                slug: payload.slug,
                locale: payload.locale,
            });
        }

        let positions = tables.insert_positions(payload.positions);
        let record = tables
            .spreads
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        record.slug = payload.slug;
        record.locale = payload.locale;
        record.name = payload.name;
        record.description = payload.description;
        record.detail = optional(payload.detail);
        record.difficulty = optional(payload.difficulty);
        record.recommended = payload.recommended;
        record.tags = payload.tags;
        record.positions = positions;
        record.updated_at = Utc::now();
        tracing::debug!(%id, positions = record.positions.len(), "spread replaced");
        Ok(())
    }

    async fn delete(&self, id: SpreadId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        tables.requests += 1;
        tables
            .spreads
            .remove(&id)
            .map(|_| tracing::debug!(%id, "spread deleted"))
            .ok_or(StoreError::NotFound { id })
    }

    async fn get(&self, id: SpreadId) -> Result<SpreadRecord, StoreError> {
        self.tables
            .lock()
            .spreads
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<SpreadRecord>, StoreError> {
        Ok(self
            .tables
            .lock()
            .spreads
            .values()
            .filter(|s| s.slug == slug)
            .cloned()
            .collect())
    }
}
