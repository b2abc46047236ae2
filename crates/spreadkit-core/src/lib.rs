//! # SpreadKit Core
//!
//! Core types, traits, and utilities for SpreadKit.
//! Provides the spread data model, the error hierarchy, the notification
//! event bus, and the persistence collaborator used by the layout editor.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod store;

pub use data::{
    Locale, Position, PositionId, SpreadId, SpreadPayload, SpreadRecord, LOCALES,
};

pub use error::{Error, LayoutError, Result, StoreError};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, LayoutEvent,
    NoticeEvent, NoticeLevel, PersistenceEvent, SelectionEvent, SubscriptionId,
};

pub use store::{MemorySpreadStore, SpreadStore};
