//! # Event Bus Module
//!
//! Decoupled notification channel between the layout editor and its host.
//!
//! The editor publishes selection changes, position edits, persistence
//! outcomes and user-visible notices. A host subscribes with a filter and
//! renders them however it likes (toast, status bar, log line).
//!
//! ## Usage
//!
//! ```rust
//! use spreadkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let id = bus.subscribe(EventFilter::Categories(vec![EventCategory::Notice]), |event| {
//!     println!("{}", event.description());
//! });
//! bus.publish(AppEvent::info("Layout synced from EN to ZH")).ok();
//! bus.unsubscribe(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
