//! Event type definitions for the event bus.
//!
//! Events are grouped by category so a host can listen to selection changes
//! without seeing every coordinate update. All events are cloneable and
//! serializable for logging.

use serde::{Deserialize, Serialize};

use crate::data::{Locale, SpreadId};

/// Root event enum for all editor events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Slot selection on the canvas
    Selection(SelectionEvent),
    /// Position list edits and layout sync
    Layout(LayoutEvent),
    /// Save and delete round trips
    Persistence(PersistenceEvent),
    /// User-visible notifications
    Notice(NoticeEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Layout(_) => EventCategory::Layout,
            AppEvent::Persistence(_) => EventCategory::Persistence,
            AppEvent::Notice(_) => EventCategory::Notice,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Selection(e) => e.description(),
            AppEvent::Layout(e) => e.description(),
            AppEvent::Persistence(e) => e.description(),
            AppEvent::Notice(e) => e.message.clone(),
        }
    }

    /// Shorthand for an info notice
    pub fn info(message: impl Into<String>) -> Self {
        AppEvent::Notice(NoticeEvent {
            level: NoticeLevel::Info,
            message: message.into(),
        })
    }

    /// Shorthand for an error notice
    pub fn error(message: impl Into<String>) -> Self {
        AppEvent::Notice(NoticeEvent {
            level: NoticeLevel::Error,
            message: message.into(),
        })
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection events.
    Selection,
    /// Layout edit events.
    Layout,
    /// Persistence events.
    Persistence,
    /// Notification events.
    Notice,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Layout => write!(f, "Layout"),
            EventCategory::Persistence => write!(f, "Persistence"),
            EventCategory::Notice => write!(f, "Notice"),
        }
    }
}

/// Selection observer events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A slot was pressed on the canvas.
    SlotSelected {
        /// Locale tab the slot belongs to.
        locale: Locale,
        /// Slot position in the list.
        slot: usize,
    },
    /// Nothing is selected anymore.
    Cleared {
        /// Locale tab that lost its selection.
        locale: Locale,
    },
}

impl SelectionEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::SlotSelected { locale, slot } => {
                format!("Selected slot {} ({})", slot, locale)
            }
            SelectionEvent::Cleared { locale } => format!("Selection cleared ({})", locale),
        }
    }
}

/// Position list events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// A slot was dragged to a new board coordinate.
    PositionMoved {
        /// Locale of the edited list.
        locale: Locale,
        /// Slot position in the list.
        slot: usize,
        /// New board x.
        x: i32,
        /// New board y.
        y: i32,
    },
    /// A slot was appended.
    PositionAdded {
        /// Locale of the edited list.
        locale: Locale,
        /// Slot position of the new entry.
        slot: usize,
    },
    /// A slot was removed.
    PositionRemoved {
        /// Locale of the edited list.
        locale: Locale,
        /// Slot position of the removed entry.
        slot: usize,
    },
    /// Geometry was copied from one locale to the other.
    Synced {
        /// Source locale.
        from: Locale,
        /// Target locale.
        to: Locale,
        /// Number of positions in the target after the sync.
        count: usize,
    },
}

impl LayoutEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            LayoutEvent::PositionMoved { locale, slot, x, y } => {
                format!("Slot {} moved to {}, {} ({})", slot, x, y, locale)
            }
            LayoutEvent::PositionAdded { locale, slot } => {
                format!("Slot {} added ({})", slot, locale)
            }
            LayoutEvent::PositionRemoved { locale, slot } => {
                format!("Slot {} removed ({})", slot, locale)
            }
            LayoutEvent::Synced { from, to, count } => {
                format!("Synced {} positions from {} to {}", count, from, to)
            }
        }
    }
}

/// Save/delete events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    /// A locale was created or replaced.
    Saved {
        /// The saved locale.
        locale: Locale,
        /// The spread row id.
        id: SpreadId,
    },
    /// A locale was skipped because its name is empty.
    Skipped {
        /// The skipped locale.
        locale: Locale,
    },
    /// The collaborator rejected a locale payload.
    SaveFailed {
        /// The failing locale.
        locale: Locale,
        /// The rejection message.
        reason: String,
    },
    /// A locale row was deleted.
    Deleted {
        /// The deleted locale.
        locale: Locale,
        /// The deleted spread row id.
        id: SpreadId,
    },
    /// The collaborator failed to delete a locale row.
    DeleteFailed {
        /// The failing locale.
        locale: Locale,
        /// The rejection message.
        reason: String,
    },
}

impl PersistenceEvent {
    /// Short description for logging
    pub fn description(&self) -> String {
        match self {
            PersistenceEvent::Saved { locale, id } => format!("Saved {} as spread {}", locale, id),
            PersistenceEvent::Skipped { locale } => format!("Skipped {} (no name)", locale),
            PersistenceEvent::SaveFailed { locale, reason } => {
                format!("Failed to save {}: {}", locale, reason)
            }
            PersistenceEvent::Deleted { locale, id } => {
                format!("Deleted {} spread {}", locale, id)
            }
            PersistenceEvent::DeleteFailed { locale, reason } => {
                format!("Failed to delete {}: {}", locale, reason)
            }
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Confirmation message.
    Info,
    /// Failure message.
    Error,
}

/// A message shown to the admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeEvent {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}
