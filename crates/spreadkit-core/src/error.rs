//! Error handling for SpreadKit
//!
//! Provides error types for every layer of the editor:
//! - Layout errors (position list edits)
//! - Store errors (persistence collaborator)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::data::{Locale, SpreadId};

/// Layout error type
///
/// Raised by position list edits that address a slot which is not there.
/// Coordinate math never fails; out-of-range coordinates are clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The addressed slot does not exist in the list
    #[error("Slot {slot} out of range (list has {len} positions)")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// The length of the list.
        len: usize,
    },
}

/// Store error type
///
/// Represents rejections from the persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// The empty field name.
        field: &'static str,
    },

    /// A spread with the same slug and locale already exists
    #[error("Spread with slug '{slug}' and locale '{locale}' already exists")]
    Duplicate {
        /// The conflicting slug.
        slug: String,
        /// The conflicting locale.
        locale: Locale,
    },

    /// No spread row with this id
    #[error("Spread {id} not found")]
    NotFound {
        /// The missing spread id.
        id: SpreadId,
    },

    /// The backend failed for a reason outside the editor's control
    #[error("Store backend error: {message}")]
    Backend {
        /// The backend message.
        message: String,
    },
}

impl StoreError {
    /// Create a backend error from a message
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend {
            message: msg.into(),
        }
    }
}

/// Main error type for SpreadKit
///
/// Wraps the error of whichever layer failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Check if this is a store rejection
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
