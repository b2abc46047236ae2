//! Spread editor session.
//!
//! A [`SpreadEditor`] owns the `en` and `zh` drafts of one slug, the canvas
//! of the active tab and an undo history, and drives save/delete against a
//! [`SpreadStore`](spreadkit_core::SpreadStore).

mod draft;
mod session;

pub use draft::LocaleDraft;
pub use session::SpreadEditor;

use serde::{Deserialize, Serialize};
use spreadkit_core::{Locale, SpreadId, StoreError};
use thiserror::Error;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Behaviour knobs for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Tab shown when a session starts.
    pub default_locale: Locale,
    /// Undo steps kept; older steps are dropped.
    pub history_limit: usize,
    /// Apply only the latest pointer move per frame.
    pub coalesce_moves: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            history_limit: DEFAULT_HISTORY_LIMIT,
            coalesce_moves: true,
        }
    }
}

/// Locales written and skipped by a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: Vec<(Locale, SpreadId)>,
    pub skipped: Vec<Locale>,
}

/// A save stopped at `locale`.
///
/// `saved` lists the locales persisted before the failure; they are not
/// rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to save {locale}: {source}")]
pub struct SaveError {
    pub locale: Locale,
    pub saved: Vec<(Locale, SpreadId)>,
    pub source: StoreError,
}

/// A delete-all stopped at `locale`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to delete {locale}: {source}")]
pub struct DeleteError {
    pub locale: Locale,
    pub deleted: Vec<Locale>,
    pub source: StoreError,
}
