//! Per-locale editable draft.

use serde::{Deserialize, Serialize};
use spreadkit_core::{Locale, Position, SpreadId, SpreadPayload, SpreadRecord};

use crate::positions::{clamp_positions, out_of_range};

/// The editable variant of a spread in one locale.
///
/// `tags` is kept as the comma-separated text the admin types; it is split
/// only when a payload is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleDraft {
    /// Persisted row id, absent until the locale has been created.
    pub record_id: Option<SpreadId>,
    pub name: String,
    pub description: String,
    pub detail: String,
    pub difficulty: String,
    pub tags: String,
    pub positions: Vec<Position>,
}

impl LocaleDraft {
    /// Seeds a draft from a persisted record.
    ///
    /// Coordinates outside the anchor band are clamped into it.
    pub fn from_record(record: &SpreadRecord) -> Self {
        let clamped = out_of_range(&record.positions);
        if !clamped.is_empty() {
            tracing::warn!(locale = %record.locale, slots = ?clamped, "clamped stored coordinates");
        }
        let positions = clamp_positions(&record.positions);
        Self {
            record_id: Some(record.id),
            name: record.name.clone(),
            description: record.description.clone(),
            detail: record.detail.clone().unwrap_or_default(),
            difficulty: record.difficulty.clone().unwrap_or_default(),
            tags: record.tags.join(", "),
            positions,
        }
    }

    /// Tags split on `,`, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether this locale takes part in a save.
    pub fn is_saveable(&self) -> bool {
        !self.name.is_empty()
    }

    /// Builds the create/replace payload for this locale.
    pub fn to_payload(&self, slug: &str, locale: Locale, recommended: bool) -> SpreadPayload {
        SpreadPayload {
            slug: slug.to_string(),
            locale,
            recommended,
            name: self.name.clone(),
            description: self.description.clone(),
            detail: self.detail.clone(),
            difficulty: self.difficulty.clone(),
            tags: self.tag_list(),
            positions: self.positions.clone(),
        }
    }
}
