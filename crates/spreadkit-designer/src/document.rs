//! Spread document files.
//!
//! A document holds every locale row of one spread slug as JSON, so spreads
//! can be rendered, checked and synced offline.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spreadkit_core::{Locale, Position, SpreadRecord};
use std::path::Path;

/// Document format version
const FILE_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub slug: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Complete document structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub spreads: Vec<SpreadRecord>,
}

impl SpreadDocument {
    /// Wraps the locale rows of one slug.
    pub fn new(slug: impl Into<String>, spreads: Vec<SpreadRecord>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                slug: slug.into(),
                created: now,
                modified: now,
            },
            spreads,
        }
    }

    /// The row for `locale`, if present.
    pub fn record(&self, locale: Locale) -> Option<&SpreadRecord> {
        self.spreads.iter().find(|r| r.locale == locale)
    }

    /// Replaces the positions of the `locale` row.
    pub fn set_positions(&mut self, locale: Locale, positions: Vec<Position>) -> Result<()> {
        let Some(record) = self.spreads.iter_mut().find(|r| r.locale == locale) else {
            bail!("Document has no {} spread", locale.label());
        };
        record.positions = positions;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Save document to file
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.metadata.modified = Utc::now();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize document")?;
        std::fs::write(path.as_ref(), json).context("Failed to write document file")?;
        tracing::debug!(path = %path.as_ref().display(), "document saved");
        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read document file")?;
        let document: SpreadDocument =
            serde_json::from_str(&content).context("Failed to parse document file")?;
        if document.version != FILE_FORMAT_VERSION {
            tracing::warn!(
                found = %document.version,
                expected = FILE_FORMAT_VERSION,
                "document version mismatch"
            );
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spreadkit_core::SpreadId;

    fn record(locale: Locale) -> SpreadRecord {
        let now = Utc::now();
        SpreadRecord {
            id: SpreadId(1),
            slug: "celtic-cross".into(),
            locale,
            name: "Celtic Cross".into(),
            description: "ten cards".into(),
            detail: None,
            difficulty: None,
            recommended: false,
            tags: Vec::new(),
            positions: vec![Position::new("1", 50, 40)],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_set_positions_requires_row() {
        let mut doc = SpreadDocument::new("celtic-cross", vec![record(Locale::En)]);
        doc.set_positions(Locale::En, Vec::new()).unwrap();
        assert!(doc.record(Locale::En).unwrap().positions.is_empty());
        assert!(doc.set_positions(Locale::Zh, Vec::new()).is_err());
    }

    #[test]
    fn test_parse_wire_shape() {
        let json = r#"{
            "version": "1.0",
            "metadata": {"slug": "s", "created": "2024-01-01T00:00:00Z", "modified": "2024-01-01T00:00:00Z"},
            "spreads": [{
                "id": 7, "slug": "s", "lang": "zh", "name": "n", "description": "d",
                "positions": [{"id": 3, "positionIndex": "1", "name": "", "description": "", "x": 5, "y": 6}],
                "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
            }]
        }"#;
        let doc: SpreadDocument = serde_json::from_str(json).unwrap();
        let zh = doc.record(Locale::Zh).unwrap();
        assert_eq!(zh.id, SpreadId(7));
        assert_eq!((zh.positions[0].x, zh.positions[0].y), (5, 6));
        assert!(doc.record(Locale::En).is_none());
    }
}
