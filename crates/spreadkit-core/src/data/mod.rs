//! Spread data model.
//!
//! Positions, locales, persisted spread records and the create-or-replace
//! payload submitted to the persistence collaborator. Field names on the
//! wire follow the admin API (`positionIndex`, camelCase timestamps).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported content locales.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Chinese
    Zh,
}

/// Locales in save order.
pub const LOCALES: [Locale; 2] = [Locale::En, Locale::Zh];

impl Locale {
    /// Lowercase locale code as stored in the database.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Human readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Zh => "Chinese",
        }
    }

    /// The opposite locale of the pair.
    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a locale code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown locale: {0}")]
pub struct ParseLocaleError(pub String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

/// Persisted spread row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadId(pub i64);

impl fmt::Display for SpreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted position row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(pub i64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One card slot of a spread layout.
///
/// `x` is kept within `0..=100` and `y` within `0..=80` board units by every
/// editor operation. `identity` is present only for rows that were loaded
/// from the store; the store discards it when positions are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<PositionId>,
    #[serde(rename = "positionIndex", alias = "index")]
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Position {
    /// Creates an unsaved position with empty text.
    pub fn new(index: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            identity: None,
            index: index.into(),
            name: String::new(),
            description: String::new(),
            x,
            y,
        }
    }

    /// Sets the locale-specific text.
    pub fn with_text(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = name.into();
        self.description = description.into();
        self
    }

    /// Sets the persisted row id.
    pub fn with_identity(mut self, id: PositionId) -> Self {
        self.identity = Some(id);
        self
    }
}

/// A spread row as held by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadRecord {
    pub id: SpreadId,
    pub slug: String,
    #[serde(alias = "lang")]
    pub locale: Locale,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub positions: Vec<Position>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpreadRecord {
    /// The payload that would recreate this row.
    pub fn to_payload(&self) -> SpreadPayload {
        SpreadPayload {
            slug: self.slug.clone(),
            locale: self.locale,
            recommended: self.recommended,
            name: self.name.clone(),
            description: self.description.clone(),
            detail: self.detail.clone().unwrap_or_default(),
            difficulty: self.difficulty.clone().unwrap_or_default(),
            tags: self.tags.clone(),
            positions: self.positions.clone(),
        }
    }
}

/// Create-or-replace body for one locale of a spread.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadPayload {
    pub slug: String,
    #[serde(alias = "lang")]
    pub locale: Locale,
    #[serde(default)]
    pub recommended: bool,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub positions: Vec<Position>,
}
