//! Command implementations behind the `spreadkit` CLI.

use anyhow::{Context, Result};
use spreadkit_core::{Locale, MemorySpreadStore, SpreadRecord, SpreadStore};
use spreadkit_designer::{
    clamp_positions, duplicate_indices, out_of_range, render_thumbnail, EditorOptions,
    SpreadDocument, SpreadEditor, SyncReport,
};
use std::fmt;
use std::path::Path;

/// Thumbnail SVG for one locale of a document.
pub fn render(document: &Path, locale: Locale, size_px: u32) -> Result<String> {
    let doc = SpreadDocument::load_from_file(document)
        .with_context(|| format!("Failed to load {}", document.display()))?;
    let record = doc
        .record(locale)
        .with_context(|| format!("Document has no {} spread", locale.label()))?;
    tracing::info!(slug = %record.slug, %locale, slots = record.positions.len(), "rendering thumbnail");
    Ok(render_thumbnail(&clamp_positions(&record.positions)).to_svg(size_px))
}

/// Copies the layout of `from` onto the other locale and rewrites the
/// document.
pub fn sync(document: &Path, from: Locale, options: EditorOptions) -> Result<SyncReport> {
    let mut doc = SpreadDocument::load_from_file(document)
        .with_context(|| format!("Failed to load {}", document.display()))?;
    let to = from.other();
    if doc.record(from).is_none() || doc.record(to).is_none() {
        anyhow::bail!("Sync needs both an en and a zh spread in the document");
    }

    let mut editor = SpreadEditor::open(&doc.spreads, options);
    // a freshly opened editor has no drag in flight
    let _ = editor.set_active(from);
    let report = editor.sync_layout();
    doc.set_positions(to, editor.draft(to).positions.clone())?;
    doc.save_to_file(document)
        .with_context(|| format!("Failed to write {}", document.display()))?;
    Ok(report)
}

/// Findings for one locale row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCheck {
    pub locale: Locale,
    pub slots: usize,
    pub duplicates: Vec<String>,
    /// Slots anchored outside the board.
    pub out_of_range: Vec<usize>,
    /// Why the store would reject this row, if it would.
    pub rejected: Option<String>,
}

/// Findings for a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub slug: String,
    pub locales: Vec<LocaleCheck>,
}

impl CheckReport {
    /// Whether any row is off the board or would be rejected by the store.
    pub fn has_errors(&self) -> bool {
        self.locales
            .iter()
            .any(|l| l.rejected.is_some() || !l.out_of_range.is_empty())
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.slug)?;
        for check in &self.locales {
            write!(f, "  {}: {} slots", check.locale, check.slots)?;
            if !check.duplicates.is_empty() {
                write!(f, ", duplicate indices {}", check.duplicates.join(", "))?;
            }
            if !check.out_of_range.is_empty() {
                let slots: Vec<String> =
                    check.out_of_range.iter().map(|s| s.to_string()).collect();
                write!(f, ", off-board slots {}", slots.join(", "))?;
            }
            if let Some(reason) = &check.rejected {
                write!(f, ", rejected: {}", reason)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

async fn replay(
    store: &MemorySpreadStore,
    record: &SpreadRecord,
) -> spreadkit_core::Result<()> {
    let created = store.create(record.to_payload()).await?;
    tracing::debug!(locale = %created.locale, id = %created.id, "row accepted");
    Ok(())
}

/// Replays every row of a document into an empty store and reports slot
/// counts, duplicate index labels, off-board anchors and rejections.
pub async fn check(document: &Path) -> Result<CheckReport> {
    let doc = SpreadDocument::load_from_file(document)
        .with_context(|| format!("Failed to load {}", document.display()))?;
    let store = MemorySpreadStore::new();

    let mut locales = Vec::with_capacity(doc.spreads.len());
    for record in &doc.spreads {
        let duplicates = duplicate_indices(&record.positions);
        if !duplicates.is_empty() {
            tracing::warn!(locale = %record.locale, labels = ?duplicates, "duplicate index labels");
        }
        let off_board = out_of_range(&record.positions);
        if !off_board.is_empty() {
            tracing::warn!(locale = %record.locale, slots = ?off_board, "anchors outside the board");
        }
        let rejected = replay(&store, record).await.err().map(|e| {
            tracing::warn!(locale = %record.locale, error = %e, "store would reject row");
            e.to_string()
        });
        locales.push(LocaleCheck {
            locale: record.locale,
            slots: record.positions.len(),
            duplicates,
            out_of_range: off_board,
            rejected,
        });
    }

    Ok(CheckReport {
        slug: doc.metadata.slug,
        locales,
    })
}
