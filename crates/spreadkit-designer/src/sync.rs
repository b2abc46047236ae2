//! Cross-locale layout sync.
//!
//! Copies geometry (`index`, `x`, `y`) from one locale's positions onto the
//! other's while keeping the target's text. Pairing is by list position,
//! not by label: the i-th source slot lands on the i-th target slot. The
//! result always has the source's length, so a longer target loses its tail
//! and a shorter one gains blank slots.

use serde::{Deserialize, Serialize};
use spreadkit_core::{Locale, Position};

/// Copies layout from `source` onto `target` by array position.
pub fn sync_layout(source: &[Position], target: &[Position]) -> Vec<Position> {
    source
        .iter()
        .enumerate()
        .map(|(i, src)| {
            let kept = target.get(i);
            Position {
                identity: kept.and_then(|t| t.identity),
                index: src.index.clone(),
                name: kept.map(|t| t.name.clone()).unwrap_or_default(),
                description: kept.map(|t| t.description.clone()).unwrap_or_default(),
                x: src.x,
                y: src.y,
            }
        })
        .collect()
}

/// Outcome of a sync, for the confirmation notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub from: Locale,
    pub to: Locale,
    /// Slots in the source list (and in the target afterwards).
    pub source_len: usize,
    /// Slots the target had before the sync.
    pub target_len: usize,
}

impl SyncReport {
    /// Target slots dropped because the source is shorter.
    pub fn truncated(&self) -> usize {
        self.target_len.saturating_sub(self.source_len)
    }

    /// Blank slots added because the source is longer.
    pub fn extended(&self) -> usize {
        self.source_len.saturating_sub(self.target_len)
    }

    /// Confirmation text shown to the admin.
    pub fn message(&self) -> String {
        format!(
            "Layout synced from {} to {}",
            self.from.code().to_uppercase(),
            self.to.code().to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spreadkit_core::PositionId;

    #[test]
    fn test_sync_extends_target() {
        let source = vec![
            Position::new("1", 10, 10),
            Position::new("2", 50, 50),
            Position::new("3", 90, 70),
        ];
        let target = vec![
            Position::new("a", 0, 0).with_text("Past", "p"),
            Position::new("b", 0, 0).with_text("Present", ""),
        ];

        let synced = sync_layout(&source, &target);
        assert_eq!(synced.len(), 3);
        assert_eq!(synced[0], Position::new("1", 10, 10).with_text("Past", "p"));
        assert_eq!(synced[1], Position::new("2", 50, 50).with_text("Present", ""));
        assert_eq!(synced[2], Position::new("3", 90, 70));
    }

    #[test]
    fn test_sync_truncates_target() {
        let source = vec![Position::new("1", 30, 30)];
        let target = vec![
            Position::new("1", 0, 0)
                .with_text("One", "")
                .with_identity(PositionId(11)),
            Position::new("2", 0, 0).with_text("Two", ""),
        ];
        let synced = sync_layout(&source, &target);
        assert_eq!(synced.len(), 1);
        assert_eq!(synced[0].identity, Some(PositionId(11)));
        assert_eq!(synced[0].name, "One");
        assert_eq!((synced[0].x, synced[0].y), (30, 30));
    }

    #[test]
    fn test_sync_pairs_by_position_not_label() {
        let source = vec![Position::new("2", 50, 50), Position::new("1", 10, 10)];
        let target = vec![
            Position::new("1", 0, 0).with_text("First", ""),
            Position::new("2", 0, 0).with_text("Second", ""),
        ];
        let synced = sync_layout(&source, &target);
        assert_eq!(synced[0].index, "2");
        assert_eq!(synced[0].name, "First");
    }

    #[test]
    fn test_sync_from_empty_source_clears_target() {
        let target = vec![Position::new("1", 5, 5)];
        assert!(sync_layout(&[], &target).is_empty());
    }

    #[test]
    fn test_report() {
        let report = SyncReport {
            from: Locale::En,
            to: Locale::Zh,
            source_len: 3,
            target_len: 5,
        };
        assert_eq!(report.truncated(), 2);
        assert_eq!(report.extended(), 0);
        assert_eq!(report.message(), "Layout synced from EN to ZH");
    }
}
