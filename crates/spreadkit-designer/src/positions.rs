//! Position list operations.
//!
//! Every operation takes the current list by reference and returns a new
//! list; the caller decides whether to keep it. Index labels are user text
//! and are never renumbered.

use spreadkit_core::{LayoutError, Position};
use std::collections::BTreeMap;

use crate::board::{clamp_x, clamp_y};

/// One editable attribute of a position, with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionField {
    Index(String),
    Name(String),
    Description(String),
    X(i32),
    Y(i32),
}

fn check_slot(list: &[Position], slot: usize) -> Result<(), LayoutError> {
    if slot < list.len() {
        Ok(())
    } else {
        Err(LayoutError::SlotOutOfRange {
            slot,
            len: list.len(),
        })
    }
}

/// Appends a blank slot labelled with the next ordinal, anchored at the
/// board origin.
pub fn add_position(list: &[Position]) -> Vec<Position> {
    let mut next = list.to_vec();
    next.push(Position::new((list.len() + 1).to_string(), 0, 0));
    next
}

/// Removes the slot at `slot`. Remaining labels are left untouched.
pub fn remove_position(list: &[Position], slot: usize) -> Result<Vec<Position>, LayoutError> {
    check_slot(list, slot)?;
    Ok(list
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != slot)
        .map(|(_, p)| p.clone())
        .collect())
}

/// Slots whose anchor lies outside the board's anchor band.
pub fn out_of_range(list: &[Position]) -> Vec<usize> {
    list.iter()
        .enumerate()
        .filter(|(_, p)| clamp_x(p.x) != p.x || clamp_y(p.y) != p.y)
        .map(|(slot, _)| slot)
        .collect()
}

/// Clamps every anchor into the board's anchor band.
pub fn clamp_positions(list: &[Position]) -> Vec<Position> {
    list.iter()
        .map(|p| Position {
            x: clamp_x(p.x),
            y: clamp_y(p.y),
            ..p.clone()
        })
        .collect()
}

/// Replaces one attribute of the slot at `slot`.
///
/// Coordinates are clamped into the board's anchor band.
pub fn update_field(
    list: &[Position],
    slot: usize,
    field: PositionField,
) -> Result<Vec<Position>, LayoutError> {
    check_slot(list, slot)?;
    let mut next = list.to_vec();
    let target = &mut next[slot];
    match field {
        PositionField::Index(v) => target.index = v,
        PositionField::Name(v) => target.name = v,
        PositionField::Description(v) => target.description = v,
        PositionField::X(v) => target.x = clamp_x(v),
        PositionField::Y(v) => target.y = clamp_y(v),
    }
    Ok(next)
}

/// Moves the slot at `slot` to a board coordinate.
pub fn move_position(
    list: &[Position],
    slot: usize,
    x: i32,
    y: i32,
) -> Result<Vec<Position>, LayoutError> {
    check_slot(list, slot)?;
    let mut next = list.to_vec();
    next[slot].x = clamp_x(x);
    next[slot].y = clamp_y(y);
    Ok(next)
}

/// Index labels used by more than one slot, in label order.
pub fn duplicate_indices(list: &[Position]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for p in list {
        *counts.entry(p.index.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(label, _)| label.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Position> {
        vec![
            Position::new("1", 10, 10).with_text("Past", "before"),
            Position::new("2", 50, 50).with_text("Present", "now"),
            Position::new("3", 90, 70).with_text("Future", "after"),
        ]
    }

    #[test]
    fn test_add_position_labels_next_ordinal() {
        let list = add_position(&three());
        assert_eq!(list.len(), 4);
        assert_eq!(list[3], Position::new("4", 0, 0));

        let first = add_position(&[]);
        assert_eq!(first[0].index, "1");
    }

    #[test]
    fn test_add_leaves_input_untouched() {
        let original = three();
        let _ = add_position(&original);
        assert_eq!(original.len(), 3);
    }

    #[test]
    fn test_clamp_positions_keeps_text_and_labels() {
        let list = vec![
            Position::new("1", 500, -40).with_text("Past", "before"),
            Position::new("2", 50, 50),
            Position::new("3", -1, 81),
        ];
        assert_eq!(out_of_range(&list), vec![0, 2]);

        let clamped = clamp_positions(&list);
        assert_eq!(clamped[0], Position::new("1", 100, 0).with_text("Past", "before"));
        assert_eq!(clamped[1], list[1]);
        assert_eq!((clamped[2].x, clamped[2].y), (0, 80));
        assert!(out_of_range(&clamped).is_empty());
    }

    #[test]
    fn test_remove_does_not_renumber() {
        let list = remove_position(&three(), 0).unwrap();
        let labels: Vec<_> = list.iter().map(|p| p.index.as_str()).collect();
        assert_eq!(labels, vec!["2", "3"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let err = remove_position(&three(), 3).unwrap_err();
        assert_eq!(err, LayoutError::SlotOutOfRange { slot: 3, len: 3 });
    }

    #[test]
    fn test_add_then_remove_is_identity() {
        let original = three();
        let added = add_position(&original);
        let restored = remove_position(&added, added.len() - 1).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_update_field_replaces_one_attribute() {
        let list = update_field(&three(), 1, PositionField::Name("Now".into())).unwrap();
        assert_eq!(list[1].name, "Now");
        assert_eq!(list[1].description, "now");
        assert_eq!(list[1].x, 50);
        assert_eq!(list[0], three()[0]);
    }

    #[test]
    fn test_update_coordinates_are_clamped() {
        let list = update_field(&three(), 0, PositionField::Y(95)).unwrap();
        assert_eq!(list[0].y, 80);
        let list = update_field(&list, 0, PositionField::X(-4)).unwrap();
        assert_eq!(list[0].x, 0);
    }

    #[test]
    fn test_move_position() {
        let list = move_position(&three(), 2, 40, 40).unwrap();
        assert_eq!((list[2].x, list[2].y), (40, 40));
        assert!(move_position(&three(), 7, 0, 0).is_err());
    }

    #[test]
    fn test_duplicate_indices() {
        let mut list = three();
        assert!(duplicate_indices(&list).is_empty());
        list.push(Position::new("2", 0, 0));
        list.push(Position::new("2", 0, 0));
        list.push(Position::new("1", 0, 0));
        assert_eq!(duplicate_indices(&list), vec!["1", "2"]);
    }
}
