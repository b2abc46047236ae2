//! Connector derivation.
//!
//! Connectors visualise reading order: slots are sorted by the numeric value
//! of their index label and a directed segment joins each adjacent pair.
//! Labels are parsed by their leading integer (`" 2"` and `"2a"` both read
//! as 2). Labels without one sort after every numbered slot; ties keep list
//! order.

use serde::{Deserialize, Serialize};
use spreadkit_core::Position;

use crate::board::board_to_fraction;

/// Leading-integer value of an index label, if any.
pub fn index_sort_key(label: &str) -> Option<i64> {
    let trimmed = label.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // saturate absurdly long labels instead of failing
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Slot numbers in reading order.
pub fn connector_order(positions: &[Position]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    // None sorts after Some in this key, i.e. unparsable labels go last
    order.sort_by_key(|&i| {
        let key = index_sort_key(&positions[i].index);
        (key.is_none(), key)
    });
    order
}

/// A directed segment between two consecutive slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// Slot the segment starts at.
    pub from: usize,
    /// Slot the segment points to.
    pub to: usize,
    /// Start point as board fractions.
    pub start: (f64, f64),
    /// End point as board fractions.
    pub end: (f64, f64),
}

/// Segments between consecutive slots in reading order.
pub fn connectors(positions: &[Position]) -> Vec<Connector> {
    connector_order(positions)
        .windows(2)
        .map(|pair| {
            let (a, b) = (&positions[pair[0]], &positions[pair[1]]);
            Connector {
                from: pair[0],
                to: pair[1],
                start: board_to_fraction(a.x, a.y),
                end: board_to_fraction(b.x, b.y),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_sort_key() {
        assert_eq!(index_sort_key("3"), Some(3));
        assert_eq!(index_sort_key("  12"), Some(12));
        assert_eq!(index_sort_key("2a"), Some(2));
        assert_eq!(index_sort_key("-1"), Some(-1));
        assert_eq!(index_sort_key("1.9"), Some(1));
        assert_eq!(index_sort_key("a2"), None);
        assert_eq!(index_sort_key(""), None);
        assert_eq!(index_sort_key("-"), None);
    }

    #[test]
    fn test_connector_order_is_numeric() {
        let positions = vec![
            Position::new("3", 90, 70),
            Position::new("1", 10, 10),
            Position::new("2", 50, 50),
        ];
        assert_eq!(connector_order(&positions), vec![1, 2, 0]);

        let segs = connectors(&positions);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].from, segs[0].to), (1, 2));
        assert_eq!((segs[1].from, segs[1].to), (2, 0));
        assert_eq!(segs[0].start, (0.1, 0.1));
        assert_eq!(segs[1].end, (0.9, 0.7));
    }

    #[test]
    fn test_numeric_not_lexical() {
        let positions = vec![Position::new("10", 0, 0), Position::new("9", 0, 0)];
        assert_eq!(connector_order(&positions), vec![1, 0]);
    }

    #[test]
    fn test_unparsable_labels_sort_last_in_list_order() {
        let positions = vec![
            Position::new("center", 0, 0),
            Position::new("2", 0, 0),
            Position::new("x", 0, 0),
            Position::new("1", 0, 0),
        ];
        assert_eq!(connector_order(&positions), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_duplicate_labels_keep_list_order() {
        let positions = vec![
            Position::new("2", 0, 0),
            Position::new("1", 0, 0),
            Position::new("1", 5, 5),
        ];
        assert_eq!(connector_order(&positions), vec![1, 2, 0]);
    }

    #[test]
    fn test_fewer_than_two_slots_have_no_connectors() {
        assert!(connectors(&[]).is_empty());
        assert!(connectors(&[Position::new("1", 0, 0)]).is_empty());
    }
}
