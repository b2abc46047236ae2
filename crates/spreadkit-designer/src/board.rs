//! Board coordinate space.
//!
//! Spreads are laid out on a normalized 100 x 100 board, independent of the
//! pixel size of whatever container shows it. Slot anchors may only sit in
//! the upper band `0..=MAX_ANCHOR_Y` so that a card anchored at the bottom
//! still fits inside the board.
//!
//! Pointer coordinates are converted with a linear scale against the
//! container's bounding box:
//!
//! ```text
//! board_x = round((pointer_x - left) / width  * BOARD_WIDTH)   clamped to 0..=BOARD_WIDTH
//! board_y = round((pointer_y - top)  / height * BOARD_HEIGHT)  clamped to 0..=MAX_ANCHOR_Y
//! ```

use serde::{Deserialize, Serialize};

/// Board width in board units.
pub const BOARD_WIDTH: i32 = 100;
/// Board height in board units.
pub const BOARD_HEIGHT: i32 = 100;
/// Lowest allowed anchor row.
pub const MAX_ANCHOR_Y: i32 = 80;
/// Width of a card slot in board units.
pub const SLOT_WIDTH: f64 = 13.814;
/// Height of a card slot in board units.
pub const SLOT_HEIGHT: f64 = 23.824;

/// Pixel bounding box of the element hosting the board.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    /// Creates a container rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Pixel location that maps to the given board point (inverse of
    /// [`pointer_to_board`] for in-range points).
    pub fn board_to_pointer(&self, point: BoardPoint) -> (f64, f64) {
        let (fx, fy) = board_to_fraction(point.x, point.y);
        (self.left + fx * self.width, self.top + fy * self.height)
    }
}

/// Integer board coordinate of a slot anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardPoint {
    pub x: i32,
    pub y: i32,
}

impl BoardPoint {
    /// Creates a board point without clamping.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a board point clamped into the anchor band.
    pub fn clamped(x: i32, y: i32) -> Self {
        Self {
            x: clamp_x(x),
            y: clamp_y(y),
        }
    }
}

/// Clamps an x coordinate to `0..=BOARD_WIDTH`.
pub fn clamp_x(x: i32) -> i32 {
    x.clamp(0, BOARD_WIDTH)
}

/// Clamps a y coordinate to `0..=MAX_ANCHOR_Y`.
pub fn clamp_y(y: i32) -> i32 {
    y.clamp(0, MAX_ANCHOR_Y)
}

/// Maps one pointer axis to board units. A degenerate container axis maps
/// to 0.
fn axis_to_board(pointer: f64, origin: f64, extent: f64, board_extent: i32, max: i32) -> i32 {
    if extent.is_nan() || extent <= 0.0 || !pointer.is_finite() {
        return 0;
    }
    let raw = (pointer - origin) / extent * f64::from(board_extent);
    // clamp in f64 first so huge pointer values cannot saturate oddly
    raw.round().clamp(0.0, f64::from(max)) as i32
}

/// Converts a pointer location in pixels into a clamped board point.
pub fn pointer_to_board(pointer_x: f64, pointer_y: f64, container: &ContainerRect) -> BoardPoint {
    BoardPoint {
        x: axis_to_board(
            pointer_x,
            container.left,
            container.width,
            BOARD_WIDTH,
            BOARD_WIDTH,
        ),
        y: axis_to_board(
            pointer_y,
            container.top,
            container.height,
            BOARD_HEIGHT,
            MAX_ANCHOR_Y,
        ),
    }
}

/// Converts a board coordinate into fractions of the board (0.0 - 1.0).
///
/// Multiply by 100 for CSS-style percentage placement.
pub fn board_to_fraction(x: i32, y: i32) -> (f64, f64) {
    (
        f64::from(x) / f64::from(BOARD_WIDTH),
        f64::from(y) / f64::from(BOARD_HEIGHT),
    )
}

/// Slot box size as fractions of the board.
pub fn slot_size_fraction() -> (f64, f64) {
    (
        SLOT_WIDTH / f64::from(BOARD_WIDTH),
        SLOT_HEIGHT / f64::from(BOARD_HEIGHT),
    )
}

/// Guide lines of the editing grid, in board units.
///
/// Returns the x positions of the vertical lines (every 10 units) and the
/// y positions of the 9 horizontal lines spread over the board height.
pub fn grid_lines() -> (Vec<f64>, Vec<f64>) {
    let vertical = (0..=10).map(|i| f64::from(i * 10)).collect();
    let horizontal = (0..9)
        .map(|i| f64::from(i) * f64::from(BOARD_HEIGHT) / 8.0)
        .collect();
    (vertical, horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ContainerRect {
        ContainerRect::new(100.0, 50.0, 400.0, 400.0)
    }

    #[test]
    fn test_pointer_to_board_scales_and_rounds() {
        // 130px right of left edge => 32.5 units => rounds away from zero
        let p = pointer_to_board(230.0, 90.0, &rect());
        assert_eq!(p, BoardPoint::new(33, 10));
    }

    #[test]
    fn test_pointer_to_board_clamps_y_to_anchor_band() {
        let p = pointer_to_board(300.0, 450.0, &rect());
        assert_eq!(p.y, MAX_ANCHOR_Y);
        assert_eq!(p.x, 50);
    }

    #[test]
    fn test_pointer_outside_container_clamps() {
        assert_eq!(pointer_to_board(-500.0, -500.0, &rect()), BoardPoint::new(0, 0));
        assert_eq!(
            pointer_to_board(5000.0, 5000.0, &rect()),
            BoardPoint::new(BOARD_WIDTH, MAX_ANCHOR_Y)
        );
    }

    #[test]
    fn test_degenerate_container_maps_to_origin() {
        let empty = ContainerRect::new(0.0, 0.0, 0.0, -3.0);
        assert_eq!(pointer_to_board(10.0, 10.0, &empty), BoardPoint::new(0, 0));
        assert_eq!(
            pointer_to_board(f64::NAN, 10.0, &rect()),
            BoardPoint::new(0, 0)
        );
    }

    #[test]
    fn test_board_to_fraction() {
        assert_eq!(board_to_fraction(50, 80), (0.5, 0.8));
        assert_eq!(board_to_fraction(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_board_to_pointer_inverts_conversion() {
        let r = rect();
        let (px, py) = r.board_to_pointer(BoardPoint::new(40, 40));
        assert_eq!(pointer_to_board(px, py, &r), BoardPoint::new(40, 40));
    }

    #[test]
    fn test_slot_size_fraction() {
        let (w, h) = slot_size_fraction();
        assert!((w - 0.13814).abs() < 1e-9);
        assert!((h - 0.23824).abs() < 1e-9);
    }

    #[test]
    fn test_grid_lines() {
        let (v, h) = grid_lines();
        assert_eq!(v.len(), 11);
        assert_eq!(v[10], 100.0);
        assert_eq!(h.len(), 9);
        assert_eq!(h[8], 100.0);
        assert_eq!(h[1], 12.5);
    }
}
