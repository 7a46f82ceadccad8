use serde::{Deserialize, Serialize};

use super::{HEIGHT, WIDTH};

const ROWS: i32 = signed(HEIGHT);
const COLS: i32 = signed(WIDTH);

// Only ever called with board dimensions and indices, all far below `i32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn signed(n: usize) -> i32 {
    n as i32
}

/// A signed `(row, column)` pair in board space.
///
/// Row 0 is the top visible row and rows grow downward. Coordinates may lie
/// outside the board: negative rows are above the visible field, and rows or
/// columns past the edges show up while validating candidate moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn translated(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Above the visible field.
    #[must_use]
    pub const fn exceeds_top(self) -> bool {
        self.row < 0
    }

    /// Left of column 0 or right of the last column.
    #[must_use]
    pub const fn exceeds_side(self) -> bool {
        self.col < 0 || self.col >= COLS
    }

    /// Below the last row.
    #[must_use]
    pub const fn exceeds_bottom(self) -> bool {
        self.row >= ROWS
    }

    /// Inside the visible field: neither above it, beside it, nor below it.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !self.exceeds_top() && !self.exceeds_side() && !self.exceeds_bottom()
    }

    /// Returns the `(row, col)` board indices if the coordinate is visible.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn position(self) -> Option<(usize, usize)> {
        self.is_visible()
            .then(|| (self.row as usize, self.col as usize))
    }

    /// Builds a coordinate from board indices.
    #[must_use]
    pub const fn from_position(row: usize, col: usize) -> Self {
        assert!(row < HEIGHT && col < WIDTH);
        Self::new(signed(row), signed(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceed_predicates() {
        let inside = Coordinate::new(0, 0);
        assert!(!inside.exceeds_top() && !inside.exceeds_side() && !inside.exceeds_bottom());

        assert!(Coordinate::new(-1, 4).exceeds_top());
        assert!(Coordinate::new(3, -1).exceeds_side());
        assert!(Coordinate::new(3, 10).exceeds_side());
        assert!(!Coordinate::new(3, 9).exceeds_side());
        assert!(Coordinate::new(20, 4).exceeds_bottom());
        assert!(!Coordinate::new(19, 4).exceeds_bottom());
    }

    #[test]
    fn test_is_visible() {
        assert!(Coordinate::new(0, 0).is_visible());
        assert!(Coordinate::new(19, 9).is_visible());
        assert!(!Coordinate::new(-1, 4).is_visible());
        assert!(!Coordinate::new(4, -1).is_visible());
        assert!(!Coordinate::new(4, 10).is_visible());
        assert!(!Coordinate::new(20, 4).is_visible());
    }

    #[test]
    fn test_position() {
        assert_eq!(Coordinate::new(19, 9).position(), Some((19, 9)));
        assert_eq!(Coordinate::new(-1, 4).position(), None);
        assert_eq!(Coordinate::new(4, -1).position(), None);
        assert_eq!(Coordinate::new(20, 4).position(), None);
        assert_eq!(Coordinate::new(4, 10).position(), None);
        assert_eq!(Coordinate::from_position(7, 2), Coordinate::new(7, 2));
    }

    #[test]
    fn test_translated() {
        let coord = Coordinate::new(2, 3).translated(1, -2);
        assert_eq!(coord, Coordinate::new(3, 1));
        assert_eq!(coord.to_string(), "(3, 1)");
    }
}
