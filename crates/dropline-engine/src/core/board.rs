use std::fmt;

use arrayvec::ArrayVec;

use super::{
    HEIGHT, WIDTH,
    cell::{Cell, CellState},
    piece::PieceKind,
};

/// One row of cells.
pub type BoardRow = [Cell; WIDTH];

const VOID_ROW: BoardRow = [Cell::VOID; WIDTH];

/// Fixed-size `HEIGHT`×`WIDTH` grid of cells.
///
/// Plain data: callers are responsible for bounds, and rows above the visible
/// field have no backing storage. Indexing out of range panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [VOID_ROW; HEIGHT],
    };

    #[must_use]
    pub const fn from_rows(rows: [BoardRow; HEIGHT]) -> Self {
        Self { rows }
    }

    /// Builds a board of fixed cells from text rows, aligned to the bottom.
    ///
    /// Each line must be exactly `WIDTH` characters: `.` is a void cell and a
    /// piece letter (`I`, `O`, `S`, `Z`, `J`, `L`, `T`) is a fixed cell in that
    /// piece's color.
    ///
    /// # Example
    ///
    /// ```
    /// use dropline_engine::{Board, CellState};
    ///
    /// let board = Board::parse_rows(&[".IIIIIIIII"]).unwrap();
    /// assert_eq!(board.cell(19, 0).state(), CellState::Void);
    /// assert_eq!(board.cell(19, 1).state(), CellState::Fixed);
    /// ```
    pub fn parse_rows<S>(lines: &[S]) -> Result<Self, ParseBoardError>
    where
        S: AsRef<str>,
    {
        if lines.len() > HEIGHT {
            return Err(ParseBoardError::TooManyRows { count: lines.len() });
        }

        let mut board = Self::EMPTY;
        let offset = HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let row = offset + i;
            let width = line.chars().count();
            if width != WIDTH {
                return Err(ParseBoardError::RowWidth { row, width });
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_char(ch)
                    .ok_or(ParseBoardError::InvalidCell { row, col, ch })?;
                board.rows[row][col] = Cell::new(CellState::Fixed, kind.color());
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.rows[row][col]
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; HEIGHT] {
        &self.rows
    }

    /// A row is complete when every cell in it is `Fixed`.
    #[must_use]
    pub fn row_is_complete(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.state().is_fixed())
    }

    /// Indices of all complete rows, top to bottom.
    #[must_use]
    pub fn complete_rows(&self) -> ArrayVec<usize, HEIGHT> {
        (0..HEIGHT).filter(|&row| self.row_is_complete(row)).collect()
    }

    /// Resets every cell of the row to `Void`.
    pub fn clear_row(&mut self, row: usize) {
        self.rows[row].iter_mut().for_each(Cell::to_void);
    }

    /// Drops the remaining rows down over the cleared ones.
    ///
    /// The result is the board with every row flagged in `cleared` removed and
    /// the same number of void rows added on top; the relative order of all
    /// other rows is kept.
    ///
    /// Walks upward from the bottommost cleared row with a write cursor and a
    /// read cursor that skips cleared rows. The read cursor must always stay
    /// strictly above the write cursor; anything else means the row order is
    /// corrupted, and this panics.
    pub fn compact(&mut self, cleared: &[bool; HEIGHT]) {
        let Some(mut write) = (0..HEIGHT).rev().find(|&row| cleared[row]) else {
            return;
        };
        let next_kept = |below: usize| (0..below).rev().find(|&row| !cleared[row]);

        let mut read = next_kept(write);
        while let Some(src) = read {
            assert!(
                src < write,
                "compaction read cursor {src} is not above write cursor {write}"
            );
            self.rows[write] = self.rows[src];
            write -= 1;
            read = next_kept(src);
        }
        self.rows[..=write].fill(VOID_ROW);
    }
}

// One character per cell: '.' void, '@' falling, '+' preview, '#' fixed.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = match cell.state() {
                    CellState::Void => '.',
                    CellState::Falling => '@',
                    CellState::DropPreview => '+',
                    CellState::Fixed => '#',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Error returned by [`Board::parse_rows`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has {count} rows, at most {} allowed", HEIGHT)]
    TooManyRows { count: usize },
    #[display("row {row} has {width} cells, expected {}", WIDTH)]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell '{ch}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}
