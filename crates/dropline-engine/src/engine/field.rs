use arrayvec::ArrayVec;
use serde::Serialize;

use crate::{
    SpawnError,
    core::{
        board::Board,
        cell::{Cell, CellState, Color},
        coordinate::Coordinate,
        piece::{Move, PIECE_CELLS, Piece},
        HEIGHT,
    },
};

use super::snapshot::FieldSnapshot;

/// Result of a single [`Field::attempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AttemptOutcome {
    /// No piece is falling; nothing happened.
    Idle,
    /// The move was illegal and silently ignored.
    Rejected,
    /// The falling piece moved.
    Moved,
    /// The falling piece settled, followed by line clearing.
    Locked { lines_cleared: usize },
}

/// Board, falling piece, and landing preview.
///
/// The board is owned exclusively by the field. At most one piece is falling
/// (painted as `Falling`) and at most one preview (painted as `DropPreview`) is
/// on the board. The preview is the straight-down landing position of the
/// falling piece and is recomputed on spawn and after every accepted move.
#[derive(Debug, Clone, Default)]
pub struct Field {
    board: Board,
    current: Option<Piece>,
    preview: Option<Piece>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn of(coord: Coordinate) -> Option<Self> {
        if !coord.exceeds_side() {
            None
        } else if coord.col < 0 {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Direction of one step back into the field.
    fn inward(self) -> i32 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }
}

impl Field {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field over a preloaded board, with no piece in play.
    #[must_use]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            current: None,
            preview: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    #[must_use]
    pub fn preview_piece(&self) -> Option<Piece> {
        self.preview
    }

    /// Every board cell with its position, top-left first.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.board.rows().iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Coordinate::from_position(row, col), *cell))
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::new(self.board.rows(), self.current, self.preview)
    }

    /// Installs a newly chosen piece as the falling piece.
    ///
    /// When the spawn footprint already overlaps settled cells the game is
    /// over: the board is left untouched and the piece is not installed.
    pub fn spawn(&mut self, piece: Piece) -> Result<(), SpawnError> {
        if self.current.is_some() {
            return Err(SpawnError::PieceInPlay);
        }
        if self.is_game_over(piece) {
            return Err(SpawnError::GameOver);
        }
        self.place(piece);
        Ok(())
    }

    /// Applies one move intent to the falling piece.
    ///
    /// Illegal moves are ignored. A rotation pushed past a side wall is slid
    /// back toward the interior before giving up. A soft drop that cannot go
    /// further, or any hard drop, locks the piece and clears complete lines.
    pub fn attempt(&mut self, intent: Move) -> AttemptOutcome {
        let Some(current) = self.current else {
            return AttemptOutcome::Idle;
        };

        if intent == Move::HardDrop {
            let dropped = self.drop_projection(current);
            self.place(dropped);
            return self.lock();
        }

        let candidate = current.moved(intent);
        if intent == Move::SoftDrop && self.at_bottom(candidate) {
            return self.lock();
        }

        let accepted = if self.legal_move(candidate) {
            candidate
        } else if intent.is_rotation() {
            match self.slide_into_field(candidate) {
                Some(slid) => slid,
                None => return AttemptOutcome::Rejected,
            }
        } else {
            return AttemptOutcome::Rejected;
        };

        self.place(accepted);
        AttemptOutcome::Moved
    }

    /// Returns `true` if the piece lies inside the side walls and above the
    /// floor, without overlapping any `Fixed` cell.
    ///
    /// Coordinates above the visible field are always free.
    #[must_use]
    pub fn legal_move(&self, piece: Piece) -> bool {
        piece.coordinates().into_iter().all(|coord| {
            !coord.exceeds_side() && !coord.exceeds_bottom() && !self.is_fixed_at(coord)
        })
    }

    /// Returns `true` if any visible coordinate of the piece is past the floor
    /// or on a `Fixed` cell.
    ///
    /// Applied to the one-row-down candidate, this decides between falling
    /// further and locking.
    #[must_use]
    pub fn at_bottom(&self, piece: Piece) -> bool {
        piece
            .coordinates()
            .into_iter()
            .filter(|coord| !coord.exceeds_top())
            .any(|coord| coord.exceeds_bottom() || self.is_fixed_at(coord))
    }

    /// Returns `true` if a piece spawning here would overlap settled cells.
    #[must_use]
    pub fn is_game_over(&self, piece: Piece) -> bool {
        piece
            .coordinates()
            .into_iter()
            .any(|coord| self.is_fixed_at(coord))
    }

    /// Straight-down landing position of the piece.
    ///
    /// Steps down until the next step would be at-bottom and returns the last
    /// resting position. A piece that is already at-bottom is returned as is.
    #[must_use]
    pub fn drop_projection(&self, piece: Piece) -> Piece {
        let mut resting = piece;
        let mut next = piece;
        while !self.at_bottom(next) {
            resting = next;
            next = next.down();
        }
        resting
    }

    /// Clears complete rows and drops the rows above them.
    ///
    /// Returns the number of rows cleared. Runs after every lock; calling it
    /// while a piece is falling would move that piece's cells with the stack.
    pub fn attempt_descent(&mut self) -> usize {
        let lines = self.board.complete_rows();
        if lines.is_empty() {
            return 0;
        }

        let mut cleared = [false; HEIGHT];
        for &row in &lines {
            self.board.clear_row(row);
            cleared[row] = true;
        }
        self.board.compact(&cleared);
        lines.len()
    }

    fn is_fixed_at(&self, coord: Coordinate) -> bool {
        coord
            .position()
            .is_some_and(|(row, col)| self.board.cell(row, col).state().is_fixed())
    }

    /// Slides a rotated piece that went past a side wall back inward.
    ///
    /// The side is taken from the first visible coordinate past a wall. The
    /// piece is moved inward one step per distinct row among its coordinates
    /// beyond that wall, and the result must be legal.
    fn slide_into_field(&self, candidate: Piece) -> Option<Piece> {
        let coords = candidate.coordinates();
        let side = coords
            .iter()
            .filter(|coord| !coord.exceeds_top())
            .find_map(|coord| Side::of(*coord))?;

        // cells stacked in one column over several rows count once per row
        let mut rows = ArrayVec::<i32, PIECE_CELLS>::new();
        let mut steps = 0;
        for coord in coords.iter().filter(|coord| Side::of(**coord) == Some(side)) {
            if !rows.contains(&coord.row) {
                rows.push(coord.row);
                steps += 1;
            }
        }

        let slid = candidate.shifted(side.inward() * steps);
        self.legal_move(slid).then_some(slid)
    }

    /// Moves the falling piece to `piece` and repaints the preview.
    fn place(&mut self, piece: Piece) {
        if let Some(preview) = self.preview.take() {
            self.erase(preview);
        }
        if let Some(current) = self.current.take() {
            self.erase(current);
        }
        let preview = self.drop_projection(piece);
        self.paint(preview, CellState::DropPreview);
        self.paint(piece, CellState::Falling);
    }

    fn lock(&mut self) -> AttemptOutcome {
        let Some(piece) = self.current else {
            return AttemptOutcome::Idle;
        };
        if let Some(preview) = self.preview {
            self.erase(preview);
        }
        self.paint(piece, CellState::Fixed);
        let lines_cleared = self.attempt_descent();
        AttemptOutcome::Locked { lines_cleared }
    }

    fn erase(&mut self, piece: Piece) {
        for (row, col) in piece.coordinates().into_iter().filter_map(Coordinate::position) {
            let cell = self.board.cell_mut(row, col);
            debug_assert!(
                !cell.state().is_fixed(),
                "erasing fixed cell at ({row}, {col})"
            );
            cell.to_void();
        }
    }

    fn paint(&mut self, piece: Piece, state: CellState) {
        let color = match state {
            CellState::Falling => {
                self.current = Some(piece);
                piece.color()
            }
            CellState::DropPreview => {
                self.preview = Some(piece);
                Color::DROP_PREVIEW
            }
            CellState::Fixed => {
                self.current = None;
                self.preview = None;
                piece.color()
            }
            CellState::Void => panic!("cannot paint piece {piece} as void"),
        };

        for (row, col) in piece.coordinates().into_iter().filter_map(Coordinate::position) {
            self.board.set_cell(row, col, Cell::new(state, color));
        }
    }
}
