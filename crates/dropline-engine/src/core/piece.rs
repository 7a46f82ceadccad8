use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use super::{cell::Color, coordinate::Coordinate};

/// Number of cells in every piece.
pub const PIECE_CELLS: usize = 4;

/// Anchor of a freshly spawned piece.
///
/// The anchor is the top-left corner of the shape's bounding box. Row `-1`
/// puts the top row of most shapes above the visible field.
pub const SPAWN_ANCHOR: Coordinate = Coordinate::new(-1, 3);

/// A discrete move intent fed into the field by the driver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum Move {
    MoveLeft,
    MoveRight,
    /// Move down by one row; locks the piece when it cannot go further.
    SoftDrop,
    /// Drop straight down to the resting position and lock.
    HardDrop,
    RotateLeft,
    RotateRight,
}

impl Move {
    pub const ALL: [Self; 6] = [
        Move::MoveLeft,
        Move::MoveRight,
        Move::SoftDrop,
        Move::HardDrop,
        Move::RotateLeft,
        Move::RotateRight,
    ];

    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(self, Move::RotateLeft | Move::RotateRight)
    }
}

/// A falling piece: a shape kind in some orientation, anchored on the board.
///
/// Pieces are immutable values. Every move produces a new `Piece`, and no
/// bounds or occupancy checking happens here.
///
/// # Example
///
/// ```
/// use dropline_engine::{Coordinate, Move, Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.moved(Move::MoveLeft);
/// assert_eq!(moved.anchor(), Coordinate::new(-1, 2));
/// assert_eq!(moved.to_string(), "T#0@-1,2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    anchor: Coordinate,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::at(kind, Rotation::SPAWN, SPAWN_ANCHOR)
    }

    #[must_use]
    pub const fn at(kind: PieceKind, rotation: Rotation, anchor: Coordinate) -> Self {
        Self {
            kind,
            rotation,
            anchor,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn anchor(&self) -> Coordinate {
        self.anchor
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.kind.color()
    }

    /// Board coordinates occupied by the piece.
    #[must_use]
    pub fn coordinates(&self) -> [Coordinate; PIECE_CELLS] {
        self.kind
            .cells(self.rotation)
            .map(|(dr, dc)| self.anchor.translated(dr, dc))
    }

    /// Applies a move intent.
    ///
    /// `HardDrop` has no single-step meaning at this level and returns the
    /// piece unchanged; the field resolves it.
    #[must_use]
    pub fn moved(&self, intent: Move) -> Self {
        match intent {
            Move::MoveLeft => self.left(),
            Move::MoveRight => self.right(),
            Move::SoftDrop => self.down(),
            Move::HardDrop => *self,
            Move::RotateLeft => self.rotated_left(),
            Move::RotateRight => self.rotated_right(),
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            anchor: self.anchor.translated(1, 0),
            ..*self
        }
    }

    /// Moves the piece horizontally by `d_col` columns.
    #[must_use]
    pub fn shifted(&self, d_col: i32) -> Self {
        Self {
            anchor: self.anchor.translated(0, d_col),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_left(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_left(),
            ..*self
        }
    }
}

// Text form: "kind#rotation@row,col" (e.g. "T#0@-1,3")
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.anchor.row,
            self.anchor.col
        )
    }
}

/// Error returned when parsing the text form of a [`Piece`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceError {
    #[display("expected format 'kind#rotation@row,col', got '{input}'")]
    Format { input: String },
    #[display("invalid piece kind: '{kind}'")]
    Kind { kind: String },
    #[display("rotation must be 0-3, got '{rotation}'")]
    Rotation { rotation: String },
    #[display("invalid anchor coordinate: '{value}'")]
    Coordinate { value: String },
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ParsePieceError::Format {
            input: s.to_owned(),
        };
        let (kind_str, rest) = s.split_once('#').ok_or_else(format_error)?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(format_error)?;
        let (row_str, col_str) = position_str.split_once(',').ok_or_else(format_error)?;

        let mut chars = kind_str.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParsePieceError::Kind {
            kind: kind_str.to_owned(),
        })?;

        let rotation = rotation_str
            .parse::<u8>()
            .ok()
            .and_then(Rotation::from_index)
            .ok_or_else(|| ParsePieceError::Rotation {
                rotation: rotation_str.to_owned(),
            })?;

        let parse_coord = |value: &str| {
            value
                .trim()
                .parse::<i32>()
                .map_err(|_| ParsePieceError::Coordinate {
                    value: value.to_owned(),
                })
        };
        let anchor = Coordinate::new(parse_coord(row_str)?, parse_coord(col_str)?);

        Ok(Self::at(kind, rotation, anchor))
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Orientation of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const HALF: Self = Self(2);
    pub const LEFT: Self = Self(3);

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 4 { Some(Self(index)) } else { None }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

/// Shape of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    S = 2,
    Z = 3,
    J = 4,
    L = 5,
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::from_rgb(0, 255, 255),
            PieceKind::O => Color::from_rgb(255, 255, 0),
            PieceKind::S => Color::from_rgb(0, 255, 0),
            PieceKind::Z => Color::from_rgb(255, 0, 0),
            PieceKind::J => Color::from_rgb(0, 0, 255),
            PieceKind::L => Color::from_rgb(255, 127, 0),
            PieceKind::T => Color::from_rgb(255, 0, 255),
        }
    }

    /// Cell offsets from the anchor for the given orientation.
    #[must_use]
    pub const fn cells(self, rotation: Rotation) -> ShapeCells {
        PIECE_SHAPES[self as usize][rotation.0 as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use dropline_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// `(row, col)` offsets of a shape's cells inside its bounding box.
pub type ShapeCells = [(i32, i32); PIECE_CELLS];

/// Rotates cells 90° clockwise inside a `size`×`size` bounding box.
const fn rotated_cells(size: i32, cells: ShapeCells) -> ShapeCells {
    let mut rotated = cells;
    let mut i = 0;
    while i < PIECE_CELLS {
        let (row, col) = cells[i];
        rotated[i] = (col, size - 1 - row);
        i += 1;
    }
    rotated
}

/// Generates all 4 orientations from the spawn orientation.
///
/// `size` is the bounding box size: 4 for I, 2 for O, 3 otherwise.
const fn orientations(size: i32, spawn: ShapeCells) -> [ShapeCells; 4] {
    let right = rotated_cells(size, spawn);
    let half = rotated_cells(size, right);
    let left = rotated_cells(size, half);
    [spawn, right, half, left]
}

const PIECE_SHAPES: [[ShapeCells; 4]; PieceKind::LEN] = [
    // I: ....
    //    IIII
    orientations(4, [(1, 0), (1, 1), (1, 2), (1, 3)]),
    // O: OO
    //    OO
    orientations(2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
    // S: .SS
    //    SS.
    orientations(3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
    // Z: ZZ.
    //    .ZZ
    orientations(3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
    // J: J..
    //    JJJ
    orientations(3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
    // L: ..L
    //    LLL
    orientations(3, [(0, 2), (1, 0), (1, 1), (1, 2)]),
    // T: .T.
    //    TTT
    orientations(3, [(0, 1), (1, 0), (1, 1), (1, 2)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut coords: [Coordinate; PIECE_CELLS]) -> [Coordinate; PIECE_CELLS] {
        coords.sort();
        coords
    }

    #[test]
    fn test_spawn_coordinates() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!(
            sorted(piece.coordinates()),
            [
                Coordinate::new(-1, 4),
                Coordinate::new(0, 3),
                Coordinate::new(0, 4),
                Coordinate::new(0, 5),
            ]
        );
    }

    #[test]
    fn test_rotation_clockwise() {
        let anchor = Coordinate::new(0, 0);
        let east = Piece::at(PieceKind::T, Rotation::SPAWN, anchor).rotated_right();
        assert_eq!(east.rotation(), Rotation::RIGHT);
        assert_eq!(
            sorted(east.coordinates()),
            [
                Coordinate::new(0, 1),
                Coordinate::new(1, 1),
                Coordinate::new(1, 2),
                Coordinate::new(2, 1),
            ]
        );

        let vertical_i = Piece::at(PieceKind::I, Rotation::RIGHT, anchor);
        assert!(vertical_i.coordinates().iter().all(|c| c.col == 2));
    }

    #[test]
    fn test_rotations_cycle() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let full_turn = piece
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(full_turn, piece);
            assert_eq!(piece.rotated_left().rotated_right(), piece);
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let piece = Piece::at(PieceKind::O, Rotation::SPAWN, Coordinate::new(5, 5));
        assert_eq!(
            sorted(piece.coordinates()),
            sorted(piece.rotated_right().coordinates())
        );
    }

    #[test]
    fn test_every_orientation_has_distinct_cells() {
        for kind in PieceKind::ALL {
            for index in 0..4 {
                let rotation = Rotation::from_index(index).unwrap();
                let mut cells = kind.cells(rotation);
                cells.sort_unstable();
                assert!(
                    cells.windows(2).all(|w| w[0] != w[1]),
                    "{kind:?} rotation {index} has overlapping cells"
                );
            }
        }
    }

    #[test]
    fn test_moves_do_not_check_bounds() {
        let piece = Piece::at(PieceKind::I, Rotation::SPAWN, Coordinate::new(0, 0));
        let moved = piece.moved(Move::MoveLeft).moved(Move::MoveLeft);
        assert_eq!(moved.anchor(), Coordinate::new(0, -2));
        assert_eq!(piece.moved(Move::SoftDrop).anchor(), Coordinate::new(1, 0));
        assert_eq!(piece.moved(Move::HardDrop), piece);
        assert_eq!(piece.moved(Move::RotateLeft).rotation(), Rotation::LEFT);
    }

    #[test]
    fn test_piece_text_format() {
        let piece = Piece::at(PieceKind::S, Rotation::RIGHT, Coordinate::new(-2, 7));
        assert_eq!(piece.to_string(), "S#1@-2,7");
        assert_eq!("S#1@-2,7".parse::<Piece>(), Ok(piece));

        let json = serde_json::to_string(&piece).unwrap();
        assert_eq!(json, "\"S#1@-2,7\"");
        assert_eq!(serde_json::from_str::<Piece>(&json).unwrap(), piece);
    }

    #[test]
    fn test_piece_parse_error_cases() {
        assert!(matches!(
            "S1@4,18".parse::<Piece>(),
            Err(ParsePieceError::Format { .. })
        ));
        assert!(matches!(
            "S#1@4".parse::<Piece>(),
            Err(ParsePieceError::Format { .. })
        ));
        assert!(matches!(
            "X#1@4,8".parse::<Piece>(),
            Err(ParsePieceError::Kind { .. })
        ));
        assert!(matches!(
            "ST#1@4,8".parse::<Piece>(),
            Err(ParsePieceError::Kind { .. })
        ));
        assert!(matches!(
            "S#4@4,8".parse::<Piece>(),
            Err(ParsePieceError::Rotation { .. })
        ));
        assert!(matches!(
            "S#1@abc,8".parse::<Piece>(),
            Err(ParsePieceError::Coordinate { .. })
        ));
        assert!(serde_json::from_str::<Piece>("\"S#1@4\"").is_err());
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_move_intents_serialize_camel_case() {
        let json = serde_json::to_string(&Move::ALL).unwrap();
        assert_eq!(
            json,
            r#"["moveLeft","moveRight","softDrop","hardDrop","rotateLeft","rotateRight"]"#
        );
        assert!(Move::RotateLeft.is_rotation());
        assert!(!Move::SoftDrop.is_rotation());
    }
}
