use serde::{Deserialize, Serialize};

/// What currently occupies a board slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum CellState {
    /// Empty slot.
    #[default]
    Void,
    /// Part of the live, controllable piece.
    Falling,
    /// Part of the landing preview (ghost) piece.
    DropPreview,
    /// Permanently settled.
    Fixed,
}

/// 24-bit RGB color packed as `0xRRGGBB`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("#{_0:06x}")]
pub struct Color(u32);

impl Color {
    /// Background color carried by every void cell.
    pub const VOID: Self = Self::from_rgb(0, 0, 0);
    /// Color of landing preview cells.
    pub const DROP_PREVIEW: Self = Self::from_rgb(0x50, 0x50, 0x50);

    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the `(red, green, blue)` channels.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// A single grid slot: its state and the color it is drawn with.
///
/// State and color are always written together. No validation happens here;
/// the field decides which combinations are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    state: CellState,
    color: Color,
}

impl Cell {
    pub const VOID: Self = Self::new(CellState::Void, Color::VOID);

    #[must_use]
    pub const fn new(state: CellState, color: Color) -> Self {
        Self { state, color }
    }

    #[must_use]
    pub const fn state(self) -> CellState {
        self.state
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Resets the cell to `Void`, restoring the background color.
    pub fn to_void(&mut self) {
        *self = Self::VOID;
    }
}
