pub use self::{board::*, cell::*, coordinate::*, piece::*};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod coordinate;
pub(crate) mod piece;

/// Number of visible rows in the field.
pub const HEIGHT: usize = 20;
/// Number of columns in the field.
pub const WIDTH: usize = 10;
