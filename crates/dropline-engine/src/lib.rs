pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a piece could not be installed as the falling piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum SpawnError {
    /// The spawn footprint overlaps settled cells; the game is over.
    #[display("spawn position is already occupied by fixed cells")]
    GameOver,
    /// Another piece is still falling.
    #[display("a falling piece is already in play")]
    PieceInPlay,
}
