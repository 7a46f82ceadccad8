//! Playing-field state machine.
//!
//! - [`Field`] - Board, falling piece, and landing preview; resolves moves,
//!   locks pieces, and clears lines
//! - [`AttemptOutcome`] - What a single move attempt did
//! - [`FieldSnapshot`] - Read-only view of the field for rendering
//!
//! # Game Flow
//!
//! 1. The driver spawns a piece with [`Field::spawn`]; a [`SpawnError::GameOver`]
//!    ends the game
//! 2. Move intents are fed in with [`Field::attempt`]
//! 3. When an attempt locks the piece, complete lines are cleared and
//!    [`AttemptOutcome::Locked`] reports how many
//! 4. The driver spawns the next piece
//!
//! # Example
//!
//! ```
//! use dropline_engine::{AttemptOutcome, Field, Move, Piece, PieceKind};
//!
//! let mut field = Field::new();
//! field.spawn(Piece::new(PieceKind::T)).unwrap();
//!
//! assert_eq!(field.attempt(Move::MoveLeft), AttemptOutcome::Moved);
//! assert_eq!(field.attempt(Move::RotateRight), AttemptOutcome::Moved);
//!
//! let outcome = field.attempt(Move::HardDrop);
//! assert_eq!(outcome, AttemptOutcome::Locked { lines_cleared: 0 });
//! assert!(field.current_piece().is_none());
//! ```
//!
//! [`SpawnError::GameOver`]: crate::SpawnError::GameOver

pub use self::{field::*, snapshot::*};

mod field;
mod snapshot;
