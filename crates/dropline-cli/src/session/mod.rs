use dropline_engine::{AttemptOutcome, Field, Move, SpawnError};

pub use self::piece_source::PieceSource;

mod piece_source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// One interactive game: a field fed by a piece source and pulled down by gravity.
///
/// Gravity is counted in ticks; every `gravity_ticks` ticks the falling piece
/// receives a soft drop. After each lock the next piece spawns, and a spawn
/// that collides with the stack ends the game.
#[derive(Debug)]
pub struct PlaySession {
    field: Field,
    source: PieceSource,
    state: SessionState,
    gravity_ticks: u32,
    ticks_until_drop: u32,
    lines_cleared: usize,
    pieces_locked: usize,
}

impl PlaySession {
    pub fn new(source: PieceSource, gravity_ticks: u32) -> Self {
        let gravity_ticks = gravity_ticks.max(1);
        let mut session = Self {
            field: Field::new(),
            source,
            state: SessionState::Playing,
            gravity_ticks,
            ticks_until_drop: gravity_ticks,
            lines_cleared: 0,
            pieces_locked: 0,
        };
        session.spawn_next();
        session
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> usize {
        self.pieces_locked
    }

    /// Applies a player intent. Returns `Idle` unless the game is running.
    pub fn apply(&mut self, intent: Move) -> AttemptOutcome {
        if !self.state.is_playing() {
            return AttemptOutcome::Idle;
        }
        let outcome = self.field.attempt(intent);
        if let AttemptOutcome::Locked { lines_cleared } = outcome {
            self.lines_cleared += lines_cleared;
            self.pieces_locked += 1;
            self.ticks_until_drop = self.gravity_ticks;
            self.spawn_next();
        }
        outcome
    }

    /// Advances the gravity timer by one tick.
    pub fn tick(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.ticks_until_drop -= 1;
        if self.ticks_until_drop == 0 {
            self.ticks_until_drop = self.gravity_ticks;
            self.apply(Move::SoftDrop);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    fn spawn_next(&mut self) {
        match self.field.spawn(self.source.next_piece()) {
            Ok(()) => {}
            Err(SpawnError::GameOver) => self.state = SessionState::GameOver,
            Err(SpawnError::PieceInPlay) => {
                unreachable!("next piece requested while another is still falling")
            }
        }
    }
}
