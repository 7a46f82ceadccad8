use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time to advance the application.
    Tick,
    /// Something changed since the last frame was drawn.
    Render,
    #[from]
    Crossterm(CrosstermEvent),
}
