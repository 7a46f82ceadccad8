use crate::{
    command::play::app::PlayApp,
    session::{PieceSource, PlaySession},
    tui::Tui,
};

mod app;

const DEFAULT_GRAVITY_MS: u64 = 800;
const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Milliseconds between gravity soft drops
    #[clap(long, default_value_t = DEFAULT_GRAVITY_MS)]
    gravity_ms: u64,
    /// Ticks per second
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_ms: DEFAULT_GRAVITY_MS,
            fps: DEFAULT_FPS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        gravity_ms,
        fps,
    } = *arg;

    let source = seed.map_or_else(PieceSource::from_entropy, PieceSource::from_seed);
    let session = PlaySession::new(source, gravity_ticks(gravity_ms, fps));
    let mut app = PlayApp::new(session, fps);

    Tui::new().run(&mut app)
}

/// Converts a gravity period into whole ticks, never less than one.
fn gravity_ticks(gravity_ms: u64, fps: u32) -> u32 {
    let ticks = gravity_ms.saturating_mul(u64::from(fps)) / 1000;
    u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_ticks() {
        assert_eq!(gravity_ticks(800, 60), 48);
        assert_eq!(gravity_ticks(1000, 30), 30);
        assert_eq!(gravity_ticks(5, 60), 1);
        assert_eq!(gravity_ticks(0, 60), 1);
        assert_eq!(gravity_ticks(u64::MAX, 60), u32::MAX);
    }
}
