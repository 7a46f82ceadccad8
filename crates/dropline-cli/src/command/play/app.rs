use crossterm::event::{Event, KeyCode};
use dropline_engine::Move;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    session::{PlaySession, SessionState},
    tui::{App, Tui},
    view::widgets::SessionDisplay,
};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: PlaySession,
    fps: u32,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: PlaySession, fps: u32) -> Self {
        Self {
            session,
            fps,
            is_exiting: false,
        }
    }

    fn key_intent(code: KeyCode) -> Option<Move> {
        let intent = match code {
            KeyCode::Left => Move::MoveLeft,
            KeyCode::Right => Move::MoveRight,
            KeyCode::Down => Move::SoftDrop,
            KeyCode::Up | KeyCode::Char(' ') => Move::HardDrop,
            KeyCode::Char('z') => Move::RotateLeft,
            KeyCode::Char('x') => Move::RotateRight,
            _ => return None,
        };
        Some(intent)
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(f64::from(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        match event.code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('p') => self.session.toggle_pause(),
            code => {
                if let Some(intent) = Self::key_intent(code) {
                    self.session.apply(intent);
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = match self.session.state() {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ Space (Hard Drop) | Z X (Rotate) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.tick();
    }
}
