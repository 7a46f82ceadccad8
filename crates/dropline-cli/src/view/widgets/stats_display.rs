use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{
    session::{PlaySession, SessionState},
    view::widgets::style,
};

type StatFn = fn(&PlaySession) -> String;

const STATS: &[(&str, StatFn)] = &[
    ("LINES:", |session| session.lines_cleared().to_string()),
    ("PIECES:", |session| session.pieces_locked().to_string()),
    ("STATE:", |session| {
        match session.state() {
            SessionState::Playing => "PLAY",
            SessionState::Paused => "PAUSE",
            SessionState::GameOver => "OVER",
        }
        .to_owned()
    }),
];

#[derive(Debug)]
pub struct StatsDisplay<'a> {
    session: &'a PlaySession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a PlaySession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        STATS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = Layout::vertical(STATS.iter().map(|_| Constraint::Length(1))).split(area);
        for (&(label, value), area) in iter::zip(STATS, row_areas.iter().copied()) {
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(self.session), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
