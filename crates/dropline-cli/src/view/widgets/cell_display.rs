use dropline_engine::{Cell, CellState};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::{color, style};

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub fn from_cell(cell: Cell) -> Self {
        let color = color::from_engine(cell.color());
        match cell.state() {
            CellState::Void => Self {
                style: style::VOID_DOT,
                symbol: ".",
            },
            CellState::DropPreview => Self {
                style: style::outline(color),
                symbol: "[]",
            },
            CellState::Falling | CellState::Fixed => Self {
                style: style::solid(color),
                symbol: "",
            },
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph paints the style across the whole area, not just the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use dropline_engine::{Color, PieceKind};

    use super::*;

    #[test]
    fn test_from_cell() {
        assert_eq!(CellDisplay::from_cell(Cell::VOID).symbol, ".");

        let preview = CellDisplay::from_cell(Cell::new(CellState::DropPreview, Color::DROP_PREVIEW));
        assert_eq!(preview.symbol, "[]");
        assert_eq!(
            preview.style.fg,
            Some(ratatui::style::Color::Rgb(0x50, 0x50, 0x50))
        );

        let fixed = CellDisplay::from_cell(Cell::new(CellState::Fixed, PieceKind::T.color()));
        assert_eq!(fixed.symbol, "");
        assert_eq!(fixed.style.bg, Some(ratatui::style::Color::Rgb(255, 0, 255)));
    }
}
