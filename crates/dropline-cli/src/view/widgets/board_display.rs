use std::iter;

use dropline_engine::{Field, HEIGHT, WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::CellDisplay;

/// Renders the visible field, falling piece and preview included.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    field: &'a Field,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self { field, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        WIDTH as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        HEIGHT as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal = Layout::horizontal(
            (0..WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical((0..HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT)));

        let grid_cells = area
            .layout::<HEIGHT>(&vertical)
            .into_iter()
            .flat_map(|row| row.layout::<WIDTH>(&horizontal));

        // cells() walks rows top to bottom, columns left to right
        for (grid_cell, (_, cell)) in iter::zip(grid_cells, self.field.cells()) {
            CellDisplay::from_cell(cell).render(grid_cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use dropline_engine::{Move, Piece, PieceKind};
    use ratatui::widgets::Block;

    use super::*;

    fn render(field: &Field) -> Buffer {
        let widget = BoardDisplay::new(field);
        let area = Rect::new(0, 0, widget.width(), widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_size_includes_border() {
        let field = Field::new();
        let plain = BoardDisplay::new(&field);
        assert_eq!((plain.width(), plain.height()), (20, 20));
        let bordered = BoardDisplay::new(&field).block(Block::bordered());
        assert_eq!((bordered.width(), bordered.height()), (22, 22));
    }

    #[test]
    fn test_preview_drawn_as_brackets() {
        let mut field = Field::new();
        field.spawn(Piece::new(PieceKind::O)).unwrap();
        assert!(field.attempt(Move::SoftDrop).is_moved());

        let buf = render(&field);
        // O spawns over columns 3 and 4; its preview rests on the floor
        assert_eq!(buf[(6, 19)].symbol(), "[");
        assert_eq!(buf[(7, 19)].symbol(), "]");
        // a one-character symbol is centered into the second column of its cell
        assert_eq!(buf[(0, 19)].symbol(), " ");
        assert_eq!(buf[(1, 19)].symbol(), ".");
    }
}
