use serde::Serialize;

use crate::core::{BoardRow, HEIGHT, Piece, WIDTH};

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    pub height: usize,
    pub width: usize,
    /// Cells top to bottom.
    pub rows: Vec<BoardRow>,
    pub current: Option<Piece>,
    pub preview: Option<Piece>,
}

impl FieldSnapshot {
    pub(crate) fn new(rows: &[BoardRow; HEIGHT], current: Option<Piece>, preview: Option<Piece>) -> Self {
        Self {
            height: HEIGHT,
            width: WIDTH,
            rows: rows.to_vec(),
            current,
            preview,
        }
    }
}
