use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::verbs::GRID_CELLS;

pub const GRID_SIDE: usize = 5;

/// Completed lines needed to win
pub const WIN_LINE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum LineKind {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub cells: [usize; GRID_SIDE],
}

/// The 12 candidate lines: rows 0-4, columns 0-4, diagonal, anti-diagonal
pub static CANDIDATE_LINES: Lazy<Vec<Line>> = Lazy::new(|| {
    let rows = (0..GRID_SIDE).map(|r| Line {
        kind: LineKind::Row(r),
        cells: std::array::from_fn(|c| r * GRID_SIDE + c),
    });
    let columns = (0..GRID_SIDE).map(|c| Line {
        kind: LineKind::Column(c),
        cells: std::array::from_fn(|r| r * GRID_SIDE + c),
    });
    let diagonals = [
        Line {
            kind: LineKind::Diagonal,
            cells: std::array::from_fn(|i| i * (GRID_SIDE + 1)),
        },
        Line {
            kind: LineKind::AntiDiagonal,
            cells: std::array::from_fn(|i| (i + 1) * (GRID_SIDE - 1)),
        },
    ];
    rows.chain(columns).chain(diagonals).collect()
});

/// Every candidate line whose cells are all correct. Lines sharing a cell
/// are reported independently.
pub fn detect_lines(correct: &[bool; GRID_CELLS]) -> Vec<Line> {
    CANDIDATE_LINES
        .iter()
        .filter(|line| line.cells.iter().all(|&index| correct[index]))
        .cloned()
        .collect()
}

pub fn has_won(correct: &[bool; GRID_CELLS]) -> bool {
    detect_lines(correct).len() >= WIN_LINE_COUNT
}
