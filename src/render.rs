//! Text rendering of a maze grid

use itertools::Itertools;

use crate::grid::{CellState, Grid};

/// Characters used to draw each kind of cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub wall: char,
    pub path: char,
    pub start: char,
    pub end: char,
    pub solution: char,
}

impl Glyphs {
    pub const fn ascii() -> Self {
        Self {
            wall: '#',
            path: ' ',
            start: 'S',
            end: 'E',
            solution: 'o',
        }
    }

    pub const fn emoji() -> Self {
        Self {
            wall: '🟫',
            path: '🟩',
            start: '🏃',
            end: '❎',
            solution: '🟨',
        }
    }

    /// Glyph for `state`; the solution glyph only when `show_solution`
    pub fn glyph(&self, state: CellState, show_solution: bool) -> char {
        match state {
            CellState::Wall => self.wall,
            CellState::Start => self.start,
            CellState::End => self.end,
            CellState::Solution if show_solution => self.solution,
            CellState::Path | CellState::Unassigned | CellState::Visited | CellState::Solution => {
                self.path
            }
        }
    }

    /// Cell state for a glyph read back from text.
    ///
    /// Solution glyphs are read as [CellState::Path] so the result can be
    /// solved again.
    pub fn state(&self, glyph: char) -> Option<CellState> {
        match glyph {
            c if c == self.wall => Some(CellState::Wall),
            c if c == self.path || c == self.solution => Some(CellState::Path),
            c if c == self.start => Some(CellState::Start),
            c if c == self.end => Some(CellState::End),
            _ => None,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::ascii()
    }
}

/// Draw `grid` one line per row
pub fn render(grid: &Grid, glyphs: &Glyphs, show_solution: bool) -> String {
    (0..grid.rows())
        .map(|row| {
            grid.row(row)
                .iter()
                .map(|&state| glyphs.glyph(state, show_solution))
                .join("")
        })
        .join("\n")
}
