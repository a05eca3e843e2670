//! Generate perfect mazes and find their solution
//!
//! A maze is carved into a grid of odd dimensions by randomised recursive
//! backtracking, so that every pair of path cells is joined by exactly one
//! route. A depth-first search then marks the route from start to end.
//!
//! # Examples
//! ```
//! use perfect_maze::{Glyphs, Maze, MazeGenerator, Strategy};
//!
//! let mut gen = MazeGenerator::new(Some(7));
//! let mut maze = Maze::generate(&mut gen, 4, 6, Strategy::Iterative).unwrap();
//! maze.solve(Strategy::Iterative).unwrap();
//! println!("{}", maze.render(&Glyphs::ascii(), true));
//! assert!(!maze.solution_trail().is_empty());
//! ```
//!
//! A rendered maze can be read back and solved again:
//! ```
//! use perfect_maze::{Glyphs, Maze, Strategy};
//!
//! let text = "
//! ######
//! S   E
//! ######";
//! let mut maze = Maze::parse(text.trim(), &Glyphs::ascii()).unwrap();
//! maze.solve(Strategy::Recursive).unwrap();
//! assert_eq!(maze.render(&Glyphs::ascii(), true), "#####\nSoooE\n#####");
//! ```

pub mod grid;
pub mod maze_generator;
pub mod player;
pub mod render;
pub mod solver;

use log::debug;
use thiserror::Error;

pub use grid::{CellState, Grid, Point};
pub use maze_generator::MazeGenerator;
pub use player::{Direction, MoveOutcome, Player};
pub use render::Glyphs;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("no route from start {start:?} to end {end:?}")]
    DisconnectedMaze { start: Point, end: Point },
    #[error("malformed maze: {0}")]
    Parse(String),
}

/// Backtracking mechanism used by the carver and the solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Native call-stack recursion
    Recursive,
    /// Explicit stack on the heap
    #[default]
    Iterative,
}

/// Grid together with its start and end markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: Point,
    end: Point,
}

impl Maze {
    /// Generate a maze of `path_rows` x `path_cols` lattice cells.
    ///
    /// The grid itself is `2 * path_rows + 1` by `2 * path_cols + 1`.
    pub fn generate(
        gen: &mut MazeGenerator,
        path_rows: usize,
        path_cols: usize,
        strategy: Strategy,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::from_path_dimensions(path_rows, path_cols)?;
        let (start, end) = gen.generate(&mut grid, strategy);
        Ok(Maze { grid, start, end })
    }

    /// Parse maze from its text rendering
    ///
    /// Returns error on unknown glyphs, ragged rows, or when there is not
    /// exactly one start and one end.
    pub fn parse(text: &str, glyphs: &Glyphs) -> Result<Self, MazeError> {
        let mut start = None;
        let mut end = None;
        let mut rows = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let mut cells = Vec::new();
            for (col, c) in line.chars().enumerate() {
                let state = glyphs.state(c).ok_or_else(|| {
                    MazeError::Parse(format!(
                        "unexpected character `{}` at row={}, col={}",
                        c, row, col
                    ))
                })?;
                let marker = match state {
                    CellState::Start => Some(&mut start),
                    CellState::End => Some(&mut end),
                    _ => None,
                };
                if let Some(slot) = marker {
                    if slot.replace(Point { row, col }).is_some() {
                        return Err(MazeError::Parse(format!(
                            "duplicate {:?} at row={}, col={}",
                            state, row, col
                        )));
                    }
                }
                cells.push(state);
            }
            rows.push(cells);
        }

        let grid = Grid::from_rows(rows)?;
        Ok(Maze {
            grid,
            start: start.ok_or_else(|| MazeError::Parse("start not found in maze".into()))?,
            end: end.ok_or_else(|| MazeError::Parse("end not found in maze".into()))?,
        })
    }

    /// Mark the solution route in the grid and return it in walking order
    pub fn solve(&mut self, strategy: Strategy) -> Result<Vec<Point>, MazeError> {
        debug!("Solving from {:?} to {:?}", self.start, self.end);
        solver::solve(&mut self.grid, self.start, self.end, strategy)
    }

    /// Solution cells in walking order, read back from the grid; empty
    /// before [Self::solve]. See [solver::trace_solution] for grids with loops.
    pub fn solution_trail(&self) -> Vec<Point> {
        solver::trace_solution(&self.grid, self.start)
    }

    pub fn render(&self, glyphs: &Glyphs, show_solution: bool) -> String {
        render::render(&self.grid, glyphs, show_solution)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use crate::{CellState, Glyphs, Maze, MazeError, MazeGenerator, Point, Strategy};

    #[test]
    fn parse_maze_input() {
        let text = "
#S#####
# #   #
# # # #
#   # E
#######"
            .trim();
        let maze = Maze::parse(text, &Glyphs::ascii()).unwrap();

        assert_eq!(maze.start(), Point::new(0, 1));
        assert_eq!(maze.end(), Point::new(3, 6));
        assert_eq!((maze.grid().rows(), maze.grid().cols()), (5, 7));
        assert_eq!(maze.grid().count(CellState::Path), 11);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let glyphs = Glyphs::ascii();
        for text in [
            "#S#\n# #\n###",   // no end
            "#S#\n# #\n#S#",   // two starts
            "#S#\n#x#\n#E#",   // unknown glyph
            "#S#\n# \n#E#",    // ragged
        ] {
            assert!(
                matches!(Maze::parse(text, &glyphs), Err(MazeError::Parse(_))),
                "{:?}",
                text
            );
        }
        assert!(matches!(
            Maze::parse("SE", &glyphs),
            Err(MazeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn solve_parsed_maze() {
        let text = "
#S#####
#   # #
# ### #
#     E
#######"
            .trim();
        let mut maze = Maze::parse(text, &Glyphs::ascii()).unwrap();
        maze.solve(Strategy::Recursive).unwrap();
        assert_eq!(
            maze.render(&Glyphs::ascii(), true),
            "
#S#####
#o  # #
#o### #
#oooooE
#######"
                .trim()
        );
        assert_eq!(maze.solution_trail().len(), 7);
        assert_eq!(maze.grid().count(CellState::Visited), 2);
    }

    #[test]
    fn open_room_solution_terminates() {
        let text = "
#S#####
#     #
#     #
#     E
#######"
            .trim();
        let mut maze = Maze::parse(text, &Glyphs::ascii()).unwrap();
        let trail = maze.solve(Strategy::Recursive).unwrap();
        assert_eq!(trail.len(), maze.grid().count(CellState::Solution));
        assert_eq!(trail.first(), Some(&Point::new(1, 1)));
        assert_eq!(trail.last(), Some(&Point::new(3, 5)));

        let traced = maze.solution_trail();
        assert!(traced.len() <= trail.len());
    }

    #[test]
    fn rendered_maze_parses_back() {
        let mut gen = MazeGenerator::new(Some(3));
        let mut maze = Maze::generate(&mut gen, 6, 9, Strategy::Iterative).unwrap();
        let text = maze.render(&Glyphs::emoji(), false);
        let mut parsed = Maze::parse(&text, &Glyphs::emoji()).unwrap();
        assert_eq!(parsed.start(), maze.start());
        assert_eq!(parsed.end(), maze.end());

        let trail = maze.solve(Strategy::Iterative).unwrap();
        assert_eq!(parsed.solve(Strategy::Iterative).unwrap(), trail);
        assert_eq!(parsed.solution_trail(), maze.solution_trail());
    }

    #[test]
    fn zero_path_rows_rejected() {
        let mut gen = MazeGenerator::new(Some(0));
        assert!(matches!(
            Maze::generate(&mut gen, 0, 3, Strategy::Iterative),
            Err(MazeError::InvalidDimension { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn generation_and_solution_are_reproducible() {
        let build = |seed| {
            let mut gen = MazeGenerator::new(Some(seed));
            let mut maze = Maze::generate(&mut gen, 20, 30, Strategy::Recursive).unwrap();
            maze.solve(Strategy::Recursive).unwrap();
            maze
        };
        assert_eq!(build(99), build(99));
    }
}
