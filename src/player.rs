//! Player movement through a finished maze

use crate::grid::{CellState, Grid, Point};
use crate::MazeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Parse a move string of `U`, `D`, `L`, `R` letters.
    ///
    /// Case-insensitive; whitespace is skipped.
    pub fn parse_moves(moves: &str) -> Result<Vec<Self>, MazeError> {
        moves
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'U' => Ok(Direction::Up),
                'D' => Ok(Direction::Down),
                'L' => Ok(Direction::Left),
                'R' => Ok(Direction::Right),
                other => Err(MazeError::Parse(format!("unknown move `{}`", other))),
            })
            .collect()
    }
}

/// Result of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Wall, start marker or outside the grid; position unchanged
    Blocked,
    /// Reached the end marker
    Solved,
}

/// Current position of a player walking the maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    position: Point,
    steps: usize,
}

impl Player {
    pub fn new(start: Point) -> Self {
        Self {
            position: start,
            steps: 0,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Number of successful moves since the start
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether `target` may be entered: in bounds, not a wall, and not the
    /// start marker.
    pub fn is_valid_move(grid: &Grid, target: Point) -> bool {
        grid.get(target)
            .is_some_and(|s| s.is_traversable() && s != CellState::Start)
    }

    pub fn try_move(&mut self, grid: &Grid, direction: Direction) -> MoveOutcome {
        let (dr, dc) = direction.delta();
        match grid.offset(self.position, dr, dc) {
            Some(target) if Self::is_valid_move(grid, target) => {
                self.position = target;
                self.steps += 1;
                if grid[target] == CellState::End {
                    MoveOutcome::Solved
                } else {
                    MoveOutcome::Moved
                }
            }
            _ => MoveOutcome::Blocked,
        }
    }

    /// Return to `start`, forgetting all steps
    pub fn restart(&mut self, start: Point) {
        self.position = start;
        self.steps = 0;
    }
}
