//! Maze generation

use log::{debug, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::grid::{CellState, Grid, Point};
use crate::Strategy;

/// Lattice cell count above which call-stack carving is reported
const DEEP_RECURSION_WARN: usize = 10_000;

/// Randomised recursive-backtracking maze carver.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Lattice neighbours: up, down, left, right
    const DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Carve a perfect maze into `grid` and place start and end markers.
    ///
    /// Marker positions are drawn first, then carving starts from a random
    /// lattice cell, and finally the markers are written over the carved
    /// grid. Returns `(start, end)`.
    pub fn generate(&mut self, grid: &mut Grid, strategy: Strategy) -> (Point, Point) {
        let start = self.pick_marker(grid);
        let end = loop {
            let end = self.pick_marker(grid);
            if end != start {
                break end;
            }
        };

        let entry = Point::new(
            1 + 2 * self.random.gen_range(0..grid.rows() / 2),
            1 + 2 * self.random.gen_range(0..grid.cols() / 2),
        );
        debug!(
            "Carving {}x{} grid from {:?} ({:?})",
            grid.rows(),
            grid.cols(),
            entry,
            strategy
        );
        match strategy {
            Strategy::Recursive => {
                let lattice = (grid.rows() / 2) * (grid.cols() / 2);
                if lattice > DEEP_RECURSION_WARN {
                    warn!(
                        "Recursive carving of {} lattice cells may exhaust the stack",
                        lattice
                    );
                }
                self.carve_recursive(grid, entry);
            }
            Strategy::Iterative => self.carve_iterative(grid, entry),
        }

        grid.place_marker(start, CellState::Start);
        grid.place_marker(end, CellState::End);
        debug!("Start {:?}, end {:?}", start, end);
        (start, end)
    }

    /// Draw a marker position on the border.
    ///
    /// The row is rejection-sampled until it is the first row, the last row
    /// or an odd interior row. First and last rows take an odd column;
    /// interior rows take the first or last column.
    pub fn pick_marker(&mut self, grid: &Grid) -> Point {
        let (rows, cols) = (grid.rows(), grid.cols());
        let row = loop {
            let row = self.random.gen_range(0..rows);
            if row == 0 || row == rows - 1 || row % 2 == 1 {
                break row;
            }
        };
        let col = if row == 0 || row == rows - 1 {
            1 + 2 * self.random.gen_range(0..cols / 2)
        } else {
            (cols - 1) * self.random.gen_range(0..2)
        };
        Point { row, col }
    }

    /// Lattice neighbours of `active` that have not been carved yet
    fn candidates(grid: &Grid, active: Point) -> Vec<(isize, isize)> {
        Self::DIRECTIONS
            .iter()
            .copied()
            .filter(|&(dr, dc)| {
                grid.offset(active, dr, dc)
                    .is_some_and(|p| grid[p] == CellState::Unassigned)
            })
            .collect()
    }

    /// Open the connector towards a random candidate and return the target
    /// cell, or `None` at a dead end.
    fn advance(&mut self, grid: &mut Grid, active: Point) -> Option<Point> {
        let &(dr, dc) = Self::candidates(grid, active).choose(&mut self.random)?;
        let connector = grid.offset(active, dr / 2, dc / 2)?;
        let target = grid.offset(active, dr, dc)?;
        grid[connector] = CellState::Path;
        trace!("{:?} -> {:?}", active, target);
        Some(target)
    }

    /// Carve from `active` using the call stack for backtracking.
    ///
    /// Recursion depth grows with the longest branch; prefer
    /// [Self::carve_iterative] for large grids.
    pub fn carve_recursive(&mut self, grid: &mut Grid, active: Point) {
        grid[active] = CellState::Path;
        while let Some(target) = self.advance(grid, active) {
            self.carve_recursive(grid, target);
        }
    }

    /// Carve from `entry` with an explicit stack of cells to revisit.
    ///
    /// Consumes the random source in the same order as
    /// [Self::carve_recursive], so both produce the same maze.
    pub fn carve_iterative(&mut self, grid: &mut Grid, entry: Point) {
        grid[entry] = CellState::Path;
        let mut stack = vec![entry];
        while let Some(&active) = stack.last() {
            match self.advance(grid, active) {
                Some(target) => {
                    grid[target] = CellState::Path;
                    stack.push(target);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use crate::grid::{CellState, Grid, Point};
    use crate::maze_generator::MazeGenerator;
    use crate::Strategy;

    fn is_open(state: CellState) -> bool {
        state == CellState::Path
    }

    /// Lattice cells reachable from (1, 1) over carved cells
    fn reachable_lattice(grid: &Grid) -> usize {
        let first = Point::new(1, 1);
        let mut seen = HashSet::from([first]);
        let mut queue = VecDeque::from([first]);
        while let Some(p) = queue.pop_front() {
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                if let Some(n) = grid.offset(p, dr, dc) {
                    if is_open(grid[n]) && seen.insert(n) {
                        queue.push_back(n);
                    }
                }
            }
        }
        seen.iter().filter(|p| p.is_lattice()).count()
    }

    fn generate(rows: usize, cols: usize, seed: u64, strategy: Strategy) -> (Grid, Point, Point) {
        let mut grid = Grid::from_path_dimensions(rows, cols).unwrap();
        let mut gen = MazeGenerator::new(Some(seed));
        let (start, end) = gen.generate(&mut grid, strategy);
        (grid, start, end)
    }

    #[test]
    fn carved_maze_is_spanning_tree() {
        for seed in 0..20 {
            for (rows, cols) in [(1, 1), (1, 5), (4, 1), (6, 9), (12, 12)] {
                let (grid, _, _) = generate(rows, cols, seed, Strategy::Iterative);
                let lattice = rows * cols;

                assert_eq!(grid.count(CellState::Unassigned), 0);
                assert_eq!(reachable_lattice(&grid), lattice);

                let connectors = grid
                    .points()
                    .filter(|p| !p.is_lattice() && grid[*p] == CellState::Path)
                    .count();
                assert_eq!(connectors, lattice - 1, "seed {} {}x{}", seed, rows, cols);
            }
        }
    }

    #[test]
    fn even_even_cells_stay_walls() {
        let (grid, _, _) = generate(7, 5, 3, Strategy::Recursive);
        for p in grid.points().filter(|p| p.row % 2 == 0 && p.col % 2 == 0) {
            assert_eq!(grid[p], CellState::Wall);
        }
    }

    #[test]
    fn markers_are_distinct_and_on_border() {
        for seed in 0..200 {
            let (grid, start, end) = generate(3, 4, seed, Strategy::Iterative);
            assert_ne!(start, end);
            assert_eq!(grid[start], CellState::Start);
            assert_eq!(grid[end], CellState::End);
            for p in [start, end] {
                assert!(!(p.row % 2 == 0 && p.col % 2 == 0), "{:?}", p);
                let on_edge_row = p.row == 0 || p.row == grid.rows() - 1;
                let on_edge_col = p.col == 0 || p.col == grid.cols() - 1;
                assert!(
                    (on_edge_row && p.col % 2 == 1) || (p.row % 2 == 1 && on_edge_col),
                    "{:?}",
                    p
                );
            }
        }
    }

    #[test]
    fn marker_rows_follow_rejection_sampling() {
        // 7 rows: candidates are 0, 1, 3, 5, 6 with equal weight
        let grid = Grid::initialize(7, 7).unwrap();
        let mut gen = MazeGenerator::new(Some(11));
        let mut edge_rows = 0;
        let samples = 5000;
        for _ in 0..samples {
            let p = gen.pick_marker(&grid);
            assert!([0, 1, 3, 5, 6].contains(&p.row));
            if p.row == 0 || p.row == 6 {
                edge_rows += 1;
            }
        }
        // Expected share of edge rows is 2/5
        let share = edge_rows as f64 / samples as f64;
        assert!((0.35..0.45).contains(&share), "share {}", share);
    }

    #[test]
    fn smallest_maze_has_single_lattice_cell() {
        for seed in 0..50 {
            let (grid, start, end) = generate(1, 1, seed, Strategy::Recursive);
            assert_eq!(grid[Point::new(1, 1)], CellState::Path);
            let border = [
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ];
            assert!(border.contains(&start));
            assert!(border.contains(&end));
        }
    }

    #[test]
    fn single_row_of_two_cells_is_connected() {
        let (grid, _, _) = generate(1, 2, 5, Strategy::Recursive);
        assert_eq!(grid[Point::new(1, 1)], CellState::Path);
        assert_eq!(grid[Point::new(1, 2)], CellState::Path);
        assert_eq!(grid[Point::new(1, 3)], CellState::Path);
    }

    #[test]
    fn strategies_produce_identical_mazes() {
        for seed in 0..10 {
            let recursive = generate(9, 14, seed, Strategy::Recursive);
            let iterative = generate(9, 14, seed, Strategy::Iterative);
            assert_eq!(recursive, iterative);
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(
            generate(8, 8, 42, Strategy::Iterative),
            generate(8, 8, 42, Strategy::Iterative)
        );
        assert_ne!(
            generate(8, 8, 42, Strategy::Iterative).0,
            generate(8, 8, 43, Strategy::Iterative).0
        );
    }
}
