//! Cell storage of the maze

use std::ops::{Index, IndexMut};

use crate::MazeError;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Wall,
    Path,
    Start,
    End,
    /// Lattice cell not yet reached by the carver
    Unassigned,
    /// Explored by the solver, not on the final path
    Visited,
    /// Confirmed part of the start to end path
    Solution,
}

impl CellState {
    /// Whether a walker may stand on a cell in this state
    pub fn is_traversable(self) -> bool {
        !matches!(self, CellState::Wall | CellState::Unassigned)
    }
}

/// Location in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Lattice cells sit on odd rows and odd columns
    pub fn is_lattice(self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }
}

/// Rectangular matrix of cell states, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocate a grid of `rows` x `cols` actual cells.
    ///
    /// Even rows and columns become walls, odd/odd cells are left
    /// [CellState::Unassigned] for the carver. Both dimensions must be
    /// odd and at least 3.
    pub fn initialize(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows < 3 || cols < 3 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| {
                    if row % 2 == 0 || col % 2 == 0 {
                        CellState::Wall
                    } else {
                        CellState::Unassigned
                    }
                })
            })
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Allocate a grid for `path_rows` x `path_cols` lattice cells.
    ///
    /// Each path dimension `p` expands to `2p + 1` actual cells. Zero is
    /// rejected before anything is allocated.
    pub fn from_path_dimensions(path_rows: usize, path_cols: usize) -> Result<Self, MazeError> {
        if path_rows == 0 || path_cols == 0 {
            return Err(MazeError::InvalidDimension {
                rows: path_rows,
                cols: path_cols,
            });
        }
        let rows = path_rows
            .checked_mul(2)
            .and_then(|r| r.checked_add(1))
            .ok_or(MazeError::InvalidDimension {
                rows: path_rows,
                cols: path_cols,
            })?;
        let cols = path_cols
            .checked_mul(2)
            .and_then(|c| c.checked_add(1))
            .ok_or(MazeError::InvalidDimension {
                rows: path_rows,
                cols: path_cols,
            })?;
        Self::initialize(rows, cols)
    }

    /// Build a grid from already validated rows of cells
    pub(crate) fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, MazeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows < 3 || n_cols < 3 {
            return Err(MazeError::InvalidDimension {
                rows: n_rows,
                cols: n_cols,
            });
        }
        if let Some(row) = rows.iter().position(|r| r.len() != n_cols) {
            return Err(MazeError::Parse(format!(
                "row {} has {} cells, expected {}",
                row,
                rows[row].len(),
                n_cols
            )));
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked read
    pub fn get(&self, point: Point) -> Option<CellState> {
        self.index_of(point).map(|i| self.cells[i])
    }

    /// Bounds-checked write; returns false when `point` is outside the grid
    pub fn set(&mut self, point: Point, state: CellState) -> bool {
        match self.index_of(point) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Overwrite a cell with a start or end marker
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not a marker or `point` lies outside the grid.
    pub fn place_marker(&mut self, point: Point, kind: CellState) {
        assert!(
            matches!(kind, CellState::Start | CellState::End),
            "{:?} is not a marker",
            kind
        );
        self[point] = kind;
    }

    /// Point at `(row + d_row, col + d_col)`, if it lies inside the grid
    pub fn offset(&self, point: Point, d_row: isize, d_col: isize) -> Option<Point> {
        let row = point.row.checked_add_signed(d_row)?;
        let col = point.col.checked_add_signed(d_col)?;
        (row < self.rows && col < self.cols).then_some(Point { row, col })
    }

    /// Number of cells in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// All points in `state`, row-major order
    pub fn points_with(&self, state: CellState) -> Vec<Point> {
        self.points().filter(|&p| self[p] == state).collect()
    }

    /// Every point of the grid, row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Point { row, col }))
    }

    /// Cells of a single row
    ///
    /// # Panics
    ///
    /// Panics if `row` is not less than [Self::rows].
    pub fn row(&self, row: usize) -> &[CellState] {
        assert!(
            row < self.rows,
            "row {} out of bounds for {} rows",
            row,
            self.rows
        );
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        (point.row < self.rows && point.col < self.cols).then(|| point.row * self.cols + point.col)
    }

    fn checked_index(&self, point: Point) -> usize {
        match self.index_of(point) {
            Some(i) => i,
            None => panic!(
                "{:?} out of bounds for {}x{} grid",
                point, self.rows, self.cols
            ),
        }
    }
}

impl Index<Point> for Grid {
    type Output = CellState;

    fn index(&self, point: Point) -> &Self::Output {
        &self.cells[self.checked_index(point)]
    }
}

impl IndexMut<Point> for Grid {
    fn index_mut(&mut self, point: Point) -> &mut Self::Output {
        let i = self.checked_index(point);
        &mut self.cells[i]
    }
}
