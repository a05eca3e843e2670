//! Depth-first solution search over a carved maze

use std::collections::HashSet;

use log::debug;

use crate::grid::{CellState, Grid, Point};
use crate::{MazeError, Strategy};

/// Orthogonal single-step moves: up, down, left, right
const STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Find the path from `start` to `end` and mark it [CellState::Solution].
///
/// Returns the marked cells in walking order, from the neighbour of `start`
/// to the neighbour of the end marker. Explored cells off the path are left
/// [CellState::Visited]. `end` is only used to report a disconnected maze;
/// the search stops at whichever [CellState::End] cell it meets first.
pub fn solve(
    grid: &mut Grid,
    start: Point,
    end: Point,
    strategy: Strategy,
) -> Result<Vec<Point>, MazeError> {
    let trail = match strategy {
        Strategy::Recursive => solve_recursive(grid, start),
        Strategy::Iterative => solve_iterative(grid, start),
    };
    match trail {
        Some(trail) => {
            debug!(
                "Solved: {} solution cells, {} dead-end cells",
                trail.len(),
                grid.count(CellState::Visited)
            );
            Ok(trail)
        }
        None => Err(MazeError::DisconnectedMaze { start, end }),
    }
}

/// Recursive search; returns the solution trail when `End` is reachable
/// from `start`
pub fn solve_recursive(grid: &mut Grid, start: Point) -> Option<Vec<Point>> {
    let mut trail = Vec::new();
    if search(grid, start, &mut trail) {
        trail.reverse();
        Some(trail)
    } else {
        None
    }
}

/// Depth-first step from `active`; the trail is pushed end first while
/// unwinding
fn search(grid: &mut Grid, active: Point, trail: &mut Vec<Point>) -> bool {
    for (dr, dc) in STEPS {
        let Some(next) = grid.offset(active, dr, dc) else {
            continue;
        };
        match grid[next] {
            CellState::End => return true,
            CellState::Path => {
                grid[next] = CellState::Visited;
                if search(grid, next, trail) {
                    grid[next] = CellState::Solution;
                    trail.push(next);
                    return true;
                }
            }
            _ => (),
        }
    }
    false
}

/// Search frame: a cell and the next step index to try from it
struct Frame {
    point: Point,
    next_step: usize,
}

/// Explicit-stack search, visiting cells in the same order as
/// [solve_recursive].
pub fn solve_iterative(grid: &mut Grid, start: Point) -> Option<Vec<Point>> {
    let mut stack = vec![Frame {
        point: start,
        next_step: 0,
    }];
    while let Some(frame) = stack.last_mut() {
        let Some(&(dr, dc)) = STEPS.get(frame.next_step) else {
            stack.pop();
            continue;
        };
        frame.next_step += 1;
        let Some(next) = grid.offset(frame.point, dr, dc) else {
            continue;
        };
        match grid[next] {
            CellState::End => {
                // Every frame above the start lies on the path
                let trail: Vec<Point> = stack[1..].iter().map(|f| f.point).collect();
                for &p in &trail {
                    grid[p] = CellState::Solution;
                }
                return Some(trail);
            }
            CellState::Path => {
                grid[next] = CellState::Visited;
                stack.push(Frame {
                    point: next,
                    next_step: 0,
                });
            }
            _ => (),
        }
    }
    None
}

/// Ordered solution trail, from the neighbour of `start` to the neighbour
/// of the end marker, recovered from the grid alone.
///
/// Exact for perfect mazes. On grids with loops the marked cells may touch
/// each other off the trail; each cell is then taken at most once, so the
/// walk ends but may stop short. Empty when the grid carries no solution.
pub fn trace_solution(grid: &Grid, start: Point) -> Vec<Point> {
    let mut trail = Vec::new();
    let mut seen = HashSet::from([start]);
    let mut current = start;
    while let Some(next) = STEPS.iter().find_map(|&(dr, dc)| {
        grid.offset(current, dr, dc)
            .filter(|&p| grid[p] == CellState::Solution && !seen.contains(&p))
    }) {
        seen.insert(next);
        trail.push(next);
        current = next;
    }
    trail
}
