//! Maze identification. Routing itself is delegated to a [`MazeRouter`].

use anyhow::Result;

use crate::core::error::{SolveError, SolveResult};
use crate::core::types::Cell;

pub const MAZE_SIZE: u8 = 6;

/// Circle marker (column, row) -> maze identifier. Every maze has two markers.
const CIRCLES: [((u8, u8), u8); 18] = [
    ((1, 2), 0),
    ((6, 3), 0),
    ((2, 4), 1),
    ((5, 2), 1),
    ((4, 4), 2),
    ((6, 4), 2),
    ((1, 1), 3),
    ((1, 4), 3),
    ((5, 3), 4),
    ((4, 6), 4),
    ((5, 1), 5),
    ((3, 5), 5),
    ((2, 1), 6),
    ((2, 6), 6),
    ((4, 1), 7),
    ((3, 4), 7),
    ((3, 2), 8),
    ((1, 5), 8),
];

/// Identify the maze from one of its circle markers.
pub fn maze_for_circle(circle: Cell) -> SolveResult<u8> {
    CIRCLES
        .iter()
        .find(|(marker, _)| *marker == (circle.x, circle.y))
        .map(|(_, maze)| *maze)
        .ok_or_else(|| SolveError::malformed("a known maze circle", format!("circle {circle}")))
}

/// Build a cell, checking both coordinates are on the board.
pub fn cell(x: u8, y: u8) -> SolveResult<Cell> {
    if !(1..=MAZE_SIZE).contains(&x) || !(1..=MAZE_SIZE).contains(&y) {
        return Err(SolveError::malformed(
            format!("coordinates 1-{MAZE_SIZE}"),
            format!("({x}, {y})"),
        ));
    }
    Ok(Cell { x, y })
}

/// A route through a maze, as produced by a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRoute {
    /// Moves in order, e.g. `up`, `right`.
    pub moves: Vec<String>,
    /// Printable rendering of the maze with the route drawn in.
    pub grid: String,
}

/// Pathfinding over the published mazes.
pub trait MazeRouter {
    fn find_path(&self, maze: u8, start: Cell, end: Cell) -> Result<MazeRoute>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_markers_identify_the_same_maze() {
        assert_eq!(maze_for_circle(Cell { x: 1, y: 2 }), Ok(0));
        assert_eq!(maze_for_circle(Cell { x: 6, y: 3 }), Ok(0));
        assert_eq!(maze_for_circle(Cell { x: 3, y: 2 }), Ok(8));
        assert_eq!(maze_for_circle(Cell { x: 1, y: 5 }), Ok(8));
    }

    #[test]
    fn every_maze_has_exactly_two_markers() {
        for maze in 0..9u8 {
            let markers = CIRCLES.iter().filter(|(_, id)| *id == maze).count();
            assert_eq!(markers, 2, "maze {maze}");
        }
    }

    #[test]
    fn unknown_marker_is_malformed() {
        let err = maze_for_circle(Cell { x: 6, y: 6 }).expect_err("not a marker");
        assert!(matches!(err, SolveError::MalformedInput { .. }));
    }

    #[test]
    fn cell_bounds() {
        assert_eq!(cell(1, 6), Ok(Cell { x: 1, y: 6 }));
        assert!(cell(0, 3).is_err());
        assert!(cell(3, 7).is_err());
    }
}
