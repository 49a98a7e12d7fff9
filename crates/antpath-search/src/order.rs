//! Direction ranking toward a target.

use antpath_core::{Direction, Point};

/// Rank the four directions for a branch at `from` heading to `to`.
///
/// The dominant axis is the one with the larger remaining distance, ties
/// going to the vertical axis. The result is `[toward, away]` on the
/// dominant axis followed by `[toward, away]` on the other one, so index 0
/// is the greedy move. On an axis with no remaining distance, up and left
/// count as "toward".
pub fn preference(from: Point, to: Point) -> [Direction; 4] {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let horizontal = if dx > 0 {
        (Direction::Right, Direction::Left)
    } else {
        (Direction::Left, Direction::Right)
    };
    let vertical = if dy > 0 {
        (Direction::Down, Direction::Up)
    } else {
        (Direction::Up, Direction::Down)
    };
    let (major, minor) = if dx.abs() > dy.abs() {
        (horizontal, vertical)
    } else {
        (vertical, horizontal)
    };
    [major.0, major.1, minor.0, minor.1]
}
