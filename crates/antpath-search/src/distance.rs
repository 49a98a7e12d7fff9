use antpath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> usize {
    ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()) as usize
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> usize {
    (a.x - b.x).unsigned_abs().max((a.y - b.y).unsigned_abs()) as usize
}

/// Euclidean distance rounded down. Never exceeds [`manhattan`], so it is an
/// admissible lower bound for 4-way unit-cost moves.
#[inline]
pub fn euclidean_floor(a: Point, b: Point) -> usize {
    let dx = (a.x - b.x).unsigned_abs() as u64;
    let dy = (a.y - b.y).unsigned_abs() as u64;
    (dx * dx + dy * dy).isqrt() as usize
}
