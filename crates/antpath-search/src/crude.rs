//! Bounded exhaustive depth-first search ("crude" strategy).
//!
//! Frames live on an explicit LIFO stack rather than the call stack, so the
//! iteration cap applies uniformly and long routes cannot overflow the
//! thread's stack. Each frame carries its own copy of the branch's trail.
//!
//! Pruning keeps the search tractable:
//!
//! - a frame whose `isqrt(dx² + dy²) + steps` is not below the best route
//!   found so far is dropped (the Euclidean floor never exceeds the true
//!   4-way distance);
//! - a branch that doubles back next to its own trail is dropped;
//! - cul-de-sac cells are recorded in the global overlay the first time any
//!   branch looks at them and are skipped by every later branch.

use antpath_core::{Direction, Grid, Point};

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::distance::euclidean_floor;
use crate::error::SearchError;
use crate::order::preference;
use crate::overlay::Overlay;
use crate::path::{Path, Route};
use crate::traits::PathFinder;

struct Frame {
    pos: Point,
    /// `None` for a frame that has just arrived on the goal.
    dir: Option<Direction>,
    path: Path,
    trail: Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    Budget,
    Deadline,
}

/// Exhaustive searcher bounded by [`SearchConfig::iteration_cap`].
///
/// Returns the shortest route when the search space is exhausted within the
/// cap; otherwise the best route seen so far with
/// [`Route::truncated`] set.
#[derive(Debug, Clone, Default)]
pub struct CrudeSearch {
    config: SearchConfig,
}

impl CrudeSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search inside an already validated context.
    pub fn search(&self, ctx: &mut SearchContext<'_>) -> Result<Route, SearchError> {
        let (from, to) = (ctx.from(), ctx.to());
        if from == to {
            return Ok(Route::default());
        }

        let cap = self.config.iteration_cap;
        let mut bound = self.config.max_distance;
        let mut best: Option<Path> = None;
        let mut frames = 0;
        let mut halt = None;

        let mut stack = Vec::new();
        push_branches(&mut stack, from, to, Path::new(), Overlay::for_grid(ctx.grid()));

        while let Some(frame) = stack.pop() {
            if frames >= cap {
                halt = Some(Halt::Budget);
                break;
            }
            if ctx.expired() {
                halt = Some(Halt::Deadline);
                break;
            }
            frames += 1;

            let Frame {
                pos,
                dir,
                path,
                mut trail,
            } = frame;

            if ctx.is_blocked(pos) || is_circling(ctx.grid(), &trail, pos) {
                continue;
            }
            if pos == to {
                if path.len() < bound {
                    log::trace!("crude: {} step route after {} frames", path.len(), frames);
                    bound = path.len();
                    best = Some(path);
                }
                continue;
            }
            if euclidean_floor(pos, to) + path.len() >= bound {
                continue;
            }
            let Some(dir) = dir else {
                continue;
            };

            trail.mark(pos);
            let next = pos.step(dir);
            if is_dud(ctx, &trail, next) {
                continue;
            }
            let path = path.extended(dir);
            if next == to {
                stack.push(Frame {
                    pos: next,
                    dir: None,
                    path,
                    trail,
                });
            } else {
                push_branches(&mut stack, next, to, path, trail);
            }
        }

        match (best, halt) {
            (Some(path), halt) => {
                if let Some(halt) = halt {
                    log::debug!(
                        "crude: stopped by {:?} after {} frames, returning best so far",
                        halt,
                        frames
                    );
                }
                log::debug!(
                    "crude: {} -> {} in {} steps, {} frames",
                    from,
                    to,
                    path.len(),
                    frames
                );
                let mut route = Route::from_path(&path, frames);
                route.truncated = halt.is_some();
                Ok(route)
            }
            (None, Some(Halt::Budget)) => {
                log::debug!("crude: iteration cap {} reached without a route", cap);
                Err(SearchError::BudgetExhausted { cap })
            }
            (None, Some(Halt::Deadline)) => {
                log::debug!("crude: time limit hit after {} frames", frames);
                Err(SearchError::TimedOut)
            }
            (None, None) => {
                log::debug!("crude: no route from {} to {} ({} frames)", from, to, frames);
                Err(SearchError::Unreachable { from, to })
            }
        }
    }
}

impl PathFinder for CrudeSearch {
    fn find_path(&mut self, grid: &Grid, from: Point, to: Point) -> Result<Route, SearchError> {
        let mut ctx = SearchContext::new(grid, from, to, &self.config)?;
        self.search(&mut ctx)
    }
}

/// Push one frame per direction at `pos`, least preferred first, so the
/// greedy direction is popped next.
fn push_branches(stack: &mut Vec<Frame>, pos: Point, to: Point, path: Path, trail: Overlay) {
    let order = preference(pos, to);
    for &dir in order[1..].iter().rev() {
        stack.push(Frame {
            pos,
            dir: Some(dir),
            path: path.clone(),
            trail: trail.clone(),
        });
    }
    stack.push(Frame {
        pos,
        dir: Some(order[0]),
        path,
        trail,
    });
}

/// Whether `p` cannot extend the branch: an obstacle, already on the trail,
/// or a known dead end.
///
/// A free cell other than the endpoints whose only open neighbour is the
/// one we came from can never be on a route; it is recorded globally so no
/// other branch looks at it again. Since recorded cells no longer count as
/// open, dead corridors are retired one cell at a time.
fn is_dud(ctx: &mut SearchContext<'_>, trail: &Overlay, p: Point) -> bool {
    if ctx.is_blocked(p) || trail.is_marked(p) || ctx.is_claimed(p) {
        return true;
    }
    if p == ctx.to() || p == ctx.from() {
        return false;
    }
    if ctx.open_neighbors(p) <= 1 {
        ctx.claim(p);
        return true;
    }
    false
}

/// Whether the branch at `p` has curled back next to its own trail.
///
/// More than one visited neighbour means the branch touches itself. With a
/// single visited neighbour (the one it came from), a visited cell two steps
/// out in any other open direction means it is walking in a circle.
fn is_circling(grid: &Grid, trail: &Overlay, p: Point) -> bool {
    let mut visited = 0;
    let mut came_from = None;
    for d in Direction::ALL {
        let n = p.step(d);
        if !grid.get(n) && trail.is_marked(n) {
            visited += 1;
            came_from = Some(d);
        }
    }
    if visited > 1 {
        return true;
    }
    Direction::ALL
        .into_iter()
        .filter(|&d| Some(d) != came_from)
        .any(|d| {
            let n = p.step(d);
            let n2 = n.step(d);
            !grid.get(n) && !grid.get(n2) && trail.is_marked(n2)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use Direction::*;

    fn maze() -> Grid {
        "
        .......
        .#####.
        .#...#.
        .#.#.#.
        ...#...
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn finds_the_shortest_route_through_a_maze() {
        let grid = maze();
        let (a, b) = (Point::new(2, 3), Point::new(4, 3));
        let route = CrudeSearch::default().find_path(&grid, a, b).unwrap();
        assert_eq!(route.steps, vec![Up, Right, Right, Down]);
        assert!(!route.truncated);
    }

    #[test]
    fn corner_scenario() {
        let grid = Grid::from_fn(4, 3, |p| (1..=2).contains(&p.x) && (1..=2).contains(&p.y));
        let route = CrudeSearch::default()
            .find_path(&grid, Point::new(0, 0), Point::new(3, 2))
            .unwrap();
        assert_eq!(route.steps, vec![Right, Right, Right, Down, Down]);
    }

    #[test]
    fn dead_corridors_are_recorded_globally() {
        // Column 0 below the top row is a dead end.
        let grid = Grid::from_fn(12, 12, |p| p.x > 0 && p.x < 11 && p.y > 0);
        let (a, b) = (Point::new(0, 0), Point::new(11, 11));
        let mut ctx = SearchContext::new(&grid, a, b, &SearchConfig::default()).unwrap();
        let route = CrudeSearch::default().search(&mut ctx).unwrap();
        let mut expected = vec![Right; 11];
        expected.extend(vec![Down; 11]);
        assert_eq!(route.steps, expected);
        assert!(ctx.is_claimed(Point::new(0, 11)));
        assert!(!ctx.is_claimed(b));
    }

    #[test]
    fn cap_bounds_processed_frames() {
        let grid = Grid::new(10, 10);
        let (a, b) = (Point::new(0, 0), Point::new(9, 9));
        let route = CrudeSearch::new(SearchConfig::default().with_iteration_cap(30))
            .find_path(&grid, a, b)
            .unwrap();
        assert!(route.truncated);
        assert_eq!(route.work, 30);
        assert_eq!(route.len(), 18);
        assert!(route.is_valid(&grid, a, b));
    }

    #[test]
    fn cap_without_candidate_is_budget_exhausted() {
        let grid = Grid::new(30, 30);
        let err = CrudeSearch::new(SearchConfig::default().with_iteration_cap(25))
            .find_path(&grid, Point::new(0, 0), Point::new(29, 29))
            .unwrap_err();
        assert_eq!(err, SearchError::BudgetExhausted { cap: 25 });
    }

    #[test]
    fn max_distance_rejects_long_routes() {
        let grid = Grid::new(8, 1);
        let err = CrudeSearch::new(SearchConfig::default().with_max_distance(5))
            .find_path(&grid, Point::new(0, 0), Point::new(7, 0))
            .unwrap_err();
        assert!(matches!(err, SearchError::Unreachable { .. }));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let grid: Grid = "
            ...#.
            ..#.#
            ...#.
        "
        .parse()
        .unwrap();
        let (a, b) = (Point::new(0, 0), Point::new(3, 1));
        assert_eq!(
            CrudeSearch::default().find_path(&grid, a, b),
            Err(SearchError::Unreachable { from: a, to: b })
        );
    }

    #[test]
    fn trivial_routes() {
        let grid = Grid::new(1, 1);
        let p = Point::ZERO;
        assert!(CrudeSearch::default().find_path(&grid, p, p).unwrap().is_empty());

        let grid = Grid::new(2, 1);
        assert_eq!(
            CrudeSearch::default()
                .find_path(&grid, Point::new(1, 0), Point::new(0, 0))
                .unwrap()
                .steps,
            vec![Left]
        );
    }

    #[test]
    fn zero_time_limit_times_out() {
        let grid = Grid::new(4, 4);
        let cfg = SearchConfig::default().with_time_limit(Duration::ZERO);
        assert_eq!(
            CrudeSearch::new(cfg).find_path(&grid, Point::new(0, 0), Point::new(3, 3)),
            Err(SearchError::TimedOut)
        );
    }

    #[test]
    fn circling_detection() {
        let grid = Grid::new(5, 5);
        let mut trail = Overlay::for_grid(&grid);
        let p = Point::new(2, 2);
        assert!(!is_circling(&grid, &trail, p));

        trail.mark(Point::new(1, 2));
        assert!(!is_circling(&grid, &trail, p));

        // Two steps up is on the trail.
        trail.mark(Point::new(2, 0));
        assert!(is_circling(&grid, &trail, p));

        let mut trail = Overlay::for_grid(&grid);
        trail.mark(Point::new(1, 2));
        trail.mark(Point::new(3, 2));
        assert!(is_circling(&grid, &trail, p));
    }
}
