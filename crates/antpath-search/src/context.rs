use std::time::Instant;

use antpath_core::{Grid, Point};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::overlay::Overlay;

/// Per-invocation state shared by every branch of one search.
///
/// Owns the global [`Overlay`] and borrows the obstacle grid read-only, so
/// two invocations never observe each other's marks.
#[derive(Debug)]
pub struct SearchContext<'g> {
    grid: &'g Grid,
    from: Point,
    to: Point,
    global: Overlay,
    deadline: Option<Instant>,
}

impl<'g> SearchContext<'g> {
    /// Validate the inputs and set up a fresh context.
    ///
    /// Fails when the grid has no cells or when either endpoint is an
    /// obstacle (points outside the grid count as obstacles).
    pub fn new(
        grid: &'g Grid,
        from: Point,
        to: Point,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let deadline = config.time_limit.map(|limit| Instant::now() + limit);
        Self::with_deadline(grid, from, to, deadline)
    }

    pub(crate) fn with_deadline(
        grid: &'g Grid,
        from: Point,
        to: Point,
        deadline: Option<Instant>,
    ) -> Result<Self, SearchError> {
        if grid.is_empty() {
            return Err(SearchError::DegenerateGrid {
                width: grid.width(),
                height: grid.height(),
            });
        }
        if grid.get(from) {
            return Err(SearchError::StartBlocked(from));
        }
        if grid.get(to) {
            return Err(SearchError::GoalBlocked(to));
        }
        Ok(Self {
            grid,
            from,
            to,
            global: Overlay::for_grid(grid),
            deadline,
        })
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether `p` is an obstacle.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.grid.get(p)
    }

    /// Whether `p` is neither an obstacle nor globally claimed.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        !self.grid.get(p) && !self.global.is_marked(p)
    }

    /// Number of cardinal neighbours of `p` that are open.
    pub fn open_neighbors(&self, p: Point) -> usize {
        p.neighbors_4().into_iter().filter(|&n| self.is_open(n)).count()
    }

    /// Whether `p` has been claimed in the global overlay.
    #[inline]
    pub fn is_claimed(&self, p: Point) -> bool {
        self.global.is_marked(p)
    }

    /// Claim `p` in the global overlay. Returns `false` if it was taken.
    #[inline]
    pub fn claim(&mut self, p: Point) -> bool {
        self.global.mark(p)
    }

    pub fn global(&self) -> &Overlay {
        &self.global
    }

    /// Whether the time limit, if any, has passed.
    #[inline]
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rejects_degenerate_grid() {
        let grid = Grid::new(0, 4);
        let err = SearchContext::new(&grid, Point::ZERO, Point::ZERO, &SearchConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::DegenerateGrid {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn rejects_blocked_endpoints() {
        let grid: Grid = ".#\n..".parse().unwrap();
        let cfg = SearchConfig::default();
        let blocked = Point::new(1, 0);
        assert_eq!(
            SearchContext::new(&grid, blocked, Point::ZERO, &cfg).unwrap_err(),
            SearchError::StartBlocked(blocked)
        );
        assert_eq!(
            SearchContext::new(&grid, Point::ZERO, blocked, &cfg).unwrap_err(),
            SearchError::GoalBlocked(blocked)
        );
        let outside = Point::new(9, 9);
        assert_eq!(
            SearchContext::new(&grid, Point::ZERO, outside, &cfg).unwrap_err(),
            SearchError::GoalBlocked(outside)
        );
    }

    #[test]
    fn claims_are_exclusive() {
        let grid = Grid::new(3, 3);
        let mut ctx =
            SearchContext::new(&grid, Point::ZERO, Point::new(2, 2), &SearchConfig::default())
                .unwrap();
        let p = Point::new(1, 1);
        assert!(ctx.is_open(p));
        assert!(ctx.claim(p));
        assert!(!ctx.is_open(p));
        assert!(!ctx.claim(p));
        assert!(ctx.is_claimed(p));
        assert_eq!(ctx.global().count(), 1);
    }

    #[test]
    fn claimed_neighbours_are_not_open() {
        let grid: Grid = "...\n.#.\n...".parse().unwrap();
        let mut ctx =
            SearchContext::new(&grid, Point::ZERO, Point::new(2, 2), &SearchConfig::default())
                .unwrap();
        assert_eq!(ctx.open_neighbors(Point::new(0, 0)), 2);
        assert_eq!(ctx.open_neighbors(Point::new(1, 1)), 4);
        ctx.claim(Point::new(1, 0));
        assert_eq!(ctx.open_neighbors(Point::new(0, 0)), 1);
        assert_eq!(ctx.open_neighbors(Point::new(2, 0)), 1);
    }

    #[test]
    fn deadline_follows_time_limit() {
        let grid = Grid::new(2, 2);
        let ctx = SearchContext::new(&grid, Point::ZERO, Point::ZERO, &SearchConfig::default())
            .unwrap();
        assert!(ctx.deadline().is_none());
        assert!(!ctx.expired());

        let cfg = SearchConfig::default().with_time_limit(Duration::ZERO);
        let ctx = SearchContext::new(&grid, Point::ZERO, Point::ZERO, &cfg).unwrap();
        assert!(ctx.expired());
    }
}
