use antpath_core::{Grid, Point};

/// Visited marks laid over an obstacle grid.
///
/// Used both as a branch-local trail (cloned whenever a branch forks) and as
/// the per-invocation global map of cells no branch may use again. Points
/// outside the grid read as marked.
#[derive(Debug, Clone)]
pub struct Overlay {
    marks: Grid,
}

impl Overlay {
    /// An unmarked overlay the size of `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            marks: Grid::new(grid.width(), grid.height()),
        }
    }

    #[inline]
    pub fn is_marked(&self, p: Point) -> bool {
        self.marks.get(p)
    }

    /// Mark `p`. Returns `false` if it was already marked or lies outside
    /// the grid, so each cell is claimed at most once.
    #[inline]
    pub fn mark(&mut self, p: Point) -> bool {
        if self.marks.get(p) {
            return false;
        }
        self.marks.set(p, true);
        true
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.marks.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_are_write_once() {
        let mut o = Overlay::for_grid(&Grid::new(3, 3));
        let p = Point::new(1, 2);
        assert!(!o.is_marked(p));
        assert!(o.mark(p));
        assert!(!o.mark(p));
        assert!(o.is_marked(p));
        assert_eq!(o.count(), 1);
    }

    #[test]
    fn outside_reads_marked() {
        let mut o = Overlay::for_grid(&Grid::new(2, 2));
        assert!(o.is_marked(Point::new(-1, 0)));
        assert!(!o.mark(Point::new(5, 5)));
        assert_eq!(o.count(), 0);
    }

    #[test]
    fn clones_fork_independently() {
        let mut trail = Overlay::for_grid(&Grid::new(4, 4));
        trail.mark(Point::new(0, 0));
        let mut fork = trail.clone();
        fork.mark(Point::new(1, 0));
        assert!(!trail.is_marked(Point::new(1, 0)));
        assert!(fork.is_marked(Point::new(0, 0)));
    }
}
