//! Route representations: the branchable [`Path`] used while searching and
//! the flat [`Route`] handed back to callers.

use std::rc::Rc;

use antpath_core::{Direction, Grid, Point};

#[derive(Debug)]
struct Link {
    dir: Direction,
    prev: Option<Rc<Link>>,
}

/// An append-only sequence of directions with O(1) branching.
///
/// Cloning a `Path` shares the existing prefix; pushing onto a clone never
/// affects the original. Steps are stored newest-first and only laid out in
/// route order by [`to_vec`](Path::to_vec).
#[derive(Debug, Clone, Default)]
pub struct Path {
    head: Option<Rc<Link>>,
    len: usize,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a step.
    pub fn push(&mut self, dir: Direction) {
        let prev = self.head.take();
        self.head = Some(Rc::new(Link { dir, prev }));
        self.len += 1;
    }

    /// A branch of this path extended by one step.
    pub fn extended(&self, dir: Direction) -> Self {
        let mut branch = self.clone();
        branch.push(dir);
        branch
    }

    /// The steps in route order.
    pub fn to_vec(&self) -> Vec<Direction> {
        let mut steps = Vec::with_capacity(self.len);
        let mut cur = self.head.as_deref();
        while let Some(link) = cur {
            steps.push(link.dir);
            cur = link.prev.as_deref();
        }
        steps.reverse();
        steps
    }
}

impl Drop for Path {
    // Unlink iteratively: the default recursive drop overflows the stack on
    // long uniquely-owned chains.
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(link) = cur {
            match Rc::try_unwrap(link) {
                Ok(mut link) => cur = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A finished search result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Unit steps from the start cell to the goal.
    pub steps: Vec<Direction>,
    /// The search was cut short by its iteration budget or deadline, so the
    /// route is the best found so far rather than the best possible.
    pub truncated: bool,
    /// Units of work spent: ant rounds, crude frames or random trials.
    pub work: usize,
}

impl Route {
    pub(crate) fn new(steps: Vec<Direction>, work: usize) -> Self {
        Self {
            steps,
            truncated: false,
            work,
        }
    }

    pub(crate) fn from_path(path: &Path, work: usize) -> Self {
        Self::new(path.to_vec(), work)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Numeric direction codes (`0 = up, 1 = right, 2 = down, 3 = left`).
    pub fn codes(&self) -> Vec<u8> {
        self.steps.iter().map(|d| d.code()).collect()
    }

    /// Every cell visited, starting with `start` itself.
    pub fn points(&self, start: Point) -> Vec<Point> {
        let mut pts = Vec::with_capacity(self.steps.len() + 1);
        let mut p = start;
        pts.push(p);
        for &d in &self.steps {
            p = p.step(d);
            pts.push(p);
        }
        pts
    }

    /// Whether walking the route from `start` stays on free cells of `grid`
    /// and stops on `goal`.
    pub fn is_valid(&self, grid: &Grid, start: Point, goal: Point) -> bool {
        let pts = self.points(start);
        pts.iter().all(|&p| !grid.get(p)) && pts.last() == Some(&goal)
    }
}
