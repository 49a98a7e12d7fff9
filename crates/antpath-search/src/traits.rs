use antpath_core::{Grid, Point};

use crate::error::SearchError;
use crate::path::Route;

/// A route search strategy.
pub trait PathFinder {
    /// Find a route from `from` to `to` on `grid`.
    ///
    /// Implementations validate the inputs through
    /// [`SearchContext`](crate::SearchContext) before doing any work and
    /// return an empty route when `from == to`.
    fn find_path(&mut self, grid: &Grid, from: Point, to: Point) -> Result<Route, SearchError>;
}
