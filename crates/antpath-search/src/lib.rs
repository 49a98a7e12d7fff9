//! Route searches on obstacle grids.
//!
//! Three interchangeable strategies find a route between two cells of an
//! [`antpath_core::Grid`] and return it as unit [`Direction`] steps:
//!
//! - **Ant** ([`AntSearch`]) — greedy walkers that queue side branches at
//!   every step and fall back to them when blocked. Cheap, not optimal.
//! - **Crude** ([`CrudeSearch`]) — explicit-stack depth-first search with
//!   branch-and-bound pruning, bounded by an iteration cap.
//! - **Random** ([`RandomSearch`]) — best of several random waypoint
//!   decompositions, each leg solved by the crude search.
//!
//! Every strategy validates its inputs through [`SearchContext`], which also
//! owns the per-invocation global overlay. Searchers keep no state between
//! calls besides their configuration (and the random generator).
//!
//! Display layers that only need the steps can call [`find_path`]; richer
//! callers use the [`PathFinder`] trait to get a [`Route`] or a
//! [`SearchError`].

mod ant;
mod config;
mod context;
mod crude;
mod distance;
mod error;
mod order;
mod overlay;
mod path;
mod random;
mod traits;

use std::fmt;
use std::str::FromStr;

use antpath_core::{Direction, Grid, Point};

pub use ant::AntSearch;
pub use config::SearchConfig;
pub use context::SearchContext;
pub use crude::CrudeSearch;
pub use distance::{chebyshev, euclidean_floor, manhattan};
pub use error::{SearchError, UnknownStrategy};
pub use order::preference;
pub use overlay::Overlay;
pub use path::{Path, Route};
pub use random::RandomSearch;
pub use traits::PathFinder;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    #[default]
    Ant,
    Crude,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Ant, Strategy::Crude, Strategy::Random];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Ant => "ant",
            Strategy::Crude => "crude",
            Strategy::Random => "random",
        }
    }

    /// Run this strategy once. The random strategy draws from the
    /// thread-local generator.
    pub fn search(
        self,
        grid: &Grid,
        from: Point,
        to: Point,
        config: &SearchConfig,
    ) -> Result<Route, SearchError> {
        match self {
            Strategy::Ant => AntSearch::new(config.clone()).find_path(grid, from, to),
            Strategy::Crude => CrudeSearch::new(config.clone()).find_path(grid, from, to),
            Strategy::Random => {
                RandomSearch::from_thread_rng(config.clone()).find_path(grid, from, to)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Find a route with default settings.
///
/// Returns the steps (empty when `from == to`) or `None` when the grid is
/// degenerate, an endpoint is blocked, or no route was found.
pub fn find_path(
    strategy: Strategy,
    grid: &Grid,
    from: Point,
    to: Point,
) -> Option<Vec<Direction>> {
    match strategy.search(grid, from, to, &SearchConfig::default()) {
        Ok(route) => Some(route.steps),
        Err(err) => {
            log::debug!("{} search from {} to {} failed: {}", strategy, from, to, err);
            None
        }
    }
}
