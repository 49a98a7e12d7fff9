//! Randomized decomposition search.
//!
//! Long routes are expensive for [`CrudeSearch`]. Instead of one long
//! search, each trial picks a random waypoint around the midpoint of the two
//! endpoints and solves the two shorter legs exactly; the shortest
//! concatenation over all trials wins.

use std::time::Instant;

use antpath_core::{Grid, Point};
use rand::rngs::ThreadRng;
use rand::{Rng, RngExt};

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::crude::CrudeSearch;
use crate::distance::chebyshev;
use crate::error::SearchError;
use crate::path::Route;
use crate::traits::PathFinder;

/// Best-of-N waypoint searcher built on [`CrudeSearch`].
///
/// The number of trials is the smaller of [`SearchConfig::max_trials`] and
/// the larger coordinate difference between the endpoints. Waypoints already
/// tried are never sampled again within one invocation.
#[derive(Debug, Clone)]
pub struct RandomSearch<R: Rng> {
    rng: R,
    config: SearchConfig,
}

impl RandomSearch<ThreadRng> {
    /// A searcher drawing from the thread-local generator.
    pub fn from_thread_rng(config: SearchConfig) -> Self {
        Self::new(rand::rng(), config)
    }
}

impl<R: Rng> RandomSearch<R> {
    pub fn new(rng: R, config: SearchConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search inside an already validated context.
    pub fn search(&mut self, ctx: &mut SearchContext<'_>) -> Result<Route, SearchError> {
        let (from, to) = (ctx.from(), ctx.to());
        if from == to {
            return Ok(Route::default());
        }
        if let Some(dir) = from.direction_to(to) {
            return Ok(Route::new(vec![dir], 0));
        }

        let span = chebyshev(from, to);
        let trials = self.config.max_trials.min(span);
        let crude = CrudeSearch::new(self.config.clone());

        let mut best: Option<Route> = None;
        let mut attempted = 0;
        let mut timed_out = false;

        for trial in 0..trials {
            if ctx.expired() {
                timed_out = true;
                break;
            }
            attempted += 1;

            let Some(waypoint) = self.sample_waypoint(ctx, span) else {
                log::trace!("random trial {}: no free waypoint", trial);
                continue;
            };
            ctx.claim(waypoint);

            let legs = leg(&crude, ctx.grid(), from, waypoint, ctx.deadline()).and_then(|first| {
                leg(&crude, ctx.grid(), waypoint, to, ctx.deadline()).map(|second| (first, second))
            });
            let (first, second) = match legs {
                Ok(legs) => legs,
                Err(err) => {
                    log::trace!("random trial {} via {}: {}", trial, waypoint, err);
                    continue;
                }
            };

            let len = first.len() + second.len();
            log::trace!("random trial {} via {}: {} steps", trial, waypoint, len);
            if best.as_ref().is_none_or(|b| len < b.len()) {
                let mut steps = first.steps;
                steps.extend(second.steps);
                best = Some(Route {
                    steps,
                    truncated: first.truncated || second.truncated,
                    work: 0,
                });
            }
        }

        match best {
            Some(mut route) => {
                route.work = attempted;
                route.truncated |= timed_out;
                log::debug!(
                    "random: {} -> {} in {} steps after {} trials",
                    from,
                    to,
                    route.len(),
                    attempted
                );
                Ok(route)
            }
            None if timed_out => {
                log::debug!("random: time limit hit after {} trials", attempted);
                Err(SearchError::TimedOut)
            }
            None => {
                log::debug!(
                    "random: no route from {} to {} in {} trials",
                    from,
                    to,
                    attempted
                );
                Err(SearchError::Unreachable { from, to })
            }
        }
    }

    /// Draw a free, unclaimed waypoint near the midpoint of the endpoints,
    /// giving up after `2 * span` draws.
    fn sample_waypoint(&mut self, ctx: &SearchContext<'_>, span: usize) -> Option<Point> {
        let (from, to) = (ctx.from(), ctx.to());
        let mid = Point::new((from.x + to.x) / 2, (from.y + to.y) / 2);
        let span = span as i32;
        let half = span / 2;
        for _ in 0..2 * span {
            let w = mid.shift(
                self.rng.random_range(-half..=span - half),
                self.rng.random_range(-half..=span - half),
            );
            if w != from && ctx.is_open(w) {
                return Some(w);
            }
        }
        None
    }
}

/// Solve one leg with a fresh context, sharing the caller's deadline.
fn leg(
    crude: &CrudeSearch,
    grid: &Grid,
    from: Point,
    to: Point,
    deadline: Option<Instant>,
) -> Result<Route, SearchError> {
    let mut ctx = SearchContext::with_deadline(grid, from, to, deadline)?;
    crude.search(&mut ctx)
}

impl<R: Rng> PathFinder for RandomSearch<R> {
    fn find_path(&mut self, grid: &Grid, from: Point, to: Point) -> Result<Route, SearchError> {
        let mut ctx = SearchContext::new(grid, from, to, &self.config)?;
        self.search(&mut ctx)
    }
}
