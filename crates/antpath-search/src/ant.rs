//! Greedy backtracking search ("ant" strategy).
//!
//! A small population of ants walks greedily toward the goal. Whenever an
//! ant moves, it first leaves behind forks heading in each of its other
//! directions; forks that could take their first step are queued and only
//! become active once an ant dies at a blockage. Every cell is claimed in
//! the global overlay the moment any ant enters it, so the search never
//! revisits a cell and always terminates.

use std::collections::VecDeque;

use antpath_core::{Direction, Grid, Point};

use crate::config::SearchConfig;
use crate::context::SearchContext;
use crate::error::SearchError;
use crate::order::preference;
use crate::path::{Path, Route};
use crate::traits::PathFinder;

/// One walking branch. Owns its route so far; grid state lives in the
/// [`SearchContext`] it is stepped against.
#[derive(Debug, Clone)]
struct Ant {
    pos: Point,
    dir: Direction,
    path: Path,
}

impl Ant {
    fn new(pos: Point, dir: Direction) -> Self {
        Self {
            pos,
            dir,
            path: Path::new(),
        }
    }

    fn fork(&self, dir: Direction) -> Self {
        Self {
            pos: self.pos,
            dir,
            path: self.path.clone(),
        }
    }

    /// Step once in the current direction, claiming the new cell.
    fn advance(&mut self, ctx: &mut SearchContext<'_>) -> bool {
        let next = self.pos.step(self.dir);
        if !ctx.is_open(next) {
            return false;
        }
        ctx.claim(next);
        self.pos = next;
        self.path.push(self.dir);
        true
    }
}

/// Greedy backtracking searcher. Fast and memory-bounded, but the route is
/// not guaranteed to be the shortest.
#[derive(Debug, Clone, Default)]
pub struct AntSearch {
    config: SearchConfig,
}

impl AntSearch {
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

        let capacity = self.config.ant_capacity.max(1);
        ctx.claim(from);

        let mut ants = Vec::with_capacity(capacity);
        let mut babies: VecDeque<Ant> = VecDeque::new();
        ants.push(Ant::new(from, preference(from, to)[0]));
        let mut rounds = 0;

        loop {
            while ants.len() < capacity {
                match babies.pop_front() {
                    Some(baby) => ants.push(baby),
                    None => break,
                }
            }
            if ants.is_empty() {
                log::debug!(
                    "ant: no route from {} to {} after {} rounds ({} cells claimed)",
                    from,
                    to,
                    rounds,
                    ctx.global().count()
                );
                return Err(SearchError::Unreachable { from, to });
            }
            if ctx.expired() {
                log::debug!("ant: time limit hit after {} rounds", rounds);
                return Err(SearchError::TimedOut);
            }
            rounds += 1;
            log::trace!(
                "ant round {}: {} active, {} queued",
                rounds,
                ants.len(),
                babies.len()
            );

            let mut i = 0;
            while i < ants.len() {
                let order = preference(ants[i].pos, to);
                ants[i].dir = order[0];

                for &dir in &order[1..] {
                    let mut baby = ants[i].fork(dir);
                    if baby.advance(ctx) {
                        if baby.pos == to {
                            return Ok(Self::arrive(&baby, rounds));
                        }
                        babies.push_back(baby);
                    }
                }

                if ants[i].advance(ctx) {
                    if ants[i].pos == to {
                        return Ok(Self::arrive(&ants[i], rounds));
                    }
                    i += 1;
                } else {
                    ants.remove(i);
                }
            }
        }
    }

    fn arrive(ant: &Ant, rounds: usize) -> Route {
        log::debug!(
            "ant: reached {} in {} rounds, {} steps",
            ant.pos,
            rounds,
            ant.path.len()
        );
        Route::from_path(&ant.path, rounds)
    }
}

impl PathFinder for AntSearch {
    fn find_path(&mut self, grid: &Grid, from: Point, to: Point) -> Result<Route, SearchError> {
        let mut ctx = SearchContext::new(grid, from, to, &self.config)?;
        self.search(&mut ctx)
    }
}
