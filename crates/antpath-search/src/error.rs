use antpath_core::Point;
use thiserror::Error;

/// Why a search produced no route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The grid has no cells.
    #[error("grid is degenerate ({width}x{height})")]
    DegenerateGrid { width: i32, height: i32 },

    /// The start cell is an obstacle or outside the grid.
    #[error("start {0} is blocked")]
    StartBlocked(Point),

    /// The goal cell is an obstacle or outside the grid.
    #[error("goal {0} is blocked")]
    GoalBlocked(Point),

    /// Every branch died without reaching the goal.
    #[error("no route from {from} to {to}")]
    Unreachable { from: Point, to: Point },

    /// The iteration cap was hit before any route was found.
    #[error("iteration cap of {cap} frames reached without a route")]
    BudgetExhausted { cap: usize },

    /// The time limit expired before any route was found.
    #[error("time limit reached without a route")]
    TimedOut,
}

/// A strategy name that [`Strategy`](crate::Strategy) does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?}, expected ant, crude or random")]
pub struct UnknownStrategy(pub String);

impl SearchError {
    /// Whether the inputs were rejected before any search work was done.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SearchError::DegenerateGrid { .. }
                | SearchError::StartBlocked(_)
                | SearchError::GoalBlocked(_)
        )
    }
}
