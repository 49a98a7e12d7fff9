use std::time::Duration;

/// Tuning knobs shared by the search strategies.
///
/// Each strategy reads only the fields that concern it; the defaults
/// reproduce the classic behaviour of every strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Ant search: how many branches walk at once. Values below 1 act as 1.
    pub ant_capacity: usize,
    /// Crude search: frames processed before giving up with the best route
    /// found so far.
    pub iteration_cap: usize,
    /// Crude search: routes this long or longer are never accepted.
    pub max_distance: usize,
    /// Random search: upper bound on decomposition trials.
    pub max_trials: usize,
    /// Wall-clock budget for one top-level invocation.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ant_capacity: 1,
            iteration_cap: 10_000,
            max_distance: 30_000,
            max_trials: 100,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_ant_capacity(mut self, n: usize) -> Self {
        self.ant_capacity = n;
        self
    }

    pub fn with_iteration_cap(mut self, n: usize) -> Self {
        self.iteration_cap = n;
        self
    }

    pub fn with_max_distance(mut self, n: usize) -> Self {
        self.max_distance = n;
        self
    }

    pub fn with_max_trials(mut self, n: usize) -> Self {
        self.max_trials = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
