//! Benchmark Planner
//!
//! Builds the execution plan by filtering the algorithm registry.
//!
//! Ordering: algorithms keep registry order, which is also the series order
//! in every report.

use regex::Regex;
use sortbench_core::AlgorithmEntry;

/// Execution plan for a run
pub struct ExecutionPlan {
    /// Algorithms to measure, in registry order
    pub algorithms: Vec<&'static AlgorithmEntry>,
}

impl ExecutionPlan {
    /// Names of the planned algorithms
    pub fn names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name).collect()
    }
}

/// Build execution plan from the registry
///
/// `filter` is matched against algorithm names; `None` keeps everything.
pub fn build_plan(
    algorithms: impl IntoIterator<Item = &'static AlgorithmEntry>,
    filter: Option<&Regex>,
) -> ExecutionPlan {
    let algorithms = algorithms
        .into_iter()
        .filter(|a| filter.map_or(true, |re| re.is_match(a.name)))
        .collect();

    ExecutionPlan { algorithms }
}
