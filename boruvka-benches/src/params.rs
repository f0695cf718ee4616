//! Benchmark parameter types.
//!
//! Groups the knobs of a benchmark run into one displayable struct so the
//! criterion benchmark ids stay readable.

use std::fmt;

/// Parameters for an MST benchmark run.
#[derive(Clone, Debug)]
pub struct MstBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: u32,
    /// Worker threads used by the engine (0 = platform default).
    pub workers: usize,
}

impl fmt::Display for MstBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},w={}", self.node_count, self.workers)
    }
}
