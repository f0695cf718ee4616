//! Type definitions for the MST property suite.

/// Weight distribution used when generating a graph fixture.
///
/// Each distribution stresses a different aspect of the engine: identical
/// weights exercise the packed-word tie-breaking, dense graphs exercise the
/// per-round compaction, and chains force the maximum round count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WeightDistribution {
    /// Weights drawn uniformly from a wide range.
    Uniform,
    /// Large groups of edges share a handful of weights.
    ManyIdentical,
    /// Spanning tree plus only a few extra edges.
    Sparse,
    /// Edge probability close to a complete graph.
    Dense,
    /// A path graph with one heavy closing edge.
    Chain,
}

/// A generated connected graph with full context for failure diagnosis.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Number of nodes.
    pub node_count: u32,
    /// One record per undirected edge.
    pub undirected: Vec<(u32, u32, u32)>,
    /// Weight distribution used during generation.
    pub distribution: WeightDistribution,
}

/// Configuration for the determinism property.
pub(super) struct RepetitionConfig {
    /// Number of times to repeat the computation per input.
    pub repetitions: usize,
}

impl RepetitionConfig {
    /// Loads the repetition count from `BORUVKA_MST_PBT_REPS`, defaulting
    /// to 5.
    pub(super) fn load() -> Self {
        let repetitions = std::env::var("BORUVKA_MST_PBT_REPS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(5);
        Self { repetitions }
    }
}
