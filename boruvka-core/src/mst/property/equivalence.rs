//! Property 1: oracle equivalence.
//!
//! The parallel engine and the sequential Kruskal oracle must agree on the
//! total weight, and a connected fixture must yield exactly `n - 1` edges.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::graph::Graph;
use crate::mst::calculate_mst;

use super::oracle::sequential_kruskal;
use super::types::GraphFixture;

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = Graph::from_undirected(fixture.node_count, &fixture.undirected).map_err(|e| {
        TestCaseError::fail(format!(
            "graph construction failed: {e} (distribution={:?}, nodes={}, edges={})",
            fixture.distribution,
            fixture.node_count,
            fixture.undirected.len(),
        ))
    })?;

    let tree = calculate_mst(graph, None).map_err(|e| {
        TestCaseError::fail(format!(
            "calculate_mst failed: {e} (distribution={:?}, nodes={}, edges={})",
            fixture.distribution,
            fixture.node_count,
            fixture.undirected.len(),
        ))
    })?;

    let oracle = sequential_kruskal(fixture.node_count, &fixture.undirected);

    if oracle.component_count != 1 {
        return Err(TestCaseError::fail(format!(
            "generator produced a disconnected fixture ({} components)",
            oracle.component_count,
        )));
    }

    if tree.len() != (fixture.node_count - 1) as usize {
        return Err(TestCaseError::fail(format!(
            "tree has {} edges, expected n - 1 = {} (distribution={:?})",
            tree.len(),
            fixture.node_count - 1,
            fixture.distribution,
        )));
    }

    if tree.len() != oracle.edge_count {
        return Err(TestCaseError::fail(format!(
            "edge count diverged — engine={}, oracle={} (distribution={:?})",
            tree.len(),
            oracle.edge_count,
            fixture.distribution,
        )));
    }

    if tree.total_weight() != oracle.total_weight {
        return Err(TestCaseError::fail(format!(
            "total weight diverged — engine={}, oracle={} (distribution={:?}, nodes={}, edges={})",
            tree.total_weight(),
            oracle.total_weight,
            fixture.distribution,
            fixture.node_count,
            fixture.undirected.len(),
        )));
    }

    Ok(())
}
