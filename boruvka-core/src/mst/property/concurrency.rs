//! Property 3: weight stability under concurrency.
//!
//! Runs the engine repeatedly on the same fixture and across worker
//! counts, asserting that the total weight and edge count never change.
//! Component root labels depend on the order concurrent unites land, so
//! under weight ties the physically selected edges may differ between
//! runs; the minimum total weight is the invariant.

use std::num::NonZeroUsize;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::graph::Graph;
use crate::mst::calculate_mst;

use super::types::{GraphFixture, RepetitionConfig};

/// Worker counts exercised by the cross-pool stability check.
const WORKER_COUNTS: &[usize] = &[1, 2, 4, 8];

/// Runs the weight stability property for the given fixture.
pub(super) fn run_weight_stability_property(fixture: &GraphFixture) -> TestCaseResult {
    let config = RepetitionConfig::load();

    let (baseline_weight, baseline_len) = run_once(fixture, None)?;

    for run in 1..config.repetitions {
        let (weight, len) = run_once(fixture, None)?;
        if weight != baseline_weight || len != baseline_len {
            return Err(TestCaseError::fail(format!(
                "run {run}: diverged — baseline weight={baseline_weight} edges={baseline_len}, \
                 run weight={weight} edges={len} (distribution={:?}, nodes={}, edges={})",
                fixture.distribution,
                fixture.node_count,
                fixture.undirected.len(),
            )));
        }
    }

    for &count in WORKER_COUNTS {
        let (weight, len) = run_once(fixture, NonZeroUsize::new(count))?;
        if weight != baseline_weight || len != baseline_len {
            return Err(TestCaseError::fail(format!(
                "workers={count}: diverged — baseline weight={baseline_weight} \
                 edges={baseline_len}, run weight={weight} edges={len} (distribution={:?})",
                fixture.distribution,
            )));
        }
    }

    Ok(())
}

fn run_once(
    fixture: &GraphFixture,
    workers: Option<NonZeroUsize>,
) -> Result<(u64, usize), TestCaseError> {
    let graph = Graph::from_undirected(fixture.node_count, &fixture.undirected)
        .map_err(|e| TestCaseError::fail(format!("graph construction failed: {e}")))?;
    let tree = calculate_mst(graph, workers).map_err(|e| {
        TestCaseError::fail(format!(
            "calculate_mst failed: {e} (distribution={:?}, nodes={}, edges={})",
            fixture.distribution,
            fixture.node_count,
            fixture.undirected.len(),
        ))
    })?;
    Ok((tree.total_weight(), tree.len()))
}
