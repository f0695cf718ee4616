//! Property 2: structural invariant verification.
//!
//! For any tree produced by the engine, verifies:
//!
//! - **Acyclicity** — union-find over the output accepts every edge.
//! - **Spanning** — the output connects all nodes into one component.
//! - **Membership** — every output edge exists in the input multiset.
//! - **Uniqueness** — no undirected pair appears twice.
//! - **Bounds** — all endpoints are valid node ids.

use std::collections::{BTreeSet, HashSet};

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::graph::{Edge, Graph};
use crate::mst::calculate_mst;

use super::helpers::{canonical, find_root};
use super::types::GraphFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = Graph::from_undirected(fixture.node_count, &fixture.undirected).map_err(|e| {
        TestCaseError::fail(format!("graph construction failed: {e}"))
    })?;
    let tree = calculate_mst(graph, None).map_err(|e| {
        TestCaseError::fail(format!(
            "calculate_mst failed: {e} (distribution={:?}, nodes={}, edges={})",
            fixture.distribution,
            fixture.node_count,
            fixture.undirected.len(),
        ))
    })?;

    validate_bounds(fixture.node_count, tree.edges())?;
    validate_membership(fixture, tree.edges())?;
    validate_uniqueness(tree.edges())?;
    validate_spanning_acyclic(fixture.node_count, tree.edges())?;

    Ok(())
}

/// Verifies that every endpoint is a valid node id and no edge is a
/// self-loop.
fn validate_bounds(node_count: u32, edges: &[Edge]) -> TestCaseResult {
    for (i, edge) in edges.iter().enumerate() {
        if edge.from() >= node_count || edge.to() >= node_count {
            return Err(TestCaseError::fail(format!(
                "edge {i}: ({}, {}) out of range for {node_count} nodes",
                edge.from(),
                edge.to(),
            )));
        }
        if edge.from() == edge.to() {
            return Err(TestCaseError::fail(format!(
                "edge {i}: self-loop on node {}",
                edge.from(),
            )));
        }
    }
    Ok(())
}

/// Verifies that every output edge is one of the input edges (in either
/// orientation, with the same weight).
fn validate_membership(fixture: &GraphFixture, edges: &[Edge]) -> TestCaseResult {
    let input: HashSet<(u32, u32, u32)> = fixture
        .undirected
        .iter()
        .map(|&(a, b, w)| {
            let (a, b) = canonical(a, b);
            (a, b, w)
        })
        .collect();

    for (i, edge) in edges.iter().enumerate() {
        let (a, b) = canonical(edge.from(), edge.to());
        if !input.contains(&(a, b, edge.weight())) {
            return Err(TestCaseError::fail(format!(
                "edge {i}: ({a}, {b}, {}) is not an input edge",
                edge.weight(),
            )));
        }
    }
    Ok(())
}

/// Verifies that no undirected pair is selected twice.
fn validate_uniqueness(edges: &[Edge]) -> TestCaseResult {
    let mut seen = BTreeSet::new();
    for (i, edge) in edges.iter().enumerate() {
        if !seen.insert(canonical(edge.from(), edge.to())) {
            return Err(TestCaseError::fail(format!(
                "edge {i}: pair ({}, {}) selected twice",
                edge.from(),
                edge.to(),
            )));
        }
    }
    Ok(())
}

/// Verifies acyclicity and spanning in one union-find pass: every edge
/// must merge two distinct sets, and exactly one set must remain.
fn validate_spanning_acyclic(node_count: u32, edges: &[Edge]) -> TestCaseResult {
    let mut parent: Vec<u32> = (0..node_count).collect();
    for (i, edge) in edges.iter().enumerate() {
        let root_a = find_root(&mut parent, edge.from());
        let root_b = find_root(&mut parent, edge.to());
        if root_a == root_b {
            return Err(TestCaseError::fail(format!(
                "edge {i}: ({}, {}) creates a cycle",
                edge.from(),
                edge.to(),
            )));
        }
        parent[root_b as usize] = root_a;
    }

    let mut roots = BTreeSet::new();
    for node in 0..node_count {
        roots.insert(find_root(&mut parent, node));
    }
    if roots.len() != 1 {
        return Err(TestCaseError::fail(format!(
            "output spans {} components, expected 1",
            roots.len(),
        )));
    }
    Ok(())
}
