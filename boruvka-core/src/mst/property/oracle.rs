//! Sequential Kruskal oracle for MST property verification.
//!
//! A simple, trusted, sequential implementation used as the reference for
//! total-weight comparisons. Any minimum spanning tree of a graph has the
//! same total weight, so the oracle does not need to reproduce the
//! engine's tie-breaking.

use super::helpers::find_root;

/// Result of the sequential Kruskal oracle.
#[derive(Clone, Copy, Debug)]
pub(super) struct SequentialMstResult {
    /// Total weight of the spanning forest.
    pub total_weight: u64,
    /// Number of edges accepted into the forest.
    pub edge_count: usize,
    /// Number of connected components after construction.
    pub component_count: u32,
}

/// Computes a minimum spanning forest with sequential Kruskal.
pub(super) fn sequential_kruskal(
    node_count: u32,
    undirected: &[(u32, u32, u32)],
) -> SequentialMstResult {
    let mut edges = undirected.to_vec();
    edges.sort_unstable_by_key(|&(from, to, weight)| (weight, from, to));

    let mut parent: Vec<u32> = (0..node_count).collect();
    let mut rank: Vec<u8> = vec![0; node_count as usize];
    let mut components = node_count;
    let mut total_weight = 0u64;
    let mut edge_count = 0usize;

    for &(from, to, weight) in &edges {
        let root_a = find_root(&mut parent, from);
        let root_b = find_root(&mut parent, to);
        if root_a == root_b {
            continue;
        }
        union_by_rank(&mut parent, &mut rank, root_a, root_b);
        total_weight += u64::from(weight);
        edge_count += 1;
        components -= 1;
    }

    SequentialMstResult {
        total_weight,
        edge_count,
        component_count: components,
    }
}

/// Union by rank, breaking ties towards the smaller index.
fn union_by_rank(parent: &mut [u32], rank: &mut [u8], a: u32, b: u32) {
    let (root, child) = match rank[a as usize].cmp(&rank[b as usize]) {
        std::cmp::Ordering::Greater => (a, b),
        std::cmp::Ordering::Less => (b, a),
        std::cmp::Ordering::Equal if a <= b => (a, b),
        std::cmp::Ordering::Equal => (b, a),
    };
    parent[child as usize] = root;
    if rank[root as usize] == rank[child as usize] {
        rank[root as usize] += 1;
    }
}
