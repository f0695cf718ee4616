//! Synthetic graph source for benchmark setup.
//!
//! Generates seeded random connected graphs: a spanning tree attaching
//! each node to a random earlier node, plus extra edges between random
//! distinct pairs.

use boruvka_core::{Graph, GraphError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: u32,
    /// Undirected edges per node beyond the spanning tree.
    pub extra_edges_per_node: u32,
    /// RNG seed.
    pub seed: u64,
}

/// Errors raised while generating a synthetic graph.
#[derive(Debug, Error)]
pub enum SyntheticError {
    /// The configuration asked for fewer than two nodes.
    #[error("node_count must be at least 2 (got {node_count})")]
    TooFewNodes {
        /// Requested node count.
        node_count: u32,
    },
    /// The generated edge list was rejected by graph construction.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Generates a connected graph from the configuration.
///
/// # Errors
///
/// Returns [`SyntheticError`] when the configuration is unusable or graph
/// construction rejects the generated edges.
pub fn generate(config: &SyntheticGraphConfig) -> Result<Graph, SyntheticError> {
    if config.node_count < 2 {
        return Err(SyntheticError::TooFewNodes {
            node_count: config.node_count,
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let node_count = config.node_count;
    let extra = node_count.saturating_mul(config.extra_edges_per_node);

    let mut undirected = Vec::with_capacity((node_count + extra) as usize);
    for node in 1..node_count {
        let attach = rng.gen_range(0..node);
        undirected.push((node, attach, rng.gen_range(0..u32::MAX)));
    }
    for _ in 0..extra {
        let from = rng.gen_range(0..node_count);
        let mut to = rng.gen_range(0..node_count - 1);
        if to >= from {
            to += 1;
        }
        undirected.push((from, to, rng.gen_range(0..u32::MAX)));
    }

    Ok(Graph::from_undirected(node_count, &undirected)?)
}
