//! Parallel Borůvka minimum spanning tree construction.
//!
//! Each round finds every live component's lightest outgoing edge with a
//! lock-free publish into packed `(weight, edge_id)` cells, commits the
//! resulting merges through the concurrent DSU, appends the selected edges
//! to the tree via prefix-sum compaction, and rebuilds the surviving
//! edge and node arrays relabelled to their new representatives. The live
//! node count at least halves per round, so a connected graph finishes in
//! logarithmically many rounds.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::codec::{hi, lo, pack};
use crate::dsu::ParallelDsu;
use crate::graph::{Edge, Graph, NO_EDGE_WEIGHT};
use crate::parallel_array::ParallelArray;
use crate::primitives::{chunk_len, inclusive_prefix_sum, par_sort};

/// Cell value before any candidate has been published: the reserved weight
/// in the high bits so every real edge compares below it.
const EMPTY_CELL: u64 = pack(NO_EDGE_WEIGHT, 0);

/// Working edge record for the round loop.
///
/// `from` and `to` are rewritten to component representatives between
/// rounds and drive the sorted scan; `origin_from` and `origin_to` keep
/// the input endpoints, which are what the tree records. The derived
/// ordering sorts by `(from, to, weight)` first, so the per-round scan
/// still sees each source in one contiguous run.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
struct WorkEdge {
    from: u32,
    to: u32,
    weight: u32,
    origin_from: u32,
    origin_to: u32,
}

impl WorkEdge {
    fn from_input(edge: Edge) -> Self {
        Self {
            from: edge.from(),
            to: edge.to(),
            weight: edge.weight(),
            origin_from: edge.from(),
            origin_to: edge.to(),
        }
    }

    /// Returns the input edge this record descends from.
    fn origin(&self) -> Edge {
        Edge::new(self.origin_from, self.origin_to, self.weight)
    }
}

/// Stable codes describing [`MstError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MstErrorCode {
    /// The caller requested an MST for an empty graph.
    EmptyGraph,
    /// An edge referenced a node id that is not present in the graph.
    InvalidNodeId,
    /// An edge connected a node to itself.
    SelfLoop,
    /// An edge carried the reserved sentinel weight.
    ReservedWeight,
    /// The edge array was not sorted lexicographically.
    UnsortedEdges,
    /// An edge was present in only one orientation.
    AsymmetricEdge,
    /// The graph was not connected.
    Disconnected,
    /// The worker pool could not be constructed.
    WorkerPool,
}

impl MstErrorCode {
    /// Returns the symbolic identifier for logging and metrics surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyGraph => "MST_EMPTY_GRAPH",
            Self::InvalidNodeId => "MST_INVALID_NODE_ID",
            Self::SelfLoop => "MST_SELF_LOOP",
            Self::ReservedWeight => "MST_RESERVED_WEIGHT",
            Self::UnsortedEdges => "MST_UNSORTED_EDGES",
            Self::AsymmetricEdge => "MST_ASYMMETRIC_EDGE",
            Self::Disconnected => "MST_DISCONNECTED",
            Self::WorkerPool => "MST_WORKER_POOL",
        }
    }
}

impl fmt::Display for MstErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while computing a minimum spanning tree.
///
/// All variants are fatal: the engine never retries and never returns a
/// partial tree.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MstError {
    /// The caller requested an MST for an empty graph.
    #[error("cannot compute an MST for an empty graph")]
    EmptyGraph,
    /// An edge referenced a node id that is not present in the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by an edge.
        node: u32,
        /// The number of nodes in the graph.
        node_count: u32,
    },
    /// An edge connected a node to itself.
    #[error("edge ({node}, {node}) is a self-loop")]
    SelfLoop {
        /// The node carrying the self-loop.
        node: u32,
    },
    /// An edge carried the reserved sentinel weight.
    #[error("edge ({from}, {to}) carries the reserved weight u32::MAX")]
    ReservedWeight {
        /// Source endpoint of the offending edge.
        from: u32,
        /// Destination endpoint of the offending edge.
        to: u32,
    },
    /// The edge array was not sorted lexicographically.
    #[error("edge array is not sorted by (from, to, weight)")]
    UnsortedEdges,
    /// An edge was present in only one orientation.
    #[error("edge ({from}, {to}, {weight}) has no reverse orientation")]
    AsymmetricEdge {
        /// Source endpoint of the unmatched edge.
        from: u32,
        /// Destination endpoint of the unmatched edge.
        to: u32,
        /// Weight of the unmatched edge.
        weight: u32,
    },
    /// The graph was not connected.
    #[error("graph is disconnected: {live_components} components remain with no crossing edges")]
    Disconnected {
        /// Number of components left when the edges ran out.
        live_components: u32,
    },
    /// The worker pool could not be constructed.
    #[error("failed to build the worker pool: {message}")]
    WorkerPool {
        /// Rendering of the underlying pool build failure.
        message: String,
    },
}

impl MstError {
    /// Returns the stable [`MstErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> MstErrorCode {
        match self {
            Self::EmptyGraph => MstErrorCode::EmptyGraph,
            Self::InvalidNodeId { .. } => MstErrorCode::InvalidNodeId,
            Self::SelfLoop { .. } => MstErrorCode::SelfLoop,
            Self::ReservedWeight { .. } => MstErrorCode::ReservedWeight,
            Self::UnsortedEdges => MstErrorCode::UnsortedEdges,
            Self::AsymmetricEdge { .. } => MstErrorCode::AsymmetricEdge,
            Self::Disconnected { .. } => MstErrorCode::Disconnected,
            Self::WorkerPool { .. } => MstErrorCode::WorkerPool,
        }
    }
}

/// The edge sequence chosen by a completed MST computation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinimumSpanningTree {
    edges: ParallelArray<Edge>,
}

impl MinimumSpanningTree {
    /// Returns the selected edges in round-by-round order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { self.edges.as_slice() }

    /// Returns the number of selected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when no edges were selected (single-node input).
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Sums the selected edge weights in 64 bits.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|edge| u64::from(edge.weight())).sum()
    }
}

/// Computes the minimum spanning tree of a connected graph.
///
/// The input must be symmetric (every undirected edge present in both
/// orientations) and sorted lexicographically, which
/// [`Graph::from_undirected`] guarantees. `num_workers` sizes the worker
/// pool used for every phase; `None` uses the platform default.
///
/// # Errors
///
/// Returns an error when a precondition is violated, the graph turns out
/// to be disconnected, or the worker pool cannot be built. There are no
/// recoverable errors and no partial results.
pub fn calculate_mst(
    graph: Graph,
    num_workers: Option<NonZeroUsize>,
) -> Result<MinimumSpanningTree, MstError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(workers) = num_workers {
        builder = builder.num_threads(workers.get());
    }
    let pool = builder.build().map_err(|source| MstError::WorkerPool {
        message: source.to_string(),
    })?;

    pool.install(|| compute(graph))
}

fn compute(graph: Graph) -> Result<MinimumSpanningTree, MstError> {
    validate(&graph)?;

    let initial_nodes = graph.num_nodes();
    let dsu = ParallelDsu::new(initial_nodes);
    let mut mst = ParallelArray::filled(initial_nodes.saturating_sub(1) as usize, Edge::default());
    let mut mst_len: u32 = 0;

    let (mut nodes, input_edges) = graph.into_parts();
    let mut edges: ParallelArray<WorkEdge> =
        ParallelArray::from_par_fn(input_edges.len(), |i| WorkEdge::from_input(input_edges[i]));

    let mut round = 0u32;
    while nodes.len() > 1 {
        if edges.is_empty() {
            return Err(MstError::Disconnected {
                live_components: nodes.len() as u32,
            });
        }

        let appended = run_round(&mut nodes, &mut edges, &dsu, &mut mst, &mut mst_len);
        round += 1;
        debug!(
            round,
            live_nodes = nodes.len(),
            live_edges = edges.len(),
            appended,
            "completed round"
        );
    }

    debug_assert_eq!(mst_len, initial_nodes - 1);
    Ok(MinimumSpanningTree { edges: mst })
}

/// Executes one Borůvka round, returning the number of edges appended.
fn run_round(
    nodes: &mut ParallelArray<u32>,
    edges: &mut ParallelArray<WorkEdge>,
    dsu: &ParallelDsu,
    mst: &mut ParallelArray<Edge>,
    mst_len: &mut u32,
) -> u32 {
    let num_edges = edges.len();
    let current = edges.as_slice();

    // Seed one packed minimum cell per original node id. Only cells of
    // live nodes are ever read again.
    let cells: ParallelArray<AtomicU64> =
        ParallelArray::from_par_fn(dsu.size() as usize, |_| AtomicU64::new(EMPTY_CELL));

    // Each worker owns a contiguous edge slice. Edges are sorted by
    // `from`, so a run of equal sources collapses to a single local best
    // before the lock-free publish.
    let chunk = chunk_len(num_edges);
    current
        .par_chunks(chunk)
        .enumerate()
        .for_each(|(chunk_index, slice)| {
            let base = chunk_index * chunk;
            let mut run: Option<(u32, u64)> = None;
            for (offset, edge) in slice.iter().enumerate() {
                let candidate = pack(edge.weight, (base + offset) as u32);
                match run {
                    Some((from, best)) if from == edge.from => {
                        if candidate < best {
                            run = Some((from, candidate));
                        }
                    }
                    Some((from, best)) => {
                        publish_min(&cells[from as usize], best);
                        run = Some((edge.from, candidate));
                    }
                    None => run = Some((edge.from, candidate)),
                }
            }
            if let Some((from, best)) = run {
                publish_min(&cells[from as usize], best);
            }
        });

    // Select each component's minimum edge and commit the merge. A pair of
    // mutual minima must contribute exactly one edge: the one-way
    // preference always wins, and the mutual case keeps the edge of the
    // smaller id.
    let mut selected = ParallelArray::filled(num_edges, 0u32);
    {
        let selected_slots = selected.scatter();
        nodes.par_iter().for_each(|&u| {
            let cell_u = cells[u as usize].load(Ordering::SeqCst);
            if hi(cell_u) == NO_EDGE_WEIGHT {
                // No outgoing edge: the component is already isolated.
                return;
            }
            let edge_u = lo(cell_u);
            let v = current[edge_u as usize].to;
            let cell_v = cells[v as usize].load(Ordering::SeqCst);
            let partner = current[lo(cell_v) as usize].to;

            if partner != u || u < v {
                dsu.unite(u, v);
                // SAFETY: an edge id has a unique `from` endpoint, so this
                // slot has exactly one writer across the loop.
                unsafe { selected_slots.write(edge_u as usize, 1) };
            }
        });
    }

    // Append the selected edges to the tree at prefix-sum slots. The tree
    // records the input edge, not the relabelled working record.
    let selected_prefix = inclusive_prefix_sum(selected.as_slice());
    let appended = selected_prefix.as_slice().last().copied().unwrap_or(0);
    {
        let mst_slots = mst.scatter();
        let base = *mst_len;
        (0..num_edges).into_par_iter().for_each(|i| {
            if selected[i] == 1 {
                // SAFETY: the prefix sum assigns each selected edge a
                // distinct output slot.
                unsafe {
                    mst_slots.write((base + selected_prefix[i] - 1) as usize, current[i].origin())
                };
            }
        });
    }
    *mst_len += appended;

    // Drop intra-component edges, relabel survivors to their new
    // representatives, and compact. Original endpoints ride along
    // untouched.
    let remaining: ParallelArray<u32> = ParallelArray::from_par_fn(num_edges, |i| {
        let edge = current[i];
        u32::from(!dsu.same_set(edge.from, edge.to))
    });
    let remaining_prefix = inclusive_prefix_sum(remaining.as_slice());
    let surviving = remaining_prefix.as_slice().last().copied().unwrap_or(0) as usize;
    let mut new_edges = ParallelArray::filled(surviving, WorkEdge::default());
    {
        let edge_slots = new_edges.scatter();
        (0..num_edges).into_par_iter().for_each(|i| {
            if remaining[i] == 1 {
                let edge = current[i];
                let relabelled = WorkEdge {
                    from: dsu.find_root(edge.from),
                    to: dsu.find_root(edge.to),
                    ..edge
                };
                // SAFETY: the prefix sum assigns each surviving edge a
                // distinct output slot.
                unsafe { edge_slots.write((remaining_prefix[i] - 1) as usize, relabelled) };
            }
        });
    }

    // Keep only the nodes that are still representatives.
    let node_slice = nodes.as_slice();
    let num_nodes = node_slice.len();
    let root_mask: ParallelArray<u32> = ParallelArray::from_par_fn(num_nodes, |i| {
        u32::from(dsu.find_root(node_slice[i]) == node_slice[i])
    });
    let root_prefix = inclusive_prefix_sum(root_mask.as_slice());
    let live = root_prefix.as_slice().last().copied().unwrap_or(0) as usize;
    let mut new_nodes = ParallelArray::filled(live, 0u32);
    {
        let node_slots = new_nodes.scatter();
        (0..num_nodes).into_par_iter().for_each(|i| {
            if root_mask[i] == 1 {
                // SAFETY: the prefix sum assigns each surviving node a
                // distinct output slot.
                unsafe { node_slots.write((root_prefix[i] - 1) as usize, node_slice[i]) };
            }
        });
    }

    nodes.swap(&mut new_nodes);
    edges.swap(&mut new_edges);
    par_sort(edges.as_mut_slice());

    appended
}

/// Lock-free monotone minimum: keeps the smallest packed `(weight, id)`
/// word ever published to the cell.
fn publish_min(cell: &AtomicU64, candidate: u64) {
    let mut observed = cell.load(Ordering::SeqCst);
    while candidate < observed {
        match cell.compare_exchange(observed, candidate, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => break,
            Err(current) => observed = current,
        }
    }
}

fn validate(graph: &Graph) -> Result<(), MstError> {
    let node_count = graph.num_nodes();
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }

    let edges = graph.edges().as_slice();
    edges
        .par_iter()
        .try_for_each(|edge| validate_edge(edge, node_count))?;

    if !edges.par_windows(2).all(|pair| pair[0] <= pair[1]) {
        return Err(MstError::UnsortedEdges);
    }

    edges.par_iter().try_for_each(|edge| {
        if edges.binary_search(&edge.reversed()).is_err() {
            return Err(MstError::AsymmetricEdge {
                from: edge.from(),
                to: edge.to(),
                weight: edge.weight(),
            });
        }
        Ok(())
    })
}

fn validate_edge(edge: &Edge, node_count: u32) -> Result<(), MstError> {
    for node in [edge.from(), edge.to()] {
        if node >= node_count {
            return Err(MstError::InvalidNodeId { node, node_count });
        }
    }
    if edge.from() == edge.to() {
        return Err(MstError::SelfLoop { node: edge.from() });
    }
    if edge.weight() == NO_EDGE_WEIGHT {
        return Err(MstError::ReservedWeight {
            from: edge.from(),
            to: edge.to(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod property;
