//! Graph representation consumed by the MST driver.
//!
//! A graph is a list of currently-live node ids plus a symmetric, sorted
//! edge list. [`Graph::from_undirected`] is the public constructor: it
//! materialises both orientations of every undirected edge, sorts them, and
//! validates the input against the engine's preconditions.

use std::fmt;

use thiserror::Error;

use crate::parallel_array::ParallelArray;
use crate::primitives;

/// Weight value reserved as the "no edge" sentinel in the per-round
/// minimum cells; real edges must not carry it.
pub(crate) const NO_EDGE_WEIGHT: u32 = u32::MAX;

/// A directed edge record; undirected graphs store both orientations.
///
/// The derived ordering is lexicographic over `(from, to, weight)`, the
/// order the driver's per-round minimum scan relies on.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    from: u32,
    to: u32,
    weight: u32,
}

impl Edge {
    /// Creates an edge from `from` to `to` with the given weight.
    #[must_use]
    pub const fn new(from: u32, to: u32, weight: u32) -> Self {
        Self { from, to, weight }
    }

    /// Returns the source endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> u32 { self.from }

    /// Returns the destination endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> u32 { self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u32 { self.weight }

    /// Returns the same edge with its endpoints swapped.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}

/// Stable codes describing [`GraphError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphErrorCode {
    /// The graph contained no nodes.
    NoNodes,
    /// An edge referenced a node id outside the graph.
    NodeOutOfRange,
    /// An edge connected a node to itself.
    SelfLoop,
    /// An edge carried the reserved sentinel weight.
    ReservedWeight,
    /// The mirrored edge list would overflow 32-bit edge ids.
    TooManyEdges,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoNodes => "GRAPH_NO_NODES",
            Self::NodeOutOfRange => "GRAPH_NODE_OUT_OF_RANGE",
            Self::SelfLoop => "GRAPH_SELF_LOOP",
            Self::ReservedWeight => "GRAPH_RESERVED_WEIGHT",
            Self::TooManyEdges => "GRAPH_TOO_MANY_EDGES",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while constructing a [`Graph`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// The graph contained no nodes.
    #[error("graph must contain at least one node")]
    NoNodes,
    /// An edge referenced a node id outside the graph.
    #[error("edge references node {node}, but node_count is {node_count}")]
    NodeOutOfRange {
        /// The offending node id.
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
    /// The mirrored edge list would overflow 32-bit edge ids.
    #[error("{count} undirected edges exceed the 32-bit edge id space")]
    TooManyEdges {
        /// The number of undirected edges supplied.
        count: usize,
    },
}

impl GraphError {
    /// Returns the stable [`GraphErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::NoNodes => GraphErrorCode::NoNodes,
            Self::NodeOutOfRange { .. } => GraphErrorCode::NodeOutOfRange,
            Self::SelfLoop { .. } => GraphErrorCode::SelfLoop,
            Self::ReservedWeight { .. } => GraphErrorCode::ReservedWeight,
            Self::TooManyEdges { .. } => GraphErrorCode::TooManyEdges,
        }
    }
}

/// An undirected, edge-weighted graph in the driver's working form.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: ParallelArray<u32>,
    edges: ParallelArray<Edge>,
}

impl Graph {
    /// Builds a graph from `node_count` nodes and one record per
    /// undirected edge.
    ///
    /// Every `(u, v, w)` is materialised as both `(u, v, w)` and
    /// `(v, u, w)`, and the combined edge list is sorted lexicographically.
    ///
    /// # Errors
    ///
    /// Returns an error when `node_count` is zero, an endpoint is out of
    /// range, an edge is a self-loop, a weight equals the reserved
    /// `u32::MAX`, or the mirrored edge list would not fit 32-bit ids.
    pub fn from_undirected(
        node_count: u32,
        undirected: &[(u32, u32, u32)],
    ) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::NoNodes);
        }
        if undirected.len() > (u32::MAX / 2) as usize {
            return Err(GraphError::TooManyEdges {
                count: undirected.len(),
            });
        }

        let mut edges = Vec::with_capacity(undirected.len() * 2);
        for &(from, to, weight) in undirected {
            for node in [from, to] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if from == to {
                return Err(GraphError::SelfLoop { node: from });
            }
            if weight == NO_EDGE_WEIGHT {
                return Err(GraphError::ReservedWeight { from, to });
            }
            edges.push(Edge::new(from, to, weight));
            edges.push(Edge::new(to, from, weight));
        }

        let mut edges = ParallelArray::from_vec(edges);
        primitives::par_sort(edges.as_mut_slice());
        let nodes = ParallelArray::from_par_fn(node_count as usize, |i| i as u32);

        Ok(Self { nodes, edges })
    }

    /// Assembles a graph from pre-built arrays; callers are responsible
    /// for the sortedness and symmetry the driver expects.
    pub(crate) fn from_parts(nodes: ParallelArray<u32>, edges: ParallelArray<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn num_nodes(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Returns the number of directed edge records.
    #[must_use]
    pub fn num_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    /// Returns the live node ids.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &ParallelArray<u32> { &self.nodes }

    /// Returns the directed edge records.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &ParallelArray<Edge> { &self.edges }

    /// Decomposes the graph into its node and edge arrays.
    pub(crate) fn into_parts(self) -> (ParallelArray<u32>, ParallelArray<Edge>) {
        (self.nodes, self.edges)
    }
}
