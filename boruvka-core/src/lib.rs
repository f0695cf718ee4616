//! Boruvka core library.
//!
//! A parallel minimum spanning tree engine built from two tightly coupled
//! subsystems: a lock-free disjoint-set union whose per-node state lives in
//! a single atomic 64-bit word, and a data-parallel Borůvka driver that
//! finds each component's lightest outgoing edge, commits the merges, and
//! compacts the surviving graph round by round.

mod codec;
mod dsu;
mod graph;
mod mst;
mod parallel_array;
mod primitives;

pub use crate::{
    dsu::ParallelDsu,
    graph::{Edge, Graph, GraphError, GraphErrorCode},
    mst::{MinimumSpanningTree, MstError, MstErrorCode, calculate_mst},
    parallel_array::{ParallelArray, ScatterWriter},
};

#[cfg(test)]
pub(crate) mod test_utils;
