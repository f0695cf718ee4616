//! Boruvka CLI library.
//!
//! Command orchestration, graph file handling, and logging initialisation
//! for the `boruvka` binary.

pub mod cli;
pub mod graph_file;
pub mod logging;
