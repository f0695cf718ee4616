//! Plain-text graph files and the seeded random graph generator.
//!
//! The file format is:
//!
//! ```text
//! NUM_NODES NUM_EDGES
//! FROM TO WEIGHT
//! FROM TO WEIGHT
//! ...
//! ```
//!
//! Each undirected edge is written once; the loader materialises both
//! orientations when building the [`Graph`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use boruvka_core::{Graph, GraphError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised while reading, writing, or generating graph files.
#[derive(Debug, Error)]
pub enum GraphFileError {
    /// File I/O failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the file did not match the expected format.
    #[error("`{path}` line {line}: {message}")]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// One-based line number of the malformed record.
        line: usize,
        /// Description of the mismatch.
        message: String,
    },
    /// The parsed records did not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The requested dimensions cannot yield a connected simple graph.
    #[error("cannot generate a connected graph with {node_count} nodes and {edge_count} edges")]
    Unsatisfiable {
        /// Requested node count.
        node_count: u32,
        /// Requested undirected edge count.
        edge_count: u32,
    },
}

/// Loads a graph from the text format, mirroring each undirected edge.
///
/// # Errors
///
/// Returns [`GraphFileError`] when the file cannot be read, a record is
/// malformed, or the records do not form a valid graph.
pub fn load_graph(path: &Path) -> Result<Graph, GraphFileError> {
    let file = File::open(path).map_err(|source| GraphFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let (node_count, edge_count) = match lines.next() {
        Some((index, line)) => {
            let line = read_line(path, line)?;
            parse_header(path, index, &line)?
        }
        None => {
            return Err(parse_error(path, 1, "missing header line"));
        }
    };

    let mut undirected = Vec::with_capacity(edge_count as usize);
    for _ in 0..edge_count {
        match lines.next() {
            Some((index, line)) => {
                let line = read_line(path, line)?;
                undirected.push(parse_edge(path, index, &line)?);
            }
            None => {
                return Err(parse_error(
                    path,
                    edge_count as usize + 1,
                    format!(
                        "expected {edge_count} edge records, found {}",
                        undirected.len()
                    ),
                ));
            }
        }
    }

    Ok(Graph::from_undirected(node_count, &undirected)?)
}

/// Writes a graph file with one record per undirected edge.
///
/// # Errors
///
/// Returns [`GraphFileError::Io`] when the file cannot be written.
pub fn write_graph(
    path: &Path,
    node_count: u32,
    undirected: &[(u32, u32, u32)],
) -> Result<(), GraphFileError> {
    let io_error = |source| GraphFileError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{node_count} {}", undirected.len()).map_err(io_error)?;
    for &(from, to, weight) in undirected {
        writeln!(writer, "{from} {to} {weight}").map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}

/// Generates a random connected graph with `node_count` nodes and
/// `edge_count` undirected edges.
///
/// The first `node_count - 1` edges attach each node to a random earlier
/// node, guaranteeing connectivity; the remainder join random distinct
/// pairs. Weights are drawn uniformly below the reserved sentinel.
///
/// # Errors
///
/// Returns [`GraphFileError::Unsatisfiable`] when `edge_count` is smaller
/// than `node_count - 1` or the node count cannot host the edges.
pub fn generate_connected(
    node_count: u32,
    edge_count: u32,
    seed: u64,
) -> Result<Vec<(u32, u32, u32)>, GraphFileError> {
    let unsatisfiable = || GraphFileError::Unsatisfiable {
        node_count,
        edge_count,
    };

    if node_count == 0 {
        return Err(unsatisfiable());
    }
    if edge_count < node_count - 1 || (node_count == 1 && edge_count > 0) {
        return Err(unsatisfiable());
    }

    let mut rng = SmallRng::seed_from_u64(seed);

    let mut edges = Vec::with_capacity(edge_count as usize);
    for node in 1..node_count {
        let attach = rng.gen_range(0..node);
        let weight = rng.gen_range(0..u32::MAX);
        edges.push((node, attach, weight));
    }

    for _ in 0..edge_count - (node_count - 1) {
        let from = rng.gen_range(0..node_count);
        let mut to = rng.gen_range(0..node_count - 1);
        if to >= from {
            to += 1;
        }
        edges.push((from, to, rng.gen_range(0..u32::MAX)));
    }

    Ok(edges)
}

fn read_line(path: &Path, line: io::Result<String>) -> Result<String, GraphFileError> {
    line.map_err(|source| GraphFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_header(path: &Path, index: usize, line: &str) -> Result<(u32, u32), GraphFileError> {
    let fields = parse_fields::<2>(path, index, line, "NUM_NODES NUM_EDGES")?;
    Ok((fields[0], fields[1]))
}

fn parse_edge(path: &Path, index: usize, line: &str) -> Result<(u32, u32, u32), GraphFileError> {
    let fields = parse_fields::<3>(path, index, line, "FROM TO WEIGHT")?;
    Ok((fields[0], fields[1], fields[2]))
}

fn parse_fields<const N: usize>(
    path: &Path,
    index: usize,
    line: &str,
    expected: &str,
) -> Result<[u32; N], GraphFileError> {
    let mut fields = [0u32; N];
    let mut tokens = line.split_whitespace();
    for slot in &mut fields {
        let token = tokens
            .next()
            .ok_or_else(|| parse_error(path, index + 1, format!("expected `{expected}`")))?;
        *slot = token.parse().map_err(|_| {
            parse_error(
                path,
                index + 1,
                format!("`{token}` is not an unsigned 32-bit integer"),
            )
        })?;
    }
    if tokens.next().is_some() {
        return Err(parse_error(
            path,
            index + 1,
            format!("trailing data after `{expected}`"),
        ));
    }
    Ok(fields)
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> GraphFileError {
    GraphFileError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}
