//! Command-line interface orchestration for the Borůvka MST engine.
//!
//! Offers a `run` command that loads a graph file and computes its MST,
//! and a `generate` command that writes a seeded random connected graph in
//! the same text format.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use boruvka_core::{MstError, calculate_mst};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::graph_file::{self, GraphFileError};

const DEFAULT_SEED: u64 = 42;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "boruvka",
    about = "Compute minimum spanning trees with the parallel Borůvka engine."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute the MST of a graph file and print a summary.
    Run(RunCommand),
    /// Generate a random connected graph file.
    Generate(GenerateCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the graph file.
    pub path: PathBuf,

    /// Number of worker threads (defaults to the available parallelism).
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Output path for the generated graph file.
    pub path: PathBuf,

    /// Number of nodes.
    #[arg(long)]
    pub nodes: u32,

    /// Number of undirected edges (at least `nodes - 1`).
    #[arg(long)]
    pub edges: u32,

    /// RNG seed.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Graph file handling failed.
    #[error(transparent)]
    GraphFile(#[from] GraphFileError),
    /// MST computation failed.
    #[error(transparent)]
    Mst(#[from] MstError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Outcome of a `run` command.
    Run(RunSummary),
    /// Outcome of a `generate` command.
    Generate(GenerateSummary),
}

/// Outcome of computing an MST.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Path of the input graph.
    pub path: PathBuf,
    /// Number of nodes in the input.
    pub node_count: u32,
    /// Number of directed edge records in the input.
    pub edge_count: u32,
    /// Number of edges in the spanning tree.
    pub tree_edge_count: usize,
    /// Total weight of the spanning tree.
    pub total_weight: u64,
    /// Wall time spent inside the engine.
    pub elapsed: Duration,
}

/// Outcome of generating a graph file.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of nodes written.
    pub node_count: u32,
    /// Number of undirected edges written.
    pub edge_count: u32,
    /// Seed used for generation.
    pub seed: u64,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
///
/// Returns [`CliError`] when loading, generation, or the MST computation
/// fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
        Command::Generate(generate) => generate_command(generate),
    }
}

fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let graph = graph_file::load_graph(&command.path)?;
    let node_count = graph.num_nodes();
    let edge_count = graph.num_edges();

    let started = Instant::now();
    let tree = calculate_mst(graph, command.workers)?;
    let elapsed = started.elapsed();

    info!(
        nodes = node_count,
        edges = edge_count,
        tree_edges = tree.len(),
        total_weight = tree.total_weight(),
        elapsed_ms = elapsed.as_millis() as u64,
        "mst computed"
    );

    Ok(ExecutionSummary::Run(RunSummary {
        path: command.path,
        node_count,
        edge_count,
        tree_edge_count: tree.len(),
        total_weight: tree.total_weight(),
        elapsed,
    }))
}

fn generate_command(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let undirected = graph_file::generate_connected(command.nodes, command.edges, command.seed)?;
    graph_file::write_graph(&command.path, command.nodes, &undirected)?;

    Ok(ExecutionSummary::Generate(GenerateSummary {
        path: command.path,
        node_count: command.nodes,
        edge_count: command.edges,
        seed: command.seed,
    }))
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
///
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Run(run) => {
            writeln!(writer, "graph: {}", run.path.display())?;
            writeln!(writer, "nodes: {}", run.node_count)?;
            writeln!(writer, "directed edges: {}", run.edge_count)?;
            writeln!(writer, "tree edges: {}", run.tree_edge_count)?;
            writeln!(writer, "total weight: {}", run.total_weight)?;
            writeln!(writer, "elapsed: {:.3?}", run.elapsed)?;
        }
        ExecutionSummary::Generate(generate) => {
            writeln!(writer, "wrote: {}", generate.path.display())?;
            writeln!(writer, "nodes: {}", generate.node_count)?;
            writeln!(writer, "undirected edges: {}", generate.edge_count)?;
            writeln!(writer, "seed: {}", generate.seed)?;
        }
    }
    Ok(())
}
