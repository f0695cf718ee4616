//! Property-based tests for the parallel Borůvka implementation.
//!
//! Verifies the engine against a sequential Kruskal oracle, validates
//! structural invariants of the returned tree (size, acyclicity, spanning,
//! membership in the input), and checks that the total weight stays
//! stable across repeated runs and worker counts, over graph topologies
//! with varied weight distributions.

mod concurrency;
mod equivalence;
mod helpers;
mod oracle;
mod structural;
mod types;
