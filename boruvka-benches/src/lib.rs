//! Benchmark support library for the Borůvka engine.
//!
//! Hosts the synthetic graph source and parameter types shared by the
//! criterion benchmarks, so benchmark setup code can propagate failures
//! with `?` instead of `.expect()`.

pub mod error;
pub mod params;
pub mod source;
