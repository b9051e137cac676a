//! Benchmark support crate for dendro.
//!
//! Provides seeded synthetic point sets and parameter types used by the
//! Criterion benchmarks for distance-matrix construction, agglomeration,
//! tree cutting and the indexed heap.

pub mod error;
pub mod params;
pub mod source;
