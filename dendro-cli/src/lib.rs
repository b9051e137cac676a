//! Support library for the `dendro` binary.
//!
//! Exposes the command pipeline, the point loader and logging setup so
//! doctests and unit tests can drive them without spawning a subprocess.

pub mod cli;
pub mod input;
pub mod logging;
