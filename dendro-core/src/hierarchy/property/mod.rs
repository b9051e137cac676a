//! Property-based tests for the average-linkage merge engine.
//!
//! Checks the engine's merge heights against a definitional oracle that
//! recomputes every cluster-to-cluster mean from the original matrix, and
//! validates the structure of the merge history and its cuts across several
//! point layouts.

mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod tests;
mod types;
