//! Synthetic benchmark point sets.
//!
//! Generators are seeded so every benchmark run clusters the same data.

mod errors;
mod numeric;

pub use errors::SyntheticError;
pub use numeric::{GaussianBlobConfig, SyntheticConfig, SyntheticPoints};
