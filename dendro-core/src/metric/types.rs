//! Domain primitives shared by the metric routines.

use core::{fmt, ops::Deref};

use thiserror::Error;

/// Identifies whether an error was produced while inspecting the left or right
/// vector argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing point dissimilarities.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MetricError {
    /// Either input vector had zero length.
    #[error("vectors must have positive dimension")]
    ZeroLength,
    /// Input vectors had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand vector.
        left: usize,
        /// Dimensionality of the right-hand vector.
        right: usize,
    },
    /// Encountered a non-finite value in one of the vectors.
    #[error("{which} vector contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Argument containing the value.
        which: VectorKind,
        /// Component index of the value.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// Minkowski distances need a finite exponent of at least one.
    #[error("minkowski exponent must be finite and >= 1 (got {p})")]
    InvalidExponent {
        /// Exponent supplied by the caller.
        p: f64,
    },
}

/// Convenient alias for metric computations.
pub type Result<T> = core::result::Result<T, MetricError>;

/// Point newtype that validates dimensionality and finiteness on construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Point<'a>(&'a [f64]);

impl<'a> Point<'a> {
    pub(crate) fn new(values: &'a [f64], which: VectorKind) -> Result<Self> {
        if values.is_empty() {
            return Err(MetricError::ZeroLength);
        }

        if let Some((index, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(MetricError::NonFinite {
                which,
                index,
                value,
            });
        }

        Ok(Self(values))
    }

    pub(crate) fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl Deref for Point<'_> {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}
