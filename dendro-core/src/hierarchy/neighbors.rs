//! Per-representative nearest-neighbour bookkeeping for the merge loop.
//!
//! Each active index `i` records a candidate `nearest > i` together with a
//! key. Only the smaller index of a pair owns the pair, so a record says
//! nothing about neighbours below `i`.
//!
//! The key is always a lower bound on `min { D[i][x] : x active, x > i }`.
//! The nearest index is only a hint: it is trusted solely when
//! `D[i][nearest]` equals the key, which the merge loop checks when the
//! record surfaces from the heap. Every other reader treats the record as
//! provisional.

use crate::{active_set::ActiveSet, matrix::DistanceMatrix};

/// Nearest-neighbour candidate and cluster size for one representative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborRecord {
    /// Candidate nearest active index above this one; `None` for the largest
    /// active index.
    pub nearest: Option<usize>,
    /// Lower bound on the distance to the nearest active index above this one.
    /// `f64::INFINITY` when `nearest` is `None`.
    pub min_distance: f64,
    /// Number of original points in the cluster this index represents.
    pub size: usize,
}

impl NeighborRecord {
    const fn singleton(nearest: Option<usize>, min_distance: f64) -> Self {
        Self {
            nearest,
            min_distance,
            size: 1,
        }
    }
}

/// Nearest-neighbour records indexed by representative.
#[derive(Clone, Debug, Default)]
pub struct NeighborTable {
    records: Vec<NeighborRecord>,
}

impl NeighborTable {
    /// Scans every pair once and records each index's nearest successor.
    pub(crate) fn initialise(matrix: &DistanceMatrix, active: &ActiveSet) -> Self {
        let records = (0..matrix.order())
            .map(|index| {
                let (nearest, min_distance) = nearest_after(matrix, active, index);
                NeighborRecord::singleton(nearest, min_distance)
            })
            .collect();
        Self { records }
    }

    /// Returns the record for `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NeighborRecord> {
        self.records.get(index)
    }

    /// Number of records, including retired representatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &NeighborRecord> {
        self.records.iter()
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut NeighborRecord> {
        self.records.get_mut(index)
    }
}

/// Returns the active index above `index` with the smallest distance, and
/// that distance. Ties resolve to the smaller candidate.
///
/// The scan is seeded with the first active successor, so any index below
/// the largest active one gets `Some` even when every distance is infinite.
pub(crate) fn nearest_after(
    matrix: &DistanceMatrix,
    active: &ActiveSet,
    index: usize,
) -> (Option<usize>, f64) {
    let mut successors = active.iter_after(index);
    let Some(first) = successors.next() else {
        return (None, f64::INFINITY);
    };
    let (nearest, distance) = successors.fold(
        (first, matrix.at(index, first)),
        |(best, best_distance), candidate| {
            let distance = matrix.at(index, candidate);
            if distance < best_distance {
                (candidate, distance)
            } else {
                (best, best_distance)
            }
        },
    );
    (Some(nearest), distance)
}
