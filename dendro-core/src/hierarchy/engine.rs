//! The agglomeration loop.
//!
//! Each representative keeps its best-known successor in the
//! [`NeighborTable`] and a heap entry keyed by that distance. Keys are lower
//! bounds, so the minimum heap entry is only a candidate: it is accepted when
//! its key still equals the matrix entry for the recorded pair, and otherwise
//! the representative is rescanned and pushed back. Merges retire the smaller
//! representative, fold its row into the survivor with the linkage rule, and
//! touch only the records that can have improved.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::{
    dendrogram::{Dendrogram, Linkage},
    linkage_rule::LinkageRule,
    neighbors::{NeighborRecord, NeighborTable, nearest_after},
};
use crate::{
    active_set::ActiveSet,
    error::{ClusterError, Result},
    heap::{HeapEntry, IndexedMinHeap},
    matrix::DistanceMatrix,
};

/// Owns every piece of mutable state for one agglomeration run.
///
/// # Examples
/// ```
/// use dendro_core::{DistanceMatrix, LinkageRule, MergeEngine};
///
/// let matrix = DistanceMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ])?;
/// let dendrogram = MergeEngine::new(matrix, LinkageRule::Average).run()?;
/// let distances: Vec<f64> = dendrogram.iter().map(|linkage| linkage.distance).collect();
/// assert_eq!(distances, [1.0, 3.0]);
/// # Ok::<(), dendro_core::ClusterError>(())
/// ```
#[derive(Debug)]
pub struct MergeEngine {
    matrix: DistanceMatrix,
    linkage: LinkageRule,
    active: ActiveSet,
    neighbors: NeighborTable,
    heap: IndexedMinHeap,
    repairs: usize,
}

/// The pair selected by one merge step.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    absorbed: usize,
    survivor: usize,
    distance: f64,
}

impl MergeEngine {
    /// Takes ownership of `matrix`; it is rewritten in place while merging.
    #[must_use]
    pub fn new(matrix: DistanceMatrix, linkage: LinkageRule) -> Self {
        Self {
            matrix,
            linkage,
            active: ActiveSet::default(),
            neighbors: NeighborTable::default(),
            heap: IndexedMinHeap::default(),
            repairs: 0,
        }
    }

    /// Runs all `m - 1` merges and returns the merge history.
    ///
    /// # Errors
    /// Returns [`ClusterError::EmptyInput`] for fewer than two points. Heap or
    /// bookkeeping failures surface as [`ClusterError::Heap`] or
    /// [`ClusterError::InvariantViolation`]; they indicate a bug.
    pub fn run(mut self) -> Result<Dendrogram> {
        let points = self.matrix.order();
        if points < 2 {
            warn!(points, "rejecting input with fewer than two points");
            return Err(ClusterError::EmptyInput { points });
        }
        let started = Instant::now();
        self.initialise()?;

        let mut linkages = Vec::with_capacity(points - 1);
        while self.active.len() > 1 {
            linkages.push(self.merge_step()?);
            record_merge();
        }

        let dendrogram = Dendrogram::new(points, linkages);
        let inversions = dendrogram.inversions();
        if !inversions.is_empty() {
            warn!(
                count = inversions.len(),
                first = inversions.first().copied(),
                "dendrogram contains distance inversions"
            );
        }
        record_agglomeration(started.elapsed().as_secs_f64());
        info!(
            merges = dendrogram.len(),
            repairs = self.repairs,
            height = dendrogram.height(),
            "agglomeration complete"
        );
        Ok(dendrogram)
    }

    fn initialise(&mut self) -> Result<()> {
        let points = self.matrix.order();
        self.active = ActiveSet::new(points);
        self.neighbors = NeighborTable::initialise(&self.matrix, &self.active);
        let entries = self
            .neighbors
            .iter()
            .enumerate()
            .map(|(index, record)| HeapEntry::new(record.min_distance, index))
            .collect();
        self.heap = IndexedMinHeap::from_entries(points, entries)?;
        Ok(())
    }

    fn merge_step(&mut self) -> Result<Linkage> {
        let Candidate {
            absorbed,
            survivor,
            distance,
        } = self.next_candidate()?;

        let size_absorbed = self.record(absorbed)?.size;
        let size_survivor = self.record(survivor)?.size;
        let size = size_absorbed + size_survivor;
        self.record_mut(survivor)?.size = size;
        if !self.active.remove(absorbed) {
            return Err(ClusterError::InvariantViolation {
                invariant: "merged representative is active",
                index: absorbed,
            });
        }

        for other in self.active.iter() {
            if other == survivor {
                continue;
            }
            let updated = self.linkage.update(
                size_absorbed,
                self.matrix.at(absorbed, other),
                size_survivor,
                self.matrix.at(survivor, other),
            );
            self.matrix.set_symmetric(survivor, other, updated);
        }

        self.retarget(absorbed, survivor)?;
        self.promote(survivor)?;
        self.refresh(survivor)?;

        Ok(Linkage {
            first: absorbed,
            second: survivor,
            distance,
            size,
        })
    }

    /// Pops until the minimum entry agrees with the matrix, repairing stale
    /// records on the way.
    fn next_candidate(&mut self) -> Result<Candidate> {
        loop {
            let entry = self.heap.pop()?;
            let index = entry.value;
            let nearest = self
                .record(index)?
                .nearest
                .ok_or(ClusterError::InvariantViolation {
                    invariant: "popped representative has a successor",
                    index,
                })?;
            if self.active.contains(nearest) {
                let current = self.matrix.at(index, nearest);
                if entry.key == current {
                    return Ok(Candidate {
                        absorbed: index,
                        survivor: nearest,
                        distance: current,
                    });
                }
            }

            let (repaired, min_distance) = nearest_after(&self.matrix, &self.active, index);
            debug!(
                index,
                stale = entry.key,
                repaired = min_distance,
                "repaired stale nearest neighbour"
            );
            self.repairs += 1;
            record_repair();
            let record = self.record_mut(index)?;
            record.nearest = repaired;
            record.min_distance = min_distance;
            self.heap.push(HeapEntry::new(min_distance, index))?;
        }
    }

    /// Points records below `absorbed` that named it at the survivor. Their
    /// keys stay as lower bounds and are checked when they next surface.
    fn retarget(&mut self, absorbed: usize, survivor: usize) -> Result<()> {
        let stale: Vec<usize> = self
            .active
            .iter()
            .take_while(|&index| index < absorbed)
            .filter(|&index| {
                self.neighbors.get(index).and_then(|record| record.nearest) == Some(absorbed)
            })
            .collect();
        for index in stale {
            self.record_mut(index)?.nearest = Some(survivor);
        }
        Ok(())
    }

    /// Lets every record below the survivor adopt it when its updated
    /// distance beats the stored key.
    fn promote(&mut self, survivor: usize) -> Result<()> {
        let improved: Vec<(usize, f64)> = self
            .active
            .iter()
            .take_while(|&index| index < survivor)
            .filter_map(|index| {
                let distance = self.matrix.at(index, survivor);
                let record = self.neighbors.get(index)?;
                (distance < record.min_distance).then_some((index, distance))
            })
            .collect();
        for (index, distance) in improved {
            let record = self.record_mut(index)?;
            record.nearest = Some(survivor);
            record.min_distance = distance;
            self.heap.update_key(index, distance)?;
        }
        Ok(())
    }

    /// Recomputes the survivor's own successor from scratch.
    fn refresh(&mut self, survivor: usize) -> Result<()> {
        let (nearest, min_distance) = nearest_after(&self.matrix, &self.active, survivor);
        let record = self.record_mut(survivor)?;
        record.nearest = nearest;
        record.min_distance = min_distance;
        self.heap.update_key(survivor, min_distance)?;
        Ok(())
    }

    fn record(&self, index: usize) -> Result<&NeighborRecord> {
        self.neighbors
            .get(index)
            .ok_or(ClusterError::InvariantViolation {
                invariant: "representative has a neighbour record",
                index,
            })
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut NeighborRecord> {
        self.neighbors
            .record_mut(index)
            .ok_or(ClusterError::InvariantViolation {
                invariant: "representative has a neighbour record",
                index,
            })
    }
}

#[cfg(feature = "metrics")]
fn record_merge() {
    metrics::counter!("dendro_merges_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_merge() {}

#[cfg(feature = "metrics")]
fn record_repair() {
    metrics::counter!("dendro_lazy_repairs_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_repair() {}

#[cfg(feature = "metrics")]
fn record_agglomeration(seconds: f64) {
    metrics::histogram!("dendro_agglomeration_seconds").record(seconds);
}

#[cfg(not(feature = "metrics"))]
fn record_agglomeration(_seconds: f64) {}
