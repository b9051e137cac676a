//! Array-backed binary min-heap with an O(1) value-to-position index.
//!
//! Entries are `(key, value)` pairs where `value` is a cluster representative
//! in `[0, capacity)` and appears at most once. Callers address entries by
//! value, so every swap performed while sifting also rewrites the
//! `positions` table. `search` is then a table lookup and updating or
//! removing by value costs one sift.

use thiserror::Error;

/// A `(key, value)` pair stored in an [`IndexedMinHeap`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeapEntry {
    /// Ordering key; smaller keys are popped first.
    pub key: f64,
    /// Identifier addressed by [`IndexedMinHeap::search`].
    pub value: usize,
}

impl HeapEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(key: f64, value: usize) -> Self {
        Self { key, value }
    }
}

/// Errors raised by [`IndexedMinHeap`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` was called on an empty heap.
    #[error("cannot pop from an empty heap")]
    Empty,
    /// A heap-array position did not address a stored entry.
    #[error("heap position {position} is out of range for {len} entries")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of stored entries.
        len: usize,
    },
    /// A value fell outside the range the heap was sized for.
    #[error("heap value {value} exceeds capacity {capacity}")]
    ValueOutOfRange {
        /// Offending value.
        value: usize,
        /// Number of distinct values the heap can index.
        capacity: usize,
    },
    /// A value was inserted while already present.
    #[error("heap already holds an entry for value {value}")]
    DuplicateValue {
        /// Offending value.
        value: usize,
    },
    /// A value-addressed operation named a value that is not stored.
    #[error("heap holds no entry for value {value}")]
    MissingValue {
        /// Requested value.
        value: usize,
    },
}

/// Decrease-key priority queue keyed by `f64` distances.
///
/// # Examples
/// ```
/// use dendro_core::{HeapEntry, IndexedMinHeap};
///
/// let mut heap = IndexedMinHeap::with_capacity(4);
/// heap.push(HeapEntry::new(3.0, 0))?;
/// heap.push(HeapEntry::new(1.0, 1))?;
/// heap.push(HeapEntry::new(2.0, 2))?;
/// heap.update_key(0, 0.5)?;
///
/// assert_eq!(heap.search(0), Some(0));
/// assert_eq!(heap.pop()?.value, 0);
/// assert_eq!(heap.pop()?.value, 1);
/// # Ok::<(), dendro_core::HeapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct IndexedMinHeap {
    entries: Vec<HeapEntry>,
    positions: Vec<Option<usize>>,
}

impl IndexedMinHeap {
    /// Creates an empty heap able to index values in `[0, capacity)`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Builds a heap from unordered entries in O(n) by sifting down every
    /// internal node, last to first.
    ///
    /// # Errors
    /// Returns [`HeapError::ValueOutOfRange`] or [`HeapError::DuplicateValue`]
    /// when the entries cannot be indexed.
    pub fn from_entries(capacity: usize, entries: Vec<HeapEntry>) -> Result<Self, HeapError> {
        let mut positions = vec![None; capacity];
        for (position, entry) in entries.iter().enumerate() {
            let slot = positions
                .get_mut(entry.value)
                .ok_or(HeapError::ValueOutOfRange {
                    value: entry.value,
                    capacity,
                })?;
            if slot.replace(position).is_some() {
                return Err(HeapError::DuplicateValue { value: entry.value });
            }
        }
        let mut heap = Self { entries, positions };
        for position in (0..heap.len() / 2).rev() {
            heap.sift_down(position);
        }
        Ok(heap)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct values the heap can index.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Stored entries in heap-array order.
    #[must_use]
    pub fn entries(&self) -> &[HeapEntry] {
        &self.entries
    }

    /// Returns the minimum entry without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&HeapEntry> {
        self.entries.first()
    }

    /// Returns the heap-array position currently holding `value`.
    #[must_use]
    pub fn search(&self, value: usize) -> Option<usize> {
        self.positions.get(value).copied().flatten()
    }

    /// Inserts an entry.
    ///
    /// # Errors
    /// Returns [`HeapError::ValueOutOfRange`] or [`HeapError::DuplicateValue`].
    pub fn push(&mut self, entry: HeapEntry) -> Result<(), HeapError> {
        let capacity = self.capacity();
        let slot = self
            .positions
            .get_mut(entry.value)
            .ok_or(HeapError::ValueOutOfRange {
                value: entry.value,
                capacity,
            })?;
        if slot.is_some() {
            return Err(HeapError::DuplicateValue { value: entry.value });
        }
        let position = self.entries.len();
        *slot = Some(position);
        self.entries.push(entry);
        self.sift_up(position);
        Ok(())
    }

    /// Removes and returns the minimum entry.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] when the heap holds no entries.
    pub fn pop(&mut self) -> Result<HeapEntry, HeapError> {
        if self.is_empty() {
            return Err(HeapError::Empty);
        }
        self.remove(0)
    }

    /// Removes the entry at heap-array `position`.
    ///
    /// # Errors
    /// Returns [`HeapError::PositionOutOfRange`] when `position >= len`.
    pub fn remove(&mut self, position: usize) -> Result<HeapEntry, HeapError> {
        let last = self.check_position(position)?;
        self.swap(position, last);
        let removed = self.entries.pop().ok_or(HeapError::Empty)?;
        if let Some(slot) = self.positions.get_mut(removed.value) {
            *slot = None;
        }
        if position < self.entries.len() {
            self.restore(position);
        }
        Ok(removed)
    }

    /// Replaces the entry at heap-array `position` and restores heap order by
    /// sifting in whichever direction the key moved.
    ///
    /// # Errors
    /// Returns [`HeapError::PositionOutOfRange`], or the value errors of
    /// [`IndexedMinHeap::push`] when `entry` carries a different value.
    pub fn update(&mut self, position: usize, entry: HeapEntry) -> Result<(), HeapError> {
        self.check_position(position)?;
        let previous = self.entries[position];
        if previous.value != entry.value {
            let capacity = self.capacity();
            match self.positions.get(entry.value) {
                None => {
                    return Err(HeapError::ValueOutOfRange {
                        value: entry.value,
                        capacity,
                    });
                }
                Some(Some(_)) => return Err(HeapError::DuplicateValue { value: entry.value }),
                Some(None) => {}
            }
            self.positions[previous.value] = None;
            self.positions[entry.value] = Some(position);
        }
        self.entries[position] = entry;
        if entry.key < previous.key {
            self.sift_up(position);
        } else if entry.key > previous.key {
            self.sift_down(position);
        }
        Ok(())
    }

    /// Changes the key stored for `value`.
    ///
    /// # Errors
    /// Returns [`HeapError::MissingValue`] when `value` is not stored.
    pub fn update_key(&mut self, value: usize, key: f64) -> Result<(), HeapError> {
        let position = self.search(value).ok_or(HeapError::MissingValue { value })?;
        self.update(position, HeapEntry::new(key, value))
    }

    /// Removes the entry stored for `value`.
    ///
    /// # Errors
    /// Returns [`HeapError::MissingValue`] when `value` is not stored.
    pub fn remove_value(&mut self, value: usize) -> Result<HeapEntry, HeapError> {
        let position = self.search(value).ok_or(HeapError::MissingValue { value })?;
        self.remove(position)
    }

    /// Validates `position` and returns the index of the last entry.
    fn check_position(&self, position: usize) -> Result<usize, HeapError> {
        let len = self.entries.len();
        if position < len {
            Ok(len - 1)
        } else {
            Err(HeapError::PositionOutOfRange { position, len })
        }
    }

    fn restore(&mut self, position: usize) {
        if self.sift_up(position) == position {
            self.sift_down(position);
        }
    }

    fn swap(&mut self, left: usize, right: usize) {
        if left == right {
            return;
        }
        self.entries.swap(left, right);
        let (left_value, right_value) = (self.entries[left].value, self.entries[right].value);
        self.positions[left_value] = Some(left);
        self.positions[right_value] = Some(right);
    }

    /// Moves the entry at `position` towards the root; returns where it lands.
    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.entries[position].key >= self.entries[parent].key {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.entries[right].key < self.entries[left].key {
                right
            } else {
                left
            };
            if self.entries[smallest].key >= self.entries[position].key {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }

    /// Checks the parent/child ordering and that the position table mirrors
    /// the entry array.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let ordered = (1..self.entries.len())
            .all(|child| self.entries[(child - 1) / 2].key <= self.entries[child].key);
        let indexed = self
            .entries
            .iter()
            .enumerate()
            .all(|(position, entry)| self.search(entry.value) == Some(position));
        let stored = self.positions.iter().flatten().count() == self.entries.len();
        ordered && indexed && stored
    }
}

#[cfg(test)]
mod tests;
