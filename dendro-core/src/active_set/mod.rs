//! Removal-only ordered set over the index range `[0, n)`.
//!
//! The merge loop needs to walk the surviving cluster representatives in
//! ascending order and to retire one representative per merge. Indices are
//! never re-added, so the set is an array of forward links with back links
//! for O(1) splicing. A retired slot holds [`Link::Removed`], a marker that
//! can never be mistaken for a live index.

/// Forward/backward link stored per index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Live {
        prev: Option<usize>,
        next: usize,
    },
    Removed {
        /// Successor at the time of removal; may itself be removed later.
        next: usize,
    },
}

/// Ordered set of active indices supporting O(1) removal.
///
/// Traversal from [`ActiveSet::begin`] via repeated [`ActiveSet::next`] visits
/// exactly the active indices in ascending order and stops at
/// [`ActiveSet::end`].
///
/// # Examples
/// ```
/// use dendro_core::ActiveSet;
///
/// let mut set = ActiveSet::new(4);
/// assert!(set.remove(0));
/// assert!(set.remove(2));
/// assert_eq!(set.iter().collect::<Vec<_>>(), [1, 3]);
/// assert_eq!(set.begin(), 1);
/// assert_eq!(set.next(1), 3);
/// assert_eq!(set.next(3), set.end());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    links: Vec<Link>,
    first: usize,
    size: usize,
}

impl ActiveSet {
    /// Creates a set with every index in `[0, n)` active.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let links = (0..n)
            .map(|index| Link::Live {
                prev: index.checked_sub(1),
                next: index + 1,
            })
            .collect();
        Self {
            links,
            first: 0,
            size: n,
        }
    }

    /// Returns the smallest active index, or [`ActiveSet::end`] when empty.
    #[must_use]
    pub fn begin(&self) -> usize {
        self.first
    }

    /// Returns the sentinel that terminates traversal. Never a valid index.
    #[must_use]
    pub fn end(&self) -> usize {
        self.links.len()
    }

    /// Returns the smallest active index greater than `index`.
    ///
    /// Works for retired indices too: the successor recorded at removal time
    /// is followed past any slots retired since. Out-of-range input yields
    /// [`ActiveSet::end`].
    ///
    /// O(1) for an active `index`. For a retired one the walk costs one step
    /// per index retired after it along the chain, so O(n) in the worst case.
    /// The merge loop only calls this on active indices.
    #[must_use]
    pub fn next(&self, index: usize) -> usize {
        match self.links.get(index) {
            Some(Link::Live { next, .. }) => *next,
            Some(Link::Removed { next }) => self.first_live_from(*next),
            None => self.end(),
        }
    }

    fn first_live_from(&self, mut index: usize) -> usize {
        while let Some(Link::Removed { next }) = self.links.get(index) {
            index = *next;
        }
        index.min(self.end())
    }

    /// Returns whether `index` is still active.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        matches!(self.links.get(index), Some(Link::Live { .. }))
    }

    /// Returns the number of active indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when every index has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Retires `index`. Returns `false` without changing anything when the
    /// index is out of range or already retired.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(&Link::Live { prev, next }) = self.links.get(index) else {
            return false;
        };

        if self.first == index {
            self.first = next;
        }
        if let Some(Link::Live { next: successor, .. }) = prev.and_then(|p| self.links.get_mut(p))
        {
            *successor = next;
        }
        if let Some(Link::Live {
            prev: predecessor, ..
        }) = self.links.get_mut(next)
        {
            *predecessor = prev;
        }
        if let Some(slot) = self.links.get_mut(index) {
            *slot = Link::Removed { next };
        }
        self.size -= 1;
        true
    }

    /// Iterates the active indices in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            cursor: self.first,
        }
    }

    /// Iterates the active indices strictly greater than `index`.
    #[must_use]
    pub fn iter_after(&self, index: usize) -> Iter<'_> {
        Iter {
            set: self,
            cursor: self.next(index),
        }
    }
}

/// Ascending iterator over an [`ActiveSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    set: &'a ActiveSet,
    cursor: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.set.end() {
            return None;
        }
        let current = self.cursor;
        self.cursor = self.set.next(current);
        Some(current)
    }
}

impl<'a> IntoIterator for &'a ActiveSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
