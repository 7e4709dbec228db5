use std::ops::{BitAnd, BitOr};

use smallvec::SmallVec;

use crate::TermId;

/// Number of [`TermId`]s a group can hold before spilling to the heap
///
/// Most groups hold the direct parents or children of a single term,
/// which stay well below this bound.
const GROUP_INLINE_SIZE: usize = 16;

/// A set of [`TermId`] representing a group of ontology terms
///
/// Each term can occur only once in the group and the ids are kept
/// sorted, so lookups and set algebra stay cheap.
///
/// This group is used e.g. for the set of parent or child terms
#[derive(Debug, Default, Clone)]
pub struct TermGroup {
    ids: SmallVec<[TermId; GROUP_INLINE_SIZE]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`TermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`TermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`TermId`] to the group
    ///
    /// Returns whether the `TermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `TermId`, true is returned.
    /// - If the group already contained this `TermId`, false is returned.
    ///
    pub fn insert(&mut self, id: TermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Adds a new [`TermId`] to the end of the group
    ///
    /// # Note
    ///
    /// This method will not check if the `TermId` already exists
    /// and does not maintain the sort order. The caller must guarantee
    /// both, otherwise lookups on the group become unreliable.
    fn insert_unchecked(&mut self, id: TermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`TermId`]
    pub fn contains(&self, id: &TermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`TermId`]s inside the group
    pub fn iter(&self) -> TermIds {
        TermIds::new(self.ids.iter())
    }
}

impl From<Vec<TermId>> for TermGroup {
    fn from(ids: Vec<TermId>) -> Self {
        let mut group = TermGroup::with_capacity(ids.len());
        for id in ids {
            group.insert(id);
        }
        group
    }
}

impl FromIterator<TermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = TermId>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = TermId;

    type IntoIter = TermIds<'a>;

    fn into_iter(self) -> TermIds<'a> {
        TermIds::new(self.ids.iter())
    }
}

/// An iterator over [`TermId`]s
pub struct TermIds<'a> {
    inner: std::slice::Iter<'a, TermId>,
}

impl<'a> TermIds<'a> {
    fn new(inner: std::slice::Iter<'a, TermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for TermIds<'a> {
    type Item = TermId;
    fn next(&mut self) -> Option<TermId> {
        self.inner.next().copied()
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len() + rhs.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &large.ids {
            group.insert_unchecked(*id);
        }
        for id in &small.ids {
            group.insert(*id);
        }
        group
    }
}

impl BitAnd for &TermGroup {
    type Output = TermGroup;

    fn bitand(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &small.ids {
            if large.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}
