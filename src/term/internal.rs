use crate::term::{TermChildren, TermId, TermParents};
use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_PARENTS};

/// The arena-owned representation of an ontology term
///
/// Clients interact with terms through the borrowed [`crate::Term`]
/// view instead.
#[derive(Debug)]
pub(crate) struct TermInternal {
    id: TermId,
    name: String,
    parents: TermParents,
    all_parents: TermParents,
    children: TermChildren,
}

impl TermInternal {
    pub fn new(name: String, id: TermId) -> TermInternal {
        TermInternal {
            id,
            name,
            parents: TermParents::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: TermParents::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            children: TermChildren::with_capacity(DEFAULT_NUM_PARENTS),
        }
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &TermParents {
        &self.parents
    }

    pub fn children(&self) -> &TermChildren {
        &self.children
    }

    pub fn all_parents(&self) -> &TermParents {
        &self.all_parents
    }

    pub fn all_parents_mut(&mut self) -> &mut TermParents {
        &mut self.all_parents
    }

    /// A term without parents needs no cache, so it counts as cached
    pub fn parents_cached(&self) -> bool {
        if self.parents.is_empty() {
            true
        } else {
            !self.all_parents.is_empty()
        }
    }

    pub fn add_parent(&mut self, parent_id: TermId) {
        self.parents.insert(parent_id);
    }

    pub fn add_child(&mut self, child_id: TermId) {
        self.children.insert(child_id);
    }
}

impl PartialEq for TermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TermInternal {}
