use std::collections::hash_map::Values;
use std::collections::HashMap;

use crate::term::TermInternal;
use crate::TermId;

pub(crate) struct Arena {
    terms: HashMap<TermId, TermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: TermInternal) {
        let id = term.id();
        self.terms.insert(*id, term);
    }

    pub fn get(&self, id: TermId) -> Option<&TermInternal> {
        self.terms.get(&id)
    }

    pub fn get_unchecked(&self, id: TermId) -> &TermInternal {
        self.terms.get(&id).unwrap()
    }

    pub fn get_unchecked_mut(&mut self, id: TermId) -> &mut TermInternal {
        self.terms.get_mut(&id).unwrap()
    }

    pub fn values(&self) -> Values<'_, TermId, TermInternal> {
        self.terms.values()
    }

    pub fn keys(&self) -> Vec<TermId> {
        self.terms.keys().copied().collect()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(20_000),
        }
    }
}
