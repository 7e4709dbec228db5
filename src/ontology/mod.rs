use core::fmt::Debug;
use std::ops::BitOr;

use crate::term::{Term, TermGroup, TermInternal};
use crate::PhenoResult;
use crate::TermId;

mod termarena;
use termarena::Arena;

/// The directed acyclic graph of ontology terms
///
/// Edges represent `is-a` subsumption: a child term is a
/// specialization of its parent term(s).
///
/// The graph is populated by the loading layer via [`Ontology::insert_term`]
/// and [`Ontology::add_parent`] and finalized with
/// [`Ontology::create_cache`]. Afterwards it is only read.
#[derive(Default)]
pub struct Ontology {
    terms: Arena,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

/// Methods for setting up and building the Ontology
impl Ontology {
    /// Adds a term to the ontology, without connecting it to any other term
    ///
    /// # Examples
    ///
    /// ```
    /// use phenolr::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("Foo", 1u32);
    ///
    /// assert_eq!(ontology.len(), 1);
    /// ```
    pub fn insert_term<I: Into<TermId>>(&mut self, name: &str, id: I) -> TermId {
        let term = TermInternal::new(name.to_string(), id.into());
        let id = *term.id();
        self.terms.insert(term);
        id
    }

    /// Adds a connection from a term to its parent
    ///
    /// # Panics
    ///
    /// This method will panic if `parent_id` or `child_id` is not
    /// present in the Ontology
    ///
    /// # Examples
    ///
    /// ```
    /// use phenolr::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("Foo", 1u32);
    /// ontology.insert_term("Bar", 2u32);
    ///
    /// ontology.add_parent(1u32, 2u32);
    ///
    /// assert!(ontology.term(2u32.into()).unwrap().parent_ids().contains(&1u32.into()));
    /// ```
    pub fn add_parent<I: Into<TermId>, J: Into<TermId>>(&mut self, parent_id: I, child_id: J) {
        let parent_id = parent_id.into();
        let child_id = child_id.into();

        let parent = self.terms.get_unchecked_mut(parent_id);
        parent.add_child(child_id);

        let child = self.terms.get_unchecked_mut(child_id);
        child.add_parent(parent_id);
    }

    /// Creates and caches the transitive ancestor set of every term
    ///
    /// This method must be called once, after all terms and
    /// parent-child connections are added and before the first query.
    /// Since the results are cached, rerunning it will not cause a new
    /// calculation.
    ///
    /// # Examples
    ///
    /// ```
    /// use phenolr::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("Root", 1u32);
    /// ontology.insert_term("Foo", 2u32);
    /// ontology.insert_term("Bar", 3u32);
    ///
    /// ontology.add_parent(1u32, 2u32);
    /// ontology.add_parent(2u32, 3u32);
    ///
    /// // At this point #3 does not have info about grandparents
    /// assert!(!ontology.term(3u32.into()).unwrap().ancestor_ids().contains(&1u32.into()));
    ///
    /// ontology.create_cache();
    /// assert!(ontology.term(3u32.into()).unwrap().ancestor_ids().contains(&1u32.into()));
    /// ```
    pub fn create_cache(&mut self) {
        for id in self.terms.keys() {
            self.create_cache_of_grandparents(id);
        }
    }

    /// This method is part of the cache creation to link all terms to
    /// their direct and indirect parents (grandparents)
    ///
    /// It will (somewhat) recursively iterate all parents and copy all
    /// their parents. The recursion bubbles up to the top of the
    /// ontology and caches the ancestor set of every term it visits on
    /// the way back down, stopping early at terms that are already
    /// cached.
    fn create_cache_of_grandparents(&mut self, term_id: TermId) {
        let parents = self.terms.get_unchecked(term_id).parents().clone();
        let mut res = TermGroup::default();
        for parent in &parents {
            let grandparents = self.all_grandparents(parent);
            for gp in grandparents {
                res.insert(gp);
            }
        }
        let term = self.terms.get_unchecked_mut(term_id);
        *term.all_parents_mut() = res.bitor(&parents);
    }

    fn all_grandparents(&mut self, term_id: TermId) -> &TermGroup {
        if !self.terms.get_unchecked(term_id).parents_cached() {
            self.create_cache_of_grandparents(term_id);
        }
        self.terms.get_unchecked(term_id).all_parents()
    }
}

/// Public API of the Ontology
impl Ontology {
    pub(crate) fn get(&self, term_id: TermId) -> Option<&TermInternal> {
        self.terms.get(term_id)
    }

    /// Returns the [`Term`] with the given `TermId`
    ///
    /// # Errors
    ///
    /// If the term does not exist, a [`crate::PhenoError::TermDoesNotExist`]
    /// is returned
    pub fn term(&self, term_id: TermId) -> PhenoResult<Term> {
        Term::try_new(self, term_id)
    }

    /// Returns an iterator of all [`Term`]s of the ontology
    pub fn terms(&self) -> OntologyIterator {
        OntologyIterator {
            inner: self.terms.values(),
            ontology: self,
        }
    }

    /// Returns `true` if the term exists and has no parents
    pub fn is_root(&self, term_id: TermId) -> bool {
        self.terms
            .get(term_id)
            .map_or(false, |term| term.parents().is_empty())
    }

    /// Returns the number of terms in the ontology
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterates all [`Term`]s of the [`Ontology`]
pub struct OntologyIterator<'a> {
    inner: std::collections::hash_map::Values<'a, TermId, TermInternal>,
    ontology: &'a Ontology,
}

impl<'a> Iterator for OntologyIterator<'a> {
    type Item = Term<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|term| Term::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = Term<'a>;
    type IntoIter = OntologyIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms()
    }
}
