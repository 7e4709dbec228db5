use crate::term::internal::TermInternal;
use crate::term::{TermChildren, TermGroup, TermIds, TermParents};
use crate::Ontology;
use crate::PhenoError;
use crate::PhenoResult;
use crate::TermId;

/// A single term of the ontology, borrowed from the [`Ontology`]
///
/// The term provides access to its name and its position in the
/// ontology graph: direct parents and children and the transitive
/// set of ancestors.
#[derive(Debug, Clone, Copy)]
pub struct Term<'a> {
    id: &'a TermId,
    name: &'a str,
    parents: &'a TermParents,
    all_parents: &'a TermParents,
    children: &'a TermChildren,
    ontology: &'a Ontology,
}

impl<'a> Term<'a> {
    /// Constructs a new [`Term`]
    ///
    /// # Errors
    ///
    /// If the given [`TermId`] does not match an existing term
    /// it returns an Error
    pub fn try_new(ontology: &'a Ontology, term_id: TermId) -> PhenoResult<Term<'a>> {
        let term = ontology.get(term_id).ok_or(PhenoError::TermDoesNotExist)?;
        Ok(Term::new(ontology, term))
    }

    /// Constructs a new [`Term`] from a `TermInternal`
    pub(crate) fn new(ontology: &'a Ontology, term: &'a TermInternal) -> Term<'a> {
        Term {
            id: term.id(),
            name: term.name(),
            parents: term.parents(),
            all_parents: term.all_parents(),
            children: term.children(),
            ontology,
        }
    }

    /// Returns the [`TermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> &TermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the [`TermId`]s of the direct parents
    pub fn parent_ids(&self) -> &TermParents {
        self.parents
    }

    /// Returns the [`TermId`]s of all direct and indirect parents
    ///
    /// The term itself is not part of its ancestor set.
    pub fn ancestor_ids(&self) -> &TermParents {
        self.all_parents
    }

    /// Returns the [`TermId`]s of the direct children
    pub fn children_ids(&self) -> &TermChildren {
        self.children
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> Terms<'a> {
        Terms::new(self.parents, self.ontology)
    }

    /// Returns an iterator of the direct and indirect parents of the term
    pub fn ancestors(&self) -> Terms<'a> {
        Terms::new(self.all_parents, self.ontology)
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> Terms<'a> {
        Terms::new(self.children, self.ontology)
    }

    /// Returns `true` if the term has no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if `self` and `other` share at least one direct parent
    pub fn sibling_of(&self, other: &Term) -> bool {
        self.id != other.id && !(self.parent_ids() & other.parent_ids()).is_empty()
    }
}

/// Iterates the [`Term`]s of a borrowed [`TermGroup`]
///
/// Ids without a matching term in the ontology are skipped, since
/// annotation data may reference terms outside the phenotype
/// subontology.
pub struct Terms<'a> {
    ids: TermIds<'a>,
    ontology: &'a Ontology,
}

impl<'a> Terms<'a> {
    pub(crate) fn new(group: &'a TermGroup, ontology: &'a Ontology) -> Self {
        Terms {
            ids: group.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for Terms<'a> {
    type Item = Term<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.ids.next() {
                Some(id) => {
                    if let Some(term) = self.ontology.get(id) {
                        return Some(Term::new(self.ontology, term));
                    }
                }
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn small_ontology() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.insert_term("Root", 1u32);
        ontology.insert_term("Organ abnormality", 2u32);
        ontology.insert_term("Heart defect", 3u32);
        ontology.insert_term("Lung defect", 4u32);
        ontology.add_parent(1u32, 2u32);
        ontology.add_parent(2u32, 3u32);
        ontology.add_parent(2u32, 4u32);
        ontology.create_cache();
        ontology
    }

    #[test]
    fn traversal() {
        let ontology = small_ontology();
        let heart = ontology.term(3u32.into()).unwrap();

        assert_eq!(heart.name(), "Heart defect");
        assert!(heart.parent_ids().contains(&2u32.into()));
        assert!(heart.ancestor_ids().contains(&1u32.into()));
        assert!(!heart.ancestor_ids().contains(&3u32.into()));
        assert!(heart.children_ids().is_empty());

        let names: Vec<&str> = heart.ancestors().map(|t| t.name()).collect();
        assert_eq!(names.len(), 2);

        let organ = ontology.term(2u32.into()).unwrap();
        assert_eq!(organ.children().count(), 2);
    }

    #[test]
    fn roots_and_siblings() {
        let ontology = small_ontology();
        let root = ontology.term(1u32.into()).unwrap();
        let heart = ontology.term(3u32.into()).unwrap();
        let lung = ontology.term(4u32.into()).unwrap();

        assert!(root.is_root());
        assert!(!heart.is_root());
        assert!(heart.sibling_of(&lung));
        assert!(!heart.sibling_of(&heart));
        assert!(!heart.sibling_of(&root));
    }

    #[test]
    fn missing_term() {
        let ontology = small_ontology();
        assert_eq!(
            Term::try_new(&ontology, 99u32.into()).unwrap_err(),
            PhenoError::TermDoesNotExist
        );
    }
}
