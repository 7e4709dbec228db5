use std::fmt::Display;
use std::hash::Hash;

use crate::annotations::Frequency;
use crate::{PhenoError, PhenoResult, TermId};

/// A unique identifier for a disease
///
/// This value can - in theory - represent any numerical unique value.
/// When using the default JAX provided masterdata, it represents
/// the actual OMIM MIM ID.
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct DiseaseId {
    inner: u32,
}

impl TryFrom<&str> for DiseaseId {
    type Error = PhenoError;
    fn try_from(value: &str) -> PhenoResult<Self> {
        Ok(DiseaseId {
            inner: value.parse::<u32>()?,
        })
    }
}

impl From<u32> for DiseaseId {
    fn from(inner: u32) -> Self {
        DiseaseId { inner }
    }
}

impl Display for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OMIM:{}", self.inner)
    }
}

/// A single phenotype annotation of a disease
///
/// Combines the annotated [`TermId`] with the [`Frequency`] the term
/// is observed in patients of the disease.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedTerm {
    term_id: TermId,
    frequency: Frequency,
}

impl AnnotatedTerm {
    /// Constructs a new [`AnnotatedTerm`]
    pub fn new(term_id: TermId, frequency: Frequency) -> Self {
        Self { term_id, frequency }
    }

    /// Returns the [`TermId`] of the annotated term
    pub fn term_id(&self) -> &TermId {
        &self.term_id
    }

    /// Returns the observed [`Frequency`] of the term in the disease
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }
}

/// A disease and its phenotype annotations
///
/// Annotations keep their insertion order. The frequency estimator
/// probes them in exactly this order, so the order decides ties
/// between equally related annotated terms.
#[derive(Debug, Clone)]
pub struct DiseaseAnnotations {
    id: DiseaseId,
    name: String,
    annotations: Vec<AnnotatedTerm>,
}

impl DiseaseAnnotations {
    /// Initializes a new, unannotated disease
    pub fn new(id: DiseaseId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            annotations: Vec::new(),
        }
    }

    /// The unique [`DiseaseId`] of the disease, the OMIM MIM number
    pub fn id(&self) -> &DiseaseId {
        &self.id
    }

    /// The disease name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a phenotype annotation to the disease
    ///
    /// Returns whether the annotation was newly inserted. A second
    /// annotation with an already present [`TermId`] is ignored, so
    /// the first insertion wins and the enumeration order stays
    /// stable.
    pub fn add_annotation(&mut self, annotation: AnnotatedTerm) -> bool {
        if self.annotated_term(annotation.term_id()).is_some() {
            return false;
        }
        self.annotations.push(annotation);
        true
    }

    /// Returns the annotation of the given term, if present
    pub fn annotated_term(&self, term_id: &TermId) -> Option<&AnnotatedTerm> {
        self.annotations
            .iter()
            .find(|annotation| annotation.term_id() == term_id)
    }

    /// Returns an iterator of all annotations in enumeration order
    pub fn annotations(&self) -> std::slice::Iter<'_, AnnotatedTerm> {
        self.annotations.iter()
    }

    /// Returns the number of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if the disease has no annotations
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl PartialEq for DiseaseAnnotations {
    fn eq(&self, other: &DiseaseAnnotations) -> bool {
        self.id == other.id
    }
}

impl Eq for DiseaseAnnotations {}

impl Hash for DiseaseAnnotations {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
