use crate::annotations::{AnnotatedTerm, DiseaseAnnotations, DiseaseCorpus, DiseaseId};
use crate::frequency::{BackgroundIndex, TermRelation, UNRELATED_TERM_FREQUENCY};
use crate::term::TermGroup;
use crate::{Ontology, PhenoResult, TermId};

/// Tier values must stay within `(0, 1]`. Algebraic edge cases
/// (empty ancestor sets, vanishing frequencies) fall back to the
/// unrelated-term probability instead of returning zero, and the
/// superclass ancestor sum can exceed one on deep ontologies.
fn sanitize(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        UNRELATED_TERM_FREQUENCY
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Estimates how frequently patients of a disease present with a term
///
/// The estimator probes the disease's annotations tier by tier and
/// derives the frequency from the first relationship it finds:
///
/// ```mermaid
/// graph TD
///     A[query term] --> B{identical}
///     B -->|no| C{direct parent}
///     C -->|no| D{direct child}
///     D -->|no| E{sibling}
///     E -->|no| F{related}
///     F -->|no| G[unrelated fallback]
/// ```
///
/// All lookups run against the immutable [`Ontology`],
/// [`DiseaseCorpus`] and [`BackgroundIndex`], so concurrent queries
/// need no synchronization.
///
/// # Examples
///
/// ```
/// use phenolr::annotations::{AnnotatedTerm, DiseaseAnnotations, DiseaseCorpus, Frequency};
/// use phenolr::{FrequencyEstimator, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("Root", 1u32);
/// ontology.insert_term("Seizure", 2u32);
/// ontology.add_parent(1u32, 2u32);
/// ontology.create_cache();
///
/// let mut corpus = DiseaseCorpus::new();
/// let mut disease = DiseaseAnnotations::new(100u32.into(), "FooBar syndrome");
/// disease.add_annotation(AnnotatedTerm::new(
///     2u32.into(),
///     Frequency::try_from(0.9).unwrap(),
/// ));
/// corpus.insert(disease);
///
/// let estimator = FrequencyEstimator::new(&ontology, &corpus);
/// let frequency = estimator
///     .estimate_frequency(2u32.into(), &100u32.into())
///     .unwrap();
/// assert!((frequency - 0.9).abs() < f64::EPSILON);
/// ```
pub struct FrequencyEstimator<'a> {
    ontology: &'a Ontology,
    corpus: &'a DiseaseCorpus,
    background: BackgroundIndex,
}

impl<'a> FrequencyEstimator<'a> {
    /// Constructs a new [`FrequencyEstimator`]
    ///
    /// Building the estimator computes the [`BackgroundIndex`] for the
    /// full corpus, a one-shot bulk computation. Queries afterwards
    /// are pure reads.
    pub fn new(ontology: &'a Ontology, corpus: &'a DiseaseCorpus) -> Self {
        let background = BackgroundIndex::build(ontology, corpus);
        Self {
            ontology,
            corpus,
            background,
        }
    }

    /// Returns the background frequency index of the corpus
    pub fn background(&self) -> &BackgroundIndex {
        &self.background
    }

    /// Returns the underlying ontology
    pub fn ontology(&self) -> &Ontology {
        self.ontology
    }

    /// Returns the underlying disease corpus
    pub fn corpus(&self) -> &DiseaseCorpus {
        self.corpus
    }

    /// Estimates the frequency of `query` in patients of the disease
    ///
    /// The returned value always lies in `(0, 1]`; when the query
    /// shares no identifiable relationship with any annotated term,
    /// the fixed [`UNRELATED_TERM_FREQUENCY`] is returned.
    ///
    /// # Errors
    ///
    /// If the disease is not part of the corpus, a
    /// [`crate::PhenoError::DiseaseDoesNotExist`] is returned
    pub fn estimate_frequency(&self, query: TermId, disease_id: &DiseaseId) -> PhenoResult<f64> {
        let disease = self.corpus.record_for(disease_id)?;
        Ok(self.estimate_for_record(query, disease))
    }

    /// Classifies the relationship between `query` and the disease's
    /// best-matching annotated term
    ///
    /// # Errors
    ///
    /// If the disease is not part of the corpus, a
    /// [`crate::PhenoError::DiseaseDoesNotExist`] is returned
    pub fn relation(&self, query: TermId, disease_id: &DiseaseId) -> PhenoResult<TermRelation> {
        let disease = self.corpus.record_for(disease_id)?;
        Ok(self
            .best_match(query, disease)
            .map_or(TermRelation::Unrelated, |(_, relation)| relation))
    }

    fn estimate_for_record(&self, query: TermId, disease: &DiseaseAnnotations) -> f64 {
        match self.best_match(query, disease) {
            Some((annotation, relation)) => {
                sanitize(self.adjusted_frequency(query, annotation, relation, disease))
            }
            None => UNRELATED_TERM_FREQUENCY,
        }
    }

    /// Finds the best-matching annotated term of the disease
    ///
    /// Tiers are evaluated strictly in priority order; within a tier
    /// the annotations are probed in their enumeration order and the
    /// first match wins.
    fn best_match<'b>(
        &self,
        query: TermId,
        disease: &'b DiseaseAnnotations,
    ) -> Option<(&'b AnnotatedTerm, TermRelation)> {
        for annotation in disease.annotations() {
            if *annotation.term_id() == query {
                return Some((annotation, TermRelation::Identical));
            }
        }
        for annotation in disease.annotations() {
            if let Ok(annotated) = self.ontology.term(*annotation.term_id()) {
                if annotated.parent_ids().contains(&query) {
                    return Some((annotation, TermRelation::Superclass));
                }
            }
        }
        for annotation in disease.annotations() {
            if let Ok(annotated) = self.ontology.term(*annotation.term_id()) {
                if annotated.children_ids().contains(&query) {
                    return Some((annotation, TermRelation::Subclass));
                }
            }
        }
        for annotation in disease.annotations() {
            if let (Ok(query_term), Ok(annotated)) = (
                self.ontology.term(query),
                self.ontology.term(*annotation.term_id()),
            ) {
                if query_term.sibling_of(&annotated) {
                    return Some((annotation, TermRelation::Sibling));
                }
            }
        }
        for annotation in disease.annotations() {
            if let Some(level) = self.related_level(query, *annotation.term_id()) {
                return Some((annotation, TermRelation::Related { level }));
            }
        }
        None
    }

    fn adjusted_frequency(
        &self,
        query: TermId,
        annotation: &AnnotatedTerm,
        relation: TermRelation,
        disease: &DiseaseAnnotations,
    ) -> f64 {
        match relation {
            TermRelation::Identical => annotation.frequency().upper(),
            TermRelation::Superclass => self.superclass_frequency(query),
            TermRelation::Subclass => self.subclass_frequency(annotation),
            TermRelation::Sibling => self.sibling_frequency(annotation, disease),
            TermRelation::Related { level } => self.related_frequency(annotation, disease, level),
            TermRelation::Unrelated => UNRELATED_TERM_FREQUENCY,
        }
    }

    /// The query subsumes an annotated term, so it covers at least the
    /// disease-relevant specificity of all of its own ancestors:
    /// their background frequencies are summed up.
    fn superclass_frequency(&self, query: TermId) -> f64 {
        match self.ontology.term(query) {
            Ok(term) => term
                .ancestors()
                .map(|ancestor| self.background.frequency(ancestor.id()))
                .sum(),
            Err(_) => UNRELATED_TERM_FREQUENCY,
        }
    }

    /// The annotated term subsumes the query: its frequency mass is
    /// assumed to distribute uniformly across its direct children.
    fn subclass_frequency(&self, annotation: &AnnotatedTerm) -> f64 {
        let Ok(annotated) = self.ontology.term(*annotation.term_id()) else {
            return UNRELATED_TERM_FREQUENCY;
        };
        let n_children = annotated.children_ids().len();
        if n_children == 0 {
            return UNRELATED_TERM_FREQUENCY;
        }
        annotation.frequency().upper() / n_children as f64
    }

    /// Query and annotated term share a parent: the parent's estimated
    /// frequency is split across its children. With more than one
    /// parent the relationship is ambiguous and the unrelated-term
    /// probability is used instead.
    fn sibling_frequency(&self, annotation: &AnnotatedTerm, disease: &DiseaseAnnotations) -> f64 {
        let Ok(annotated) = self.ontology.term(*annotation.term_id()) else {
            return UNRELATED_TERM_FREQUENCY;
        };
        let parents = annotated.parent_ids();
        if parents.len() != 1 {
            return UNRELATED_TERM_FREQUENCY;
        }
        let Some(parent) = parents.iter().next() else {
            return UNRELATED_TERM_FREQUENCY;
        };
        let Ok(parent_term) = self.ontology.term(parent) else {
            return UNRELATED_TERM_FREQUENCY;
        };
        let n_children = parent_term.children_ids().len();
        if n_children == 0 {
            return UNRELATED_TERM_FREQUENCY;
        }
        // the parent of an annotated term resolves at the superclass
        // tier or better, so this recursion ends after one step
        self.estimate_for_record(parent, disease) / n_children as f64
    }

    /// The sibling-tier value of the annotated term, attenuated by the
    /// number of ancestor generations between it and the query.
    fn related_frequency(
        &self,
        annotation: &AnnotatedTerm,
        disease: &DiseaseAnnotations,
        level: usize,
    ) -> f64 {
        self.sibling_frequency(annotation, disease) / (1.0 + (level as f64).ln())
    }

    /// Walks ancestor generations upward from the annotated term until
    /// one generation's children contain the query.
    ///
    /// Returns the generation count on a match. Reaching a root
    /// generation or an empty frontier ends the walk without a match.
    fn related_level(&self, query: TermId, annotated: TermId) -> Option<usize> {
        let mut frontier = TermGroup::default();
        frontier.insert(annotated);
        let mut level = 0usize;

        while !frontier.is_empty() {
            level += 1;
            let mut parents = TermGroup::default();
            for id in &frontier {
                if let Ok(term) = self.ontology.term(id) {
                    for parent in term.parents() {
                        parents.insert(*parent.id());
                    }
                }
            }
            // root terms subsume everything, a match through them
            // would not indicate a shared organ system
            for parent in &parents {
                if self.ontology.is_root(parent) {
                    continue;
                }
                if let Ok(term) = self.ontology.term(parent) {
                    if term.children_ids().contains(&query) {
                        return Some(level);
                    }
                }
            }
            if parents.iter().any(|parent| self.ontology.is_root(parent)) {
                return None;
            }
            frontier = parents;
        }
        None
    }
}
