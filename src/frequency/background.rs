use std::collections::HashMap;

use tracing::debug;

use crate::annotations::DiseaseCorpus;
use crate::{Ontology, TermId};

/// The population-wide frequency of every ontology term
///
/// For each disease annotation, the annotated frequency is credited to
/// the term and to all of its ancestors, so a specific observation
/// also counts towards every broader category it belongs to. The
/// accumulated totals are normalized by the number of diseases in the
/// corpus, placing every value in `[0, 1]`.
///
/// The index is built exactly once and never mutated afterwards.
#[derive(Debug, Default)]
pub struct BackgroundIndex {
    frequencies: HashMap<TermId, f64>,
}

impl BackgroundIndex {
    /// Builds the background index from the full annotation corpus
    ///
    /// Annotated terms that are missing from the ontology are still
    /// indexed with their own accumulated frequency; annotation data
    /// may reference terms outside the phenotype subontology.
    ///
    /// An empty corpus yields an index where every ontology term maps
    /// to `0.0`.
    pub fn build(ontology: &Ontology, corpus: &DiseaseCorpus) -> Self {
        let mut frequencies: HashMap<TermId, f64> = HashMap::with_capacity(ontology.len());
        for term in ontology.terms() {
            frequencies.insert(*term.id(), 0.0);
        }

        for disease in corpus.diseases() {
            for annotation in disease.annotations() {
                let delta = annotation.frequency().upper();
                let term_id = *annotation.term_id();
                *frequencies.entry(term_id).or_insert(0.0) += delta;
                if let Ok(term) = ontology.term(term_id) {
                    for ancestor in term.ancestor_ids() {
                        *frequencies.entry(ancestor).or_insert(0.0) += delta;
                    }
                }
            }
        }

        let n_diseases = corpus.len();
        if n_diseases > 0 {
            let n = n_diseases as f64;
            for frequency in frequencies.values_mut() {
                // a disease annotating several descendants of one term
                // can credit that term more than once
                *frequency = (*frequency / n).min(1.0);
            }
        }

        debug!("background frequencies for {} terms", frequencies.len());
        Self { frequencies }
    }

    /// Returns the background frequency of the given term
    ///
    /// Terms that are neither part of the ontology nor of any
    /// annotation have a background frequency of `0.0`.
    pub fn frequency(&self, term_id: &TermId) -> f64 {
        self.frequencies.get(term_id).copied().unwrap_or(0.0)
    }

    /// Returns the number of indexed terms
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns `true` if no terms are indexed
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::annotations::{AnnotatedTerm, DiseaseAnnotations, Frequency};

    fn annotation(term: u32, frequency: f64) -> AnnotatedTerm {
        AnnotatedTerm::new(term.into(), Frequency::try_from(frequency).unwrap())
    }

    /// Root (1) -> Mid (2) -> Leaf (3), Leaf2 (4)
    fn small_ontology() -> Ontology {
        let mut ontology = Ontology::default();
        ontology.insert_term("Root", 1u32);
        ontology.insert_term("Mid", 2u32);
        ontology.insert_term("Leaf", 3u32);
        ontology.insert_term("Leaf2", 4u32);
        ontology.add_parent(1u32, 2u32);
        ontology.add_parent(2u32, 3u32);
        ontology.add_parent(2u32, 4u32);
        ontology.create_cache();
        ontology
    }

    #[test]
    fn propagation_and_normalization() {
        let ontology = small_ontology();
        let mut corpus = DiseaseCorpus::new();

        let mut d1 = DiseaseAnnotations::new(100u32.into(), "D1");
        d1.add_annotation(annotation(3, 0.8));
        corpus.insert(d1);

        let mut d2 = DiseaseAnnotations::new(200u32.into(), "D2");
        d2.add_annotation(annotation(4, 0.4));
        corpus.insert(d2);

        let index = BackgroundIndex::build(&ontology, &corpus);

        // Leaf terms only carry their own annotation
        assert!((index.frequency(&3u32.into()) - 0.4).abs() < f64::EPSILON);
        assert!((index.frequency(&4u32.into()) - 0.2).abs() < f64::EPSILON);
        // Ancestors accumulate both annotations
        assert!((index.frequency(&2u32.into()) - 0.6).abs() < f64::EPSILON);
        assert!((index.frequency(&1u32.into()) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn values_stay_in_range() {
        let ontology = small_ontology();
        let mut corpus = DiseaseCorpus::new();
        for id in [100u32, 200u32, 300u32] {
            let mut disease = DiseaseAnnotations::new(id.into(), "D");
            disease.add_annotation(annotation(3, 1.0));
            disease.add_annotation(annotation(4, 1.0));
            corpus.insert(disease);
        }

        let index = BackgroundIndex::build(&ontology, &corpus);
        for term in ontology.terms() {
            let frequency = index.frequency(term.id());
            assert!((0.0..=1.0).contains(&frequency));
        }
    }

    #[test]
    fn term_outside_the_ontology() {
        let ontology = small_ontology();
        let mut corpus = DiseaseCorpus::new();
        let mut disease = DiseaseAnnotations::new(100u32.into(), "D");
        disease.add_annotation(annotation(99, 0.6));
        corpus.insert(disease);

        let index = BackgroundIndex::build(&ontology, &corpus);
        assert!((index.frequency(&99u32.into()) - 0.6).abs() < f64::EPSILON);
        // no propagation without ontology placement
        assert!(index.frequency(&1u32.into()).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_corpus() {
        let ontology = small_ontology();
        let corpus = DiseaseCorpus::new();
        let index = BackgroundIndex::build(&ontology, &corpus);

        assert_eq!(index.len(), 4);
        for term in ontology.terms() {
            assert!(index.frequency(term.id()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn empty_ontology() {
        let ontology = Ontology::default();
        let corpus = DiseaseCorpus::new();
        let index = BackgroundIndex::build(&ontology, &corpus);
        assert!(index.is_empty());
    }
}
