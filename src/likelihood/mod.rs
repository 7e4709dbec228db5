//! Likelihood-ratio tests of an observed phenotype profile
//!
//! For every candidate disease, the ratio between the disease-specific
//! frequency estimate and the population-wide background frequency of
//! each observed term quantifies how much the observation speaks for
//! or against the disease. The per-term ratios combine into a
//! composite likelihood ratio, which updates a uniform pretest
//! probability into the posttest probability the diseases are ranked
//! by.

use std::cmp::Ordering;

use crate::annotations::DiseaseId;
use crate::frequency::{FrequencyEstimator, UNRELATED_TERM_FREQUENCY};
use crate::term::TermGroup;
use crate::{PhenoResult, TermId};

/// The outcome of testing one disease against a phenotype profile
#[derive(Debug, Clone)]
pub struct TestResult {
    disease_id: DiseaseId,
    pretest_probability: f64,
    term_ratios: Vec<(TermId, f64)>,
    composite_ratio: f64,
    posttest_probability: f64,
    rank: usize,
}

impl TestResult {
    fn new(disease_id: DiseaseId, pretest_probability: f64, term_ratios: Vec<(TermId, f64)>) -> Self {
        let composite_ratio = term_ratios.iter().map(|(_, ratio)| ratio).product();
        let posttest_probability = posttest(pretest_probability, composite_ratio);
        Self {
            disease_id,
            pretest_probability,
            term_ratios,
            composite_ratio,
            posttest_probability,
            rank: 0,
        }
    }

    /// Returns the [`DiseaseId`] of the tested disease
    pub fn disease_id(&self) -> &DiseaseId {
        &self.disease_id
    }

    /// Returns the 1-based rank of the disease in the ranking
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the pretest probability of the disease
    pub fn pretest_probability(&self) -> f64 {
        self.pretest_probability
    }

    /// Returns the posttest probability of the disease
    pub fn posttest_probability(&self) -> f64 {
        self.posttest_probability
    }

    /// Returns the composite likelihood ratio over all query terms
    pub fn composite_ratio(&self) -> f64 {
        self.composite_ratio
    }

    /// Returns the per-term likelihood ratios in query enumeration order
    pub fn term_ratios(&self) -> std::slice::Iter<'_, (TermId, f64)> {
        self.term_ratios.iter()
    }
}

/// Updates the pretest probability with the likelihood ratio, using
/// the odds form of Bayes' theorem
fn posttest(pretest_probability: f64, likelihood_ratio: f64) -> f64 {
    let pretest_odds = pretest_probability / (1.0 - pretest_probability);
    let posttest_odds = pretest_odds * likelihood_ratio;
    if posttest_odds.is_finite() {
        posttest_odds / (1.0 + posttest_odds)
    } else {
        1.0
    }
}

/// The likelihood ratio of observing `query` in patients of the disease
///
/// A background frequency of zero falls back to the unrelated-term
/// probability to keep the ratio finite.
///
/// # Errors
///
/// If the disease is not part of the corpus, a
/// [`crate::PhenoError::DiseaseDoesNotExist`] is returned
pub fn term_ratio(
    estimator: &FrequencyEstimator,
    query: TermId,
    disease_id: &DiseaseId,
) -> PhenoResult<f64> {
    let estimate = estimator.estimate_frequency(query, disease_id)?;
    let mut background = estimator.background().frequency(&query);
    if background <= 0.0 {
        background = UNRELATED_TERM_FREQUENCY;
    }
    Ok(estimate / background)
}

/// Tests every disease of the corpus against the phenotype profile
///
/// All diseases start from the same uniform pretest probability. The
/// returned results are sorted by descending posttest probability with
/// their 1-based rank assigned; ties are broken by disease id, so
/// repeated runs return the same order.
///
/// # Errors
///
/// Currently infallible in practice since every queried disease comes
/// from the corpus itself, but kept fallible to match the estimator's
/// signature.
pub fn rank_diseases(
    estimator: &FrequencyEstimator,
    query: &TermGroup,
) -> PhenoResult<Vec<TestResult>> {
    let n_diseases = estimator.corpus().len();
    if n_diseases == 0 {
        return Ok(Vec::new());
    }
    let pretest_probability = 1.0 / n_diseases as f64;

    let mut disease_ids: Vec<DiseaseId> = estimator
        .corpus()
        .diseases()
        .map(|disease| *disease.id())
        .collect();
    disease_ids.sort_unstable();

    let mut results = Vec::with_capacity(n_diseases);
    for disease_id in disease_ids {
        let mut term_ratios = Vec::with_capacity(query.len());
        for term in query {
            term_ratios.push((term, term_ratio(estimator, term, &disease_id)?));
        }
        results.push(TestResult::new(disease_id, pretest_probability, term_ratios));
    }

    results.sort_by(|a, b| {
        b.posttest_probability
            .partial_cmp(&a.posttest_probability)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.disease_id.cmp(&b.disease_id))
    });
    for (idx, result) in results.iter_mut().enumerate() {
        result.rank = idx + 1;
    }
    Ok(results)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::annotations::{AnnotatedTerm, DiseaseAnnotations, DiseaseCorpus, Frequency};
    use crate::Ontology;

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

    fn two_disease_corpus() -> DiseaseCorpus {
        let mut corpus = DiseaseCorpus::new();

        let mut d1 = DiseaseAnnotations::new(100u32.into(), "matching");
        d1.add_annotation(annotation(3, 0.9));
        corpus.insert(d1);

        let mut d2 = DiseaseAnnotations::new(200u32.into(), "other");
        d2.add_annotation(annotation(4, 0.1));
        corpus.insert(d2);

        corpus
    }

    #[test]
    fn composite_is_product_of_term_ratios() {
        let ontology = small_ontology();
        let corpus = two_disease_corpus();
        let estimator = FrequencyEstimator::new(&ontology, &corpus);

        let query: TermGroup = vec![3u32.into(), 2u32.into()].into();
        let results = rank_diseases(&estimator, &query).unwrap();

        for result in &results {
            let product: f64 = result.term_ratios().map(|(_, ratio)| ratio).product();
            assert!((result.composite_ratio() - product).abs() < 1e-12);
            assert_eq!(result.term_ratios().count(), 2);
        }
    }

    #[test]
    fn ranking_is_descending_with_consecutive_ranks() {
        let ontology = small_ontology();
        let corpus = two_disease_corpus();
        let estimator = FrequencyEstimator::new(&ontology, &corpus);

        let query: TermGroup = vec![3u32.into()].into();
        let results = rank_diseases(&estimator, &query).unwrap();

        assert_eq!(results.len(), 2);
        // the disease annotated with the query term must rank first
        assert_eq!(results[0].disease_id(), &100u32.into());
        assert_eq!(results[0].rank(), 1);
        assert_eq!(results[1].rank(), 2);
        assert!(results[0].posttest_probability() >= results[1].posttest_probability());
    }

    #[test]
    fn pretest_probability_is_uniform() {
        let ontology = small_ontology();
        let corpus = two_disease_corpus();
        let estimator = FrequencyEstimator::new(&ontology, &corpus);

        let query: TermGroup = vec![3u32.into()].into();
        let results = rank_diseases(&estimator, &query).unwrap();
        for result in &results {
            assert!((result.pretest_probability() - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn posttest_probability_from_odds() {
        // LR of 1 keeps the pretest probability
        assert!((posttest(0.5, 1.0) - 0.5).abs() < f64::EPSILON);
        // strong evidence drives the probability towards 1
        assert!(posttest(0.01, 1e6) > 0.99);
        // evidence against drives it towards 0
        assert!(posttest(0.5, 1e-6) < 0.001);
        // a certain pretest probability stays certain
        assert!((posttest(1.0, 2.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_corpus_yields_no_results() {
        let ontology = small_ontology();
        let corpus = DiseaseCorpus::new();
        let estimator = FrequencyEstimator::new(&ontology, &corpus);

        let query: TermGroup = vec![3u32.into()].into();
        assert!(rank_diseases(&estimator, &query).unwrap().is_empty());
    }

    #[test]
    fn empty_query_keeps_pretest_probability() {
        let ontology = small_ontology();
        let corpus = two_disease_corpus();
        let estimator = FrequencyEstimator::new(&ontology, &corpus);

        let results = rank_diseases(&estimator, &TermGroup::new()).unwrap();
        for result in &results {
            assert!((result.composite_ratio() - 1.0).abs() < f64::EPSILON);
            assert!((result.posttest_probability() - 0.5).abs() < f64::EPSILON);
        }
    }
}
