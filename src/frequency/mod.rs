//! Estimating the frequency of an arbitrary term in a disease
//!
//! The [`BackgroundIndex`] holds the population-wide frequency of
//! every term, derived once from the full [`crate::DiseaseCorpus`].
//! The [`FrequencyEstimator`] answers point queries: how often do
//! patients of one disease present with one term, backing off along
//! the ontology when the disease is not annotated with the term
//! itself.

mod background;
mod estimator;
mod relation;

pub use background::BackgroundIndex;
pub use estimator::FrequencyEstimator;
pub use relation::TermRelation;

/// Probability assigned when a query term shares no identifiable
/// relationship with any annotated term of the disease
///
/// Strictly positive so downstream likelihood ratios stay finite.
pub const UNRELATED_TERM_FREQUENCY: f64 = 0.000_005; // 1:200,000
