//! Disease-to-phenotype annotation data
//!
//! A [`DiseaseAnnotations`] record holds the phenotype terms a disease
//! is annotated with, each carrying the [`Frequency`] interval reported
//! by the annotation source. All records together form the
//! [`DiseaseCorpus`], the population the background frequencies are
//! derived from.

mod corpus;
mod disease;
mod frequency;

pub use corpus::DiseaseCorpus;
pub use disease::{AnnotatedTerm, DiseaseAnnotations, DiseaseId};
pub use frequency::Frequency;
