//! `phenolr` estimates how likely a patient with a given disease is to
//! present with an arbitrary phenotype term.
//!
//! The estimate is derived from a corpus of disease-to-phenotype
//! annotations. When a disease is not annotated with the query term
//! itself, the estimator backs off along the ontology: to annotated
//! terms the query subsumes, to annotated terms that subsume the query,
//! to siblings and to more distant relatives, each with its own
//! frequency adjustment. The resulting probabilities feed a
//! likelihood-ratio ranking of candidate diseases against an observed
//! phenotype profile.
//!
//! The crate operates on an already parsed [`Ontology`] and
//! [`DiseaseCorpus`]; loading `hp.obo` or annotation files is the job
//! of the calling layer.
//!
//! # Examples
//!
//! ```
//! use phenolr::annotations::{AnnotatedTerm, DiseaseAnnotations, DiseaseCorpus, Frequency};
//! use phenolr::{FrequencyEstimator, Ontology};
//!
//! let mut ontology = Ontology::default();
//! ontology.insert_term("Phenotypic abnormality", 1u32);
//! ontology.insert_term("Abnormal heart morphology", 2u32);
//! ontology.add_parent(1u32, 2u32);
//! ontology.create_cache();
//!
//! let mut corpus = DiseaseCorpus::default();
//! let mut disease = DiseaseAnnotations::new(100u32.into(), "Some disease");
//! disease.add_annotation(AnnotatedTerm::new(
//!     2u32.into(),
//!     Frequency::try_from(0.75).unwrap(),
//! ));
//! corpus.insert(disease);
//!
//! let estimator = FrequencyEstimator::new(&ontology, &corpus);
//! let frequency = estimator
//!     .estimate_frequency(2u32.into(), &100u32.into())
//!     .unwrap();
//! assert!((frequency - 0.75).abs() < f64::EPSILON);
//! ```
use std::num::ParseIntError;
use thiserror::Error;

pub mod annotations;
pub mod frequency;
pub mod likelihood;
mod ontology;
pub mod term;

pub use annotations::{DiseaseCorpus, DiseaseId};
pub use frequency::{BackgroundIndex, FrequencyEstimator};
pub use ontology::Ontology;
pub use term::{Term, TermGroup, TermId};

const DEFAULT_NUM_PARENTS: usize = 10;
const DEFAULT_NUM_ALL_PARENTS: usize = 50;

#[derive(Error, Debug, PartialEq)]
pub enum PhenoError {
    #[error("term does not exist")]
    TermDoesNotExist,
    #[error("disease does not exist")]
    DiseaseDoesNotExist,
    #[error("frequency out of range")]
    InvalidFrequency,
    #[error("unable to parse Integer")]
    ParseIntError,
}

impl From<ParseIntError> for PhenoError {
    fn from(_: ParseIntError) -> Self {
        PhenoError::ParseIntError
    }
}

/// The `Result` type of the `phenolr` crate
pub type PhenoResult<T> = Result<T, PhenoError>;
