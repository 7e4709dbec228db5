use std::collections::hash_map::{Entry, Values};
use std::collections::HashMap;

use crate::annotations::{DiseaseAnnotations, DiseaseId};
use crate::{PhenoError, PhenoResult};

/// The mapping from diseases to their phenotype annotations
///
/// The corpus is populated once by the loading layer and only read
/// afterwards. It is both the lookup table for individual disease
/// records and the population that background frequencies are
/// normalized against.
#[derive(Debug, Default)]
pub struct DiseaseCorpus {
    diseases: HashMap<DiseaseId, DiseaseAnnotations>,
}

impl DiseaseCorpus {
    /// Constructs a new, empty [`DiseaseCorpus`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a disease record to the corpus
    ///
    /// A record with an already present [`DiseaseId`] is ignored,
    /// keeping the first inserted record.
    pub fn insert(&mut self, disease: DiseaseAnnotations) {
        if let Entry::Vacant(entry) = self.diseases.entry(*disease.id()) {
            entry.insert(disease);
        }
    }

    /// Returns the annotation record of the given disease
    ///
    /// # Errors
    ///
    /// If the disease is not part of the corpus, a
    /// [`PhenoError::DiseaseDoesNotExist`] is returned
    pub fn record_for(&self, disease_id: &DiseaseId) -> PhenoResult<&DiseaseAnnotations> {
        self.diseases
            .get(disease_id)
            .ok_or(PhenoError::DiseaseDoesNotExist)
    }

    /// Returns an iterator of all disease records
    pub fn diseases(&self) -> Values<'_, DiseaseId, DiseaseAnnotations> {
        self.diseases.values()
    }

    /// Returns the number of diseases in the corpus
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    /// Returns `true` if the corpus does not contain any diseases
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
