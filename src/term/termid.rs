use core::fmt::Debug;
use std::fmt::Display;

use crate::{PhenoError, PhenoResult};

/// A unique identifier for an ontology term
///
/// e.g.: `HP:0012345`
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TermId {
    inner: u32,
}

impl TryFrom<&str> for TermId {
    type Error = PhenoError;
    fn try_from(s: &str) -> PhenoResult<Self> {
        let numeric = s.get(3..).ok_or(PhenoError::ParseIntError)?;
        Ok(TermId {
            inner: numeric.parse::<u32>()?,
        })
    }
}

impl From<u32> for TermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermId({self})")
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HP:{:07}", self.inner)
    }
}

impl PartialEq<str> for TermId {
    fn eq(&self, other: &str) -> bool {
        TermId::try_from(other).map_or(false, |id| self == &id)
    }
}
