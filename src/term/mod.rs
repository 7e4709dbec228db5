//! An ontology term represents a single clinical abnormality
//!
//! Terms are identified by a [`TermId`] and connected to their parent
//! and child terms, building a directed acyclic graph.

mod group;
mod internal;
#[allow(clippy::module_inception)]
mod term;
mod termid;

pub use group::{TermGroup, TermIds};
pub(crate) use internal::TermInternal;
pub use term::{Term, Terms};
pub use termid::TermId;

/// Direct or transitive parents of a term
pub type TermParents = TermGroup;
/// Direct children of a term
pub type TermChildren = TermGroup;
