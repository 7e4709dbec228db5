/// The relationship between a query term and a disease-annotated term
///
/// The variants form a closed set. The estimator evaluates them in
/// exactly this priority order and matches exhaustively on the
/// result, so every relationship maps to exactly one frequency
/// adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermRelation {
    /// The query equals the annotated term
    Identical,
    /// The query is a direct parent of the annotated term
    Superclass,
    /// The query is a direct child of the annotated term
    Subclass,
    /// The query and the annotated term share a direct parent
    Sibling,
    /// The query is connected to the annotated term through `level`
    /// ancestor generations
    Related {
        /// Number of ancestor generations walked upward from the
        /// annotated term; direct parents count as level 1
        level: usize,
    },
    /// No identifiable relationship
    Unrelated,
}
