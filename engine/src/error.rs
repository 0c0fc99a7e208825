use crate::index::DocId;
use thiserror::Error;

/// Errors reported by the search engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Ingestion was called with an id that is already indexed.
    #[error("document {0} is already indexed")]
    DuplicateDocumentId(DocId),

    /// A query token consisted of the minus marker alone.
    #[error("query contains a bare '-' with no term after it")]
    MalformedQueryTerm,

    /// A per-document match was requested for an id that was never indexed.
    #[error("document {0} is not indexed")]
    DocumentNotFound(DocId),
}
