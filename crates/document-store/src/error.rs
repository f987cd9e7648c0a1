//! # Store Errors
//!
//! Every failure a collection can report. Clients see exactly one of these
//! for each request; nothing is retried.

/// Errors returned by a [`Collection`](crate::Collection) or its client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The collection task is gone or dropped the reply.
    #[error("Store unavailable")]
    Unavailable,
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The identifier text is not a well-formed document id.
    #[error("Invalid document id: {0:?}")]
    InvalidId(String),
    /// The backing storage failed to load or persist the collection.
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Unsupported store url: {0}")]
    UnsupportedUrl(String),
}
