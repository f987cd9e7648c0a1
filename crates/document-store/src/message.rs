//! # Collection Messages
//!
//! The request types exchanged between a [`CollectionClient`](crate::CollectionClient)
//! and its [`Collection`](crate::Collection).

use crate::document::{Document, DocumentId};
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A single operation against a collection.
///
/// Each variant is one request-response exchange. The collection handles them
/// strictly in arrival order, so every operation is atomic with respect to the
/// others and concurrent replaces of the same id resolve last-write-wins.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    /// Every document, in insertion order.
    List { respond_to: Response<Vec<T>> },
    /// Insert a batch; the reply carries the stored documents with their ids.
    Insert {
        fields: Vec<T::Fields>,
        respond_to: Response<Vec<T>>,
    },
    Find {
        id: DocumentId,
        respond_to: Response<T>,
    },
    /// Full replace of the fields of one document.
    Replace {
        id: DocumentId,
        fields: T::Fields,
        respond_to: Response<T>,
    },
    Delete {
        id: DocumentId,
        respond_to: Response<T>,
    },
    /// Remove every document; the reply is how many were removed.
    Clear { respond_to: Response<usize> },
}
