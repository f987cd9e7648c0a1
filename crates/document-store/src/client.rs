//! # Collection Client
//!
//! The typed, cloneable handle used to talk to a [`Collection`](crate::Collection).

use crate::document::{Document, DocumentId};
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a running collection.
///
/// Holds only the sending half of the request channel, so cloning is cheap and
/// every clone reaches the same collection. Each call is a single
/// request-response exchange with no caching and no retry. When the collection
/// task is gone every call fails with [`StoreError::Unavailable`].
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Unavailable)?
    }

    /// Every document in the collection.
    pub async fn list_all(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }

    /// Inserts every entry as one batch and returns the stored documents.
    pub async fn create_many(&self, fields: Vec<T::Fields>) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Insert { fields, respond_to })
            .await
    }

    pub async fn create_one(&self, fields: T::Fields) -> Result<T, StoreError> {
        self.create_many(vec![fields])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Storage("insert returned no document".to_string()))
    }

    pub async fn find_by_id(&self, id: DocumentId) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Find { id, respond_to })
            .await
    }

    /// Replaces every field of the document and returns it as stored.
    pub async fn update_by_id(&self, id: DocumentId, fields: T::Fields) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Replace {
            id,
            fields,
            respond_to,
        })
        .await
    }

    /// Removes the document and returns it.
    pub async fn delete_by_id(&self, id: DocumentId) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    /// Removes every document and returns how many there were.
    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Clear { respond_to })
            .await
    }
}
