//! # Collection Actor
//!
//! This module defines the [`Collection`], the task that owns every document of
//! one kind. It is the "server" half of the store: it holds the receiver end of
//! the request channel and processes requests one at a time, so the document
//! map needs no lock.

use crate::backing::{Backend, Backing};
use crate::client::CollectionClient;
use crate::document::{Document, DocumentId};
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Default capacity of the request channel.
pub const DEFAULT_CAPACITY: usize = 32;

/// The actor that owns one collection of documents.
///
/// # Usage Pattern
///
/// 1. **Create**: [`Collection::open`] (or [`Collection::in_memory`]) returns the
///    collection and a [`CollectionClient`].
/// 2. **Run**: spawn [`Collection::run`] on its own task.
/// 3. **Use**: clone the client freely; every clone talks to the same task.
///
/// ```rust
/// use document_store::{Collection, Document, DocumentId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Note { id: DocumentId, body: String }
///
/// impl Document for Note {
///     type Fields = String;
///     fn from_fields(id: DocumentId, body: String) -> Self { Self { id, body } }
///     fn id(&self) -> DocumentId { self.id }
///     fn replace(&mut self, body: String) { self.body = body; }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (collection, client) = Collection::<Note>::in_memory(10);
///     tokio::spawn(collection.run());
///
///     let note = client.create_one("hello".to_string()).await.unwrap();
///     let found = client.find_by_id(note.id).await.unwrap();
///     assert_eq!(found.body, "hello");
/// }
/// ```
///
/// # Persistence
///
/// Mutations are applied to the in-memory map first and then handed to the
/// [`Backend`]. If the backend fails the mutation is rolled back and the caller
/// receives [`StoreError::Storage`], so memory and storage never disagree.
pub struct Collection<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    documents: IndexMap<DocumentId, T>,
    backend: Box<dyn Backend<T>>,
}

impl<T: Document> Collection<T> {
    /// Creates a collection over `backend` pre-filled with `documents`.
    pub fn new(
        capacity: usize,
        backend: Box<dyn Backend<T>>,
        documents: Vec<T>,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let collection = Self {
            receiver,
            documents: documents.into_iter().map(|doc| (doc.id(), doc)).collect(),
            backend,
        };
        (collection, CollectionClient::new(sender))
    }

    /// An empty collection that persists nothing.
    pub fn in_memory(capacity: usize) -> (Self, CollectionClient<T>) {
        Self::new(capacity, Backing::Memory.into_backend(), Vec::new())
    }

    /// Opens the collection named by `backing`, loading whatever it already holds.
    pub async fn open(
        capacity: usize,
        backing: Backing,
    ) -> Result<(Self, CollectionClient<T>), StoreError> {
        let backend = backing.into_backend::<T>();
        let documents = backend.load().await?;
        Ok(Self::new(capacity, backend, documents))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Fruit" instead of "fruits::model::Fruit")
        let kind = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(kind, size = self.documents.len(), "Collection started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::List { respond_to } => {
                    debug!(kind, size = self.documents.len(), "List");
                    let _ = respond_to.send(Ok(self.documents.values().cloned().collect()));
                }
                StoreRequest::Insert { fields, respond_to } => {
                    debug!(kind, count = fields.len(), "Insert");
                    self.insert(kind, fields, respond_to).await;
                }
                StoreRequest::Find { id, respond_to } => {
                    let result = self
                        .documents
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| StoreError::NotFound(id.to_string()));
                    debug!(kind, %id, found = result.is_ok(), "Find");
                    let _ = respond_to.send(result);
                }
                StoreRequest::Replace {
                    id,
                    fields,
                    respond_to,
                } => {
                    debug!(kind, %id, ?fields, "Replace");
                    self.replace(kind, id, fields, respond_to).await;
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(kind, %id, "Delete");
                    self.delete(kind, id, respond_to).await;
                }
                StoreRequest::Clear { respond_to } => {
                    debug!(kind, "Clear");
                    self.clear(kind, respond_to).await;
                }
            }
        }

        info!(kind, size = self.documents.len(), "Shutdown");
    }

    async fn insert(&mut self, kind: &str, fields: Vec<T::Fields>, respond_to: Response<Vec<T>>) {
        let inserted: Vec<T> = fields
            .into_iter()
            .map(|fields| T::from_fields(DocumentId::generate(), fields))
            .collect();
        for doc in &inserted {
            self.documents.insert(doc.id(), doc.clone());
        }

        if let Err(e) = self.backend.persist(&self.documents).await {
            warn!(kind, error = %e, "Insert failed");
            for doc in &inserted {
                self.documents.shift_remove(&doc.id());
            }
            let _ = respond_to.send(Err(e));
            return;
        }

        info!(kind, count = inserted.len(), size = self.documents.len(), "Inserted");
        let _ = respond_to.send(Ok(inserted));
    }

    async fn replace(&mut self, kind: &str, id: DocumentId, fields: T::Fields, respond_to: Response<T>) {
        let Some(doc) = self.documents.get_mut(&id) else {
            warn!(kind, %id, "Not found");
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };
        let previous = doc.clone();
        doc.replace(fields);
        let updated = doc.clone();

        if let Err(e) = self.backend.persist(&self.documents).await {
            warn!(kind, %id, error = %e, "Replace failed");
            self.documents.insert(id, previous);
            let _ = respond_to.send(Err(e));
            return;
        }

        info!(kind, %id, "Replaced");
        let _ = respond_to.send(Ok(updated));
    }

    async fn delete(&mut self, kind: &str, id: DocumentId, respond_to: Response<T>) {
        let Some((index, _, removed)) = self.documents.shift_remove_full(&id) else {
            warn!(kind, %id, "Not found");
            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
            return;
        };

        if let Err(e) = self.backend.persist(&self.documents).await {
            warn!(kind, %id, error = %e, "Delete failed");
            self.documents.shift_insert(index, id, removed);
            let _ = respond_to.send(Err(e));
            return;
        }

        info!(kind, %id, size = self.documents.len(), "Deleted");
        let _ = respond_to.send(Ok(removed));
    }

    async fn clear(&mut self, kind: &str, respond_to: Response<usize>) {
        let previous = std::mem::take(&mut self.documents);

        if let Err(e) = self.backend.persist(&self.documents).await {
            warn!(kind, error = %e, "Clear failed");
            self.documents = previous;
            let _ = respond_to.send(Err(e));
            return;
        }

        info!(kind, removed = previous.len(), "Cleared");
        let _ = respond_to.send(Ok(previous.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: DocumentId,
        body: String,
    }

    impl Document for Note {
        type Fields = String;

        fn from_fields(id: DocumentId, body: String) -> Self {
            Self { id, body }
        }

        fn id(&self) -> DocumentId {
            self.id
        }

        fn replace(&mut self, body: String) {
            self.body = body;
        }
    }

    /// Accepts writes until `failing` is flipped on.
    #[derive(Default)]
    struct FlakyBackend {
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Backend<Note> for FlakyBackend {
        async fn load(&self) -> Result<Vec<Note>, StoreError> {
            Ok(Vec::new())
        }

        async fn persist(&self, _documents: &IndexMap<DocumentId, Note>) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(StoreError::Storage("disk full".into()))
            } else {
                Ok(())
            }
        }
    }

    fn bodies(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.body.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (collection, client) = Collection::<Note>::in_memory(10);
        tokio::spawn(collection.run());

        client
            .create_many(vec!["a".into(), "b".into(), "c".into()])
            .await
            .unwrap();
        client.create_one("d".into()).await.unwrap();

        let all = client.list_all().await.unwrap();
        assert_eq!(bodies(&all), ["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back_every_mutation() {
        let failing = Arc::new(AtomicBool::new(false));
        let backend = FlakyBackend {
            failing: failing.clone(),
        };
        let (collection, client) = Collection::new(10, Box::new(backend), Vec::new());
        tokio::spawn(collection.run());

        let first = client.create_one("first".into()).await.unwrap();
        let second = client.create_one("second".into()).await.unwrap();
        failing.store(true, Ordering::SeqCst);

        let err = client.create_one("third".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        let err = client.update_by_id(first.id, "changed".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        let err = client.delete_by_id(first.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        let err = client.delete_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        // Nothing moved: same documents, same order, same fields.
        assert_eq!(client.list_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_actor_stops_when_clients_drop() {
        let (collection, client) = Collection::<Note>::in_memory(10);
        let handle = tokio::spawn(collection.run());

        client.create_one("x".into()).await.unwrap();
        drop(client);

        handle.await.expect("collection task panicked");
    }
}
