//! # Mock Collection
//!
//! Utilities for testing code that holds a [`CollectionClient`] without running
//! a real [`Collection`](crate::Collection).
//!
//! [`MockCollection`] hands out a real client whose requests are answered from a
//! queue of expectations, in order. Use it to script failures that a healthy
//! collection never produces, such as a store that has gone away mid-request.
//!
//! ```rust
//! use document_store::mock::MockCollection;
//! use document_store::{Document, DocumentId, StoreError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Note { id: DocumentId, body: String }
//!
//! impl Document for Note {
//!     type Fields = String;
//!     fn from_fields(id: DocumentId, body: String) -> Self { Self { id, body } }
//!     fn id(&self) -> DocumentId { self.id }
//!     fn replace(&mut self, body: String) { self.body = body; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCollection::<Note>::new();
//!     mock.expect_list().return_err(StoreError::Unavailable);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list_all().await.unwrap_err(), StoreError::Unavailable);
//!     mock.verify();
//! }
//! ```

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted reply for the next request.
enum Expectation<T: Document> {
    List(Result<Vec<T>, StoreError>),
    Insert(Result<Vec<T>, StoreError>),
    Find(Result<T, StoreError>),
    Replace(Result<T, StoreError>),
    Delete(Result<T, StoreError>),
    Clear(Result<usize, StoreError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with expectation tracking.
///
/// Requests are matched against expectations strictly in order. A request that
/// does not match the next expectation makes the background task panic, which
/// drops the reply channel and surfaces as [`StoreError::Unavailable`].
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockCollection<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (StoreRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Find { respond_to, .. }, Some(Expectation::Find(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Replace { respond_to, .. },
                        Some(Expectation::Replace(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Clear { respond_to }, Some(Expectation::Clear(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    /// Covers both `create_one` and `create_many`.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Insert)
    }

    pub fn expect_find(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Find)
    }

    pub fn expect_replace(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Replace)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_clear(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(Expectation::Clear)
    }

    fn builder<R>(
        &mut self,
        wrap: fn(Result<R, StoreError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap,
        }
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder that queues the reply for one expected request.
pub struct ExpectationBuilder<T: Document, R> {
    expectations: Expectations<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// A client whose collection is already gone: every call fails with
/// [`StoreError::Unavailable`].
pub fn unavailable_client<T: Document>() -> CollectionClient<T> {
    let (sender, receiver) = mpsc::channel(1);
    drop(receiver);
    CollectionClient::new(sender)
}
