//! # Document Store
//!
//! An in-process document collection built on the **Actor Model**: one tokio
//! task owns every document of a kind, and the rest of the program talks to it
//! through a cheap, cloneable client.
//!
//! ## Architecture Overview
//!
//! 1. **Document Layer** ([`Document`]) - what is stored: an immutable [`DocumentId`] plus replaceable fields
//! 2. **Runtime Layer** ([`Collection`]) - request processing, ordering and persistence
//! 3. **Interface Layer** ([`CollectionClient`]) - typed request-response calls
//!
//! ## Operations
//!
//! | Client call      | Effect                                             |
//! |------------------|----------------------------------------------------|
//! | `list_all`       | every document, insertion order                    |
//! | `create_many`    | insert a batch, reply with ids assigned            |
//! | `create_one`     | insert one                                         |
//! | `find_by_id`     | one document or [`StoreError::NotFound`]           |
//! | `update_by_id`   | full replace of the fields, reply with the result  |
//! | `delete_by_id`   | remove one, reply with what was removed            |
//! | `delete_all`     | remove everything, reply with the count            |
//!
//! Ids that arrive as text are parsed with [`str::parse`] into a [`DocumentId`];
//! malformed text fails with [`StoreError::InvalidId`] before any request is sent.
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own tokio task
//! - Requests are processed **sequentially**, so each operation is atomic
//! - Concurrent updates of one id are last-write-wins in arrival order
//! - A full request channel makes senders wait
//!
//! ## Persistence
//!
//! A [`Backing`] parsed from a connection string picks the [`Backend`]:
//! `memory://` keeps nothing, `file://<path>` keeps a JSON array on disk.
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted collection that needs no actor.

pub mod backing;
pub mod client;
pub mod collection;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use backing::{Backend, Backing, JsonFileBackend, MemoryBackend};
pub use client::CollectionClient;
pub use collection::{Collection, DEFAULT_CAPACITY};
pub use document::{Document, DocumentId};
pub use error::StoreError;
pub use message::{Response, StoreRequest};
