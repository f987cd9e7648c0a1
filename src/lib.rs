//! # Fruits
//!
//! A small server-rendered CRUD app for fruit records, built on the
//! [`document_store`] actor collection.
//!
//! ## 🚀 Core Components
//!
//! - **[model]**: the [`Fruit`](model::Fruit) document and the form it is edited through.
//! - **[fruits]**: [`FruitClient`](fruits::FruitClient), the data-access layer, and the seed data.
//! - **[views]**: page templates, compiled into the binary.
//! - **[http]**: router, handlers and middleware.
//! - **[lifecycle]**: starting and stopping the record store.
//! - **[config]** and **[error]**: startup options and how failures become responses.
//!
//! ## 📚 Quick Start
//!
//! ```bash
//! DATABASE_URL=file://data/fruits.json PORT=3000 cargo run
//! ```
//!
//! Then open `/fruits/seed` to load the starter fruits and `/fruits` to browse them.
//!
//! ## 🧪 Testing
//!
//! The router is a plain tower service, so tests drive it with
//! `tower::ServiceExt::oneshot` against an in-memory [`FruitSystem`](lifecycle::FruitSystem)
//! or a [`MockCollection`](document_store::mock::MockCollection).

pub mod config;
pub mod error;
pub mod fruits;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod views;
