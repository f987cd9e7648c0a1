//! # System Lifecycle
//!
//! Starting and stopping the record store behind the web app.
//!
//! The fruit collection runs in its own tokio task. [`FruitSystem::start`]
//! opens the configured [`Backing`](document_store::Backing), loads what it
//! already holds and spawns the task; [`FruitSystem::shutdown`] drops the last
//! client and waits for the task to drain its queue and exit.
//!
//! [`setup_tracing`] installs the process-wide log subscriber.
//!
//! Every clone of the client keeps the collection alive, so the router (which
//! holds clones in its state) must be dropped before shutdown can complete.

pub mod fruit_system;
pub mod tracing;

pub use fruit_system::*;
pub use self::tracing::setup_tracing;
