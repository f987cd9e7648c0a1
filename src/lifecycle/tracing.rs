//! # Observability & Tracing
//!
//! Structured logging for the server process.
//!
//! ## What Gets Traced
//!
//! - **Collection lifecycle**: `Collection started` and `Shutdown`, with the document count
//! - **Mutations**: `Inserted`, `Replaced`, `Deleted`, `Cleared` at info level
//! - **Reads and payloads**: `List`, `Find`, `Replace fields=...` at debug level
//! - **Failures**: `Not found` and persistence failures at warn level, with the id
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the store
//! RUST_LOG=document_store=debug cargo run
//! ```
//!
//! The compact format shows span hierarchy inline, e.g.
//! `INFO http.request:find_by_id: Find kind="Fruit" id=... found=true`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Reads `RUST_LOG`, falling back to `info`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use `kind` instead
        .compact()
        .init();
}
