//! Fan hub backend service
//!
//! REST API for a fan community: gallery image uploads relayed to S3,
//! per-voter reactions, comments, and a two-option match poll, all persisted
//! in a single JSON document.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3-backed media storage
pub mod media_storage;
/// HTTP route handlers
pub mod routes;
/// HTTP server assembly
pub mod server;
/// JSON document store
pub mod store;
/// Configuration, errors, and extractors
pub mod types;
