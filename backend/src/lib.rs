//! Photo gallery backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Handler modules
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Application state
pub mod state;

/// Hosted backend clients (object storage + table queries)
pub mod supabase;

/// Shared types: environment, errors, extractors
pub mod types;
