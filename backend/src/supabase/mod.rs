//! Thin clients for the hosted backend: object storage over its storage REST
//! API and generic table reads over its PostgREST-style query API.
//!
//! Both clients are constructed once at startup and shared across requests;
//! they hold no per-request state beyond the pooled HTTP connections.

mod error;
mod storage;
mod tables;

pub use error::{SupabaseError, SupabaseResult};
pub use storage::{PhotoStorage, StoredObject};
pub use tables::TableClient;
