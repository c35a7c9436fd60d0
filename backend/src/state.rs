//! Application state management

use std::sync::Arc;

use crate::supabase::{PhotoStorage, TableClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage client for the photo bucket (service-role credential)
    pub photos: Arc<PhotoStorage>,
    /// Table query client (request-scoped credential)
    pub tables: Arc<TableClient>,
}
