use std::sync::Arc;

use backend::{
    server,
    state::AppState,
    supabase::{PhotoStorage, TableClient},
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().to_string()));
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(filter).init();
        }
    }

    let client = environment.http_client();
    let base_url = environment.supabase_url();

    let photos = Arc::new(PhotoStorage::new(
        client.clone(),
        base_url.clone(),
        environment.storage_bucket(),
        environment.supabase_service_role_key(),
    ));
    let tables = Arc::new(TableClient::new(
        client,
        base_url,
        environment.supabase_anon_key(),
    ));

    server::start(AppState { photos, tables }).await
}
