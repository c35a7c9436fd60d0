//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::Level;

/// Timeout applied to every request against the hosted backend
const BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses a local backend instance)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Base URL of the hosted backend
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_URL` is not set outside of development
    #[must_use]
    pub fn supabase_url(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("SUPABASE_URL").expect("SUPABASE_URL environment variable is not set")
            }
            Self::Development => env::var("SUPABASE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),
        }
    }

    /// Anon (publishable) key; table reads with it are subject to the
    /// backend's row-level policy
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_KEY` is not set
    #[must_use]
    pub fn supabase_anon_key(&self) -> String {
        env::var("SUPABASE_KEY").expect("SUPABASE_KEY environment variable is not set")
    }

    /// Elevated service credential bypassing row-level policy; must only be
    /// presented from trusted server-side contexts
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_SERVICE_ROLE_KEY` is not set
    #[must_use]
    pub fn supabase_service_role_key(&self) -> String {
        env::var("SUPABASE_SERVICE_ROLE_KEY")
            .expect("SUPABASE_SERVICE_ROLE_KEY environment variable is not set")
    }

    /// Name of the bucket holding photo objects
    #[must_use]
    pub fn storage_bucket(&self) -> String {
        env::var("STORAGE_BUCKET").unwrap_or_else(|_| "Pictures".to_string())
    }

    /// Shared HTTP client with connection pooling for all backend requests
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized
    #[must_use]
    pub fn http_client(&self) -> Client {
        Client::builder()
            .timeout(Duration::from_secs(BACKEND_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("photo-backend/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
