//! Object storage operations against the backend's storage REST API

use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{SupabaseError, SupabaseResult};

/// Fixed page size when listing the bucket
const LIST_PAGE_SIZE: u32 = 100;

/// One stored object as reported by the bucket listing
#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    /// Object key, unique within the bucket
    pub name: String,
    /// Creation timestamp reported by the backend
    pub created_at: Option<DateTime<Utc>>,
}

/// Storage client bound to a single bucket.
///
/// Authenticates with the service-role credential, which bypasses the
/// backend's row-level policy; only ever construct this in trusted
/// server-side contexts.
pub struct PhotoStorage {
    client: Client,
    base_url: String,
    bucket: String,
    service_role_key: String,
}

impl PhotoStorage {
    /// Creates a new storage client for `bucket` at `base_url`
    #[must_use]
    pub fn new(client: Client, base_url: String, bucket: String, service_role_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            service_role_key,
        }
    }

    /// Derives a fresh object name from the current time, a random suffix
    /// and the original filename's extension (`jpg` when the filename has
    /// none). Uniqueness is practical, not guaranteed.
    #[must_use]
    pub fn generate_object_name(filename: &str) -> String {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("jpg");

        let suffix: u64 = rand::thread_rng().gen();
        format!("{}-{suffix:x}.{ext}", Utc::now().timestamp_millis())
    }

    /// Public, unauthenticated URL of an object
    #[must_use]
    pub fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{name}",
            self.base_url, self.bucket
        )
    }

    /// Public URL with a cache-busting query parameter stamped at call time,
    /// so browser caches do not serve stale content after a replace
    #[must_use]
    pub fn cache_busted_url(&self, name: &str) -> String {
        format!("{}?v={}", self.public_url(name), Utc::now().timestamp_millis())
    }

    /// Lists the bucket, newest first by creation time
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::Api` when the backend rejects the listing and
    /// `SupabaseError::Network` on transport failure
    pub async fn list(&self) -> SupabaseResult<Vec<StoredObject>> {
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/list/{}",
                self.base_url, self.bucket
            ))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&json!({
                "prefix": "",
                "limit": LIST_PAGE_SIZE,
                "sortBy": { "column": "created_at", "order": "desc" },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        response.json().await.map_err(Into::into)
    }

    /// Stores `data` under `name` with the given content type.
    ///
    /// With `upsert` the backend replaces an existing key in place; without
    /// it an existing key is rejected, so creates rely on name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::Api` when the backend rejects the store and
    /// `SupabaseError::Network` on transport failure
    pub async fn upload(
        &self,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> SupabaseResult<()> {
        debug!(name, content_type, upsert, "storing object");

        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{name}",
                self.base_url, self.bucket
            ))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        Ok(())
    }

    /// Removes exactly the named object from the bucket.
    ///
    /// Removal of a non-existent name is backend-defined and passed through.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::Api` when the backend rejects the removal and
    /// `SupabaseError::Network` on transport failure
    pub async fn remove(&self, name: &str) -> SupabaseResult<()> {
        debug!(name, "removing object");

        let response = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.base_url, self.bucket
            ))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .json(&json!({ "prefixes": [name] }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        Ok(())
    }
}
