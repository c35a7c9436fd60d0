//! Generic table reads over the backend's query API

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{SupabaseError, SupabaseResult};

/// Table query client.
///
/// Holds the anon (publishable) key; reads are subject to the backend's
/// row-level policy for whichever bearer is presented.
pub struct TableClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl TableClient {
    /// Creates a new table query client for the backend at `base_url`
    #[must_use]
    pub fn new(client: Client, base_url: String, anon_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    /// Selects every row of `table`.
    ///
    /// When `bearer` is present it is forwarded so the backend applies the
    /// requesting principal's row-level policy; otherwise the anon key is
    /// the principal. The table name is passed through as given.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::Api` when the backend rejects the query and
    /// `SupabaseError::Network` on transport failure
    pub async fn select_all(&self, table: &str, bearer: Option<&str>) -> SupabaseResult<Value> {
        debug!(table, "selecting all rows");

        let response = self
            .client
            .get(format!("{}/rest/v1/{table}", self.base_url))
            .query(&[("select", "*")])
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        response.json().await.map_err(Into::into)
    }
}
