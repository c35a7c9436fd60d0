use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::{state::AppState, types::AppError};

/// Generic fetch request body.
///
/// The table name is passed through unvalidated; a missing body or field
/// degrades to an empty name, which the backend rejects.
#[derive(Debug, Default, Deserialize)]
pub struct FetchDataRequest {
    /// Table to select from
    #[serde(default)]
    pub table: String,
}

/// Extracts the caller's bearer token, if any, so the backend applies the
/// requesting principal's row-level policy
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Selects every row of the table named in the request body
#[instrument(skip(state, headers, payload))]
pub async fn fetch_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<FetchDataRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = payload.map_or_else(|_| FetchDataRequest::default(), |Json(request)| request);

    let rows = state
        .tables
        .select_all(&request.table, bearer_token(&headers))
        .await?;

    Ok(Json(rows))
}

/// Placeholder for a future write endpoint
pub async fn post_data() -> AppError {
    AppError::new(StatusCode::NOT_IMPLEMENTED, "Not implemented")
}
