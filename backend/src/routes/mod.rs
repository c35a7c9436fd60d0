mod health;
mod photos;
mod tables;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Creates the router with all handler routes
#[must_use]
pub fn handler() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handler))
        .route("/api/fetchData", post(tables::fetch_data))
        .route("/api/postData", post(tables::post_data))
        .route("/api/photos/list", get(photos::list_photos))
        .route("/api/photos/upload", post(photos::upload_photo))
        .route("/api/photos/update", post(photos::update_photo))
        .route("/api/photos/delete", post(photos::delete_photo))
}
