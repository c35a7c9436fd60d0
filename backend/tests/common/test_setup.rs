use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    routes,
    state::AppState,
    supabase::{PhotoStorage, TableClient},
};
use tower::ServiceExt;
use wiremock::MockServer;

/// Bucket name used across integration tests
pub const TEST_BUCKET: &str = "Pictures";

/// Service-role credential presented to the mock backend
pub const TEST_SERVICE_ROLE_KEY: &str = "test-service-role-key";

/// Anon credential presented to the mock backend
pub const TEST_ANON_KEY: &str = "test-anon-key";

/// Multipart boundary used by the form-building helpers
pub const BOUNDARY: &str = "test-boundary";

/// Test harness: the app router wired against a mock backend server
pub struct TestSetup {
    pub router: Router,
    pub backend: MockServer,
}

impl TestSetup {
    pub async fn new() -> Self {
        // Initialize tracing for tests
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();

        let backend = MockServer::start().await;
        let client = reqwest::Client::new();

        let photos = Arc::new(PhotoStorage::new(
            client.clone(),
            backend.uri(),
            TEST_BUCKET.to_string(),
            TEST_SERVICE_ROLE_KEY.to_string(),
        ));
        let tables = Arc::new(TableClient::new(
            client,
            backend.uri(),
            TEST_ANON_KEY.to_string(),
        ));

        let router = routes::handler().with_state(AppState { photos, tables });

        Self { router, backend }
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn send_post_request(&self, route: &str, payload: serde_json::Value) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn send_multipart_request(&self, route: &str, form: String) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form))
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }
}

pub async fn parse_response_body(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();

    serde_json::from_slice(&body).expect("response body is not JSON")
}

/// Builds raw `multipart/form-data` bodies using [`BOUNDARY`]
#[derive(Default)]
pub struct MultipartForm {
    body: String,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binary `file` part; `content_type` is omitted when `None`
    pub fn file(mut self, filename: &str, content_type: Option<&str>, data: &str) -> Self {
        self.body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
        ));
        if let Some(content_type) = content_type {
            self.body
                .push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        self.body.push_str(&format!("\r\n{data}\r\n"));
        self
    }

    /// Appends a plain text part
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
        self
    }

    pub fn build(mut self) -> String {
        self.body.push_str(&format!("--{BOUNDARY}--\r\n"));
        self.body
    }
}
