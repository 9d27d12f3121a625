//! Router assembly and cross-origin plumbing.

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::runtime::HttpRuntime;
use crate::runtime::handlers::{analyze_upload, analyze_url, clear_history, health, list_history};

/// Request body cap. Comfortably above the 10 MB validation limit so an
/// oversize upload reaches the validator (400) instead of dying at the
/// framework boundary (413).
const BODY_LIMIT: usize = 32 * 1024 * 1024;

impl HttpRuntime {
    /// Create the axum router with all endpoints and middleware.
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/analyze", post(analyze_upload))
            .route("/analyze-url", post(analyze_url))
            .route("/history", get(list_history).delete(clear_history))
            .with_state(self)
            .layer(DefaultBodyLimit::max(BODY_LIMIT))
            .layer(middleware::from_fn(cors_middleware))
            .layer(TraceLayer::new_for_http())
    }
}

/// Stamp permissive cross-origin headers on every response, and
/// short-circuit `OPTIONS` with an empty 204 before routing happens.
async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(&mut response);
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(&mut response);
    response
}

fn apply_cors_headers(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
