//! HTTP handlers for the DeepGuard API.

use axum::extract::{Multipart, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use deepguard_core::{AnalysisResult, ValidationError};

use crate::runtime::HttpRuntime;
use crate::runtime::error::ApiError;

/// GET /health - liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "DeepGuard API is running!",
    }))
}

/// POST /analyze - analyze an uploaded image.
///
/// Expects a multipart body with a `file` field; everything past the
/// envelope checks is the pipeline's business.
pub async fn analyze_upload(
    State(runtime): State<HttpRuntime>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ValidationError::MissingFile)?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ValidationError::MissingFile)?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or(ValidationError::MissingFile)?;
    if filename.is_empty() {
        return Err(ValidationError::EmptyFilename.into());
    }

    let result = runtime.pipeline.analyze_upload(&filename, &bytes).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /analyze-url - analyze an image referenced by URL.
pub async fn analyze_url(
    State(runtime): State<HttpRuntime>,
    Json(request): Json<AnalyzeUrlRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Some(url) = request.url else {
        return Err(ValidationError::MissingUrl.into());
    };
    let url = url.trim().to_string();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl.into());
    }

    let result = runtime.pipeline.analyze_url(&url).await?;
    Ok(Json(result))
}

/// GET /history - the retained analyses, newest first.
pub async fn list_history(
    State(runtime): State<HttpRuntime>,
) -> Result<Json<Vec<AnalysisResult>>, ApiError> {
    Ok(Json(runtime.history.list()?))
}

/// DELETE /history - drop every retained analysis.
pub async fn clear_history(State(runtime): State<HttpRuntime>) -> Result<Json<Value>, ApiError> {
    runtime.history.clear()?;
    Ok(Json(json!({ "message": "History cleared" })))
}
