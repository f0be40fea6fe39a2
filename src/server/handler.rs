//! Request handlers for the upload endpoint.

use crate::error::RecapError;
use crate::pipeline::{AnalysisPipeline, AnalysisResult};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, warn};

/// Multipart field name carrying the uploaded recording.
const AUDIO_FIELD: &str = "audio_file";

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
}

/// Wire shape of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessAudioResponse {
    pub summary: String,
    pub key_points: Vec<String>,
    pub topics_discussed: Vec<String>,
    pub duration: f64,
    pub transcript: String,
    pub confidence_score: Option<f32>,
    pub speaker_count: Option<u32>,
}

impl From<AnalysisResult> for ProcessAudioResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            summary: result.summary,
            key_points: result.key_points,
            topics_discussed: result.topics_discussed,
            duration: result.duration_seconds,
            transcript: result.transcript,
            confidence_score: result.confidence,
            speaker_count: result.speaker_count,
        }
    }
}

/// Error rendered as `{"error": ...}` with an appropriate status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RecapError> for ApiError {
    fn from(err: RecapError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// `POST /api/process_audio`: multipart upload with an `audio_file` field.
///
/// Returns the full analysis document on success; on failure, a single
/// `error` object and no partial fields.
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessAudioResponse>, ApiError> {
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let extension = field
            .file_name()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        upload = Some((bytes.to_vec(), extension));
        break;
    }

    let Some((data, extension)) = upload else {
        return Err(ApiError::bad_request("No audio file provided"));
    };
    if data.is_empty() {
        return Err(ApiError::bad_request("Uploaded audio file is empty"));
    }

    let result = state.pipeline.analyze(data, &extension).await?;
    Ok(Json(result.into()))
}

/// `GET /healthz`: liveness plus backend readiness.
pub async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model": state.pipeline.transcriber_model(),
        "ready": state.pipeline.is_ready(),
    }))
}
