use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediakit_core::MediaError;
use serde_json::json;
use tracing::error;

/// Maps a [`MediaError`] onto an HTTP status and `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError(pub MediaError);

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &MediaError) -> StatusCode {
    match err {
        MediaError::InvalidInput(_) | MediaError::UnsupportedPlatform(_) => StatusCode::BAD_REQUEST,
        // The submitted URL is presumed to be why the provider refused.
        MediaError::Upstream(_) => StatusCode::BAD_REQUEST,
        MediaError::Config(_) | MediaError::Network(_) | MediaError::Parse(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Text sent to the caller. Transport and decode failures stay in the logs.
pub fn public_message(err: &MediaError) -> String {
    match err {
        MediaError::Network(_) | MediaError::Parse(_) => "internal server error".to_string(),
        _ => err.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": public_message(&self.0) }))).into_response()
    }
}
