mod error;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use mediakit_core::{MediaError, MediaResult, VideoMetadata};
use mediakit_video::VideoMetadataFetcher;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::{ApiError, public_message, status_for};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<VideoMetadataFetcher>,
}

impl AppState {
    pub fn new(fetcher: VideoMetadataFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/video-metadata", post(video_metadata))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until ctrl-c.
pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for ctrl-c");
            }
            info!("shutting down");
        })
        .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct VideoMetadataRequest {
    url: String,
}

fn parse_request(body: &[u8]) -> MediaResult<String> {
    let request: VideoMetadataRequest = serde_json::from_slice(body).map_err(|_| {
        MediaError::InvalidInput("request body must be json with a string `url` field".to_string())
    })?;
    if request.url.trim().is_empty() {
        return Err(MediaError::InvalidInput("url is required".to_string()));
    }
    Ok(request.url)
}

async fn video_metadata(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VideoMetadata>, ApiError> {
    let url = parse_request(&body)?;
    let metadata = state.fetcher.fetch(&url).await?;
    Ok(Json(metadata))
}
