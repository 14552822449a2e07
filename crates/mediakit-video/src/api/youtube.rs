use mediakit_core::{MediaError, MediaResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const PARTS: &str = "snippet,contentDetails";

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `videos.list` once for a single id. Non-success statuses are
    /// logged with their body and surfaced as [`MediaError::Upstream`].
    pub async fn fetch_video(&self, video_id: &str, api_key: &str) -> MediaResult<VideoListResponse> {
        let endpoint = format!("{}/videos", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&endpoint)
            .query(&[("part", PARTS), ("id", video_id), ("key", api_key)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| {
                MediaError::Network(format!("youtube request failed: {}", err.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, video_id, body = %body, "youtube api returned an error");
            return Err(MediaError::Upstream(format!(
                "failed to fetch video metadata: status={status}"
            )));
        }

        response
            .json::<VideoListResponse>()
            .await
            .map_err(|err| {
                MediaError::Parse(format!("youtube response parse failed: {}", err.without_url()))
            })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub snippet: Option<Snippet>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    pub default_quality: Option<Thumbnail>,
}

impl Thumbnails {
    /// Highest resolution first: maxres, standard, high, medium, default.
    pub fn best_url(&self) -> Option<String> {
        [
            &self.maxres,
            &self.standard,
            &self.high,
            &self.medium,
            &self.default_quality,
        ]
        .into_iter()
        .find_map(|thumbnail| thumbnail.as_ref().and_then(|t| t.url.clone()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentDetails {
    pub duration: Option<String>,
}
