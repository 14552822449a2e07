use mediakit_core::{MediaError, MediaResult, VideoMetadata};
use reqwest::Client;
use tracing::debug;

use crate::api::youtube::{DEFAULT_BASE_URL, VideoListResponse, YouTubeClient};
use crate::parsers::duration::format_duration;
use crate::parsers::video_id::extract_video_id;

const USER_AGENT: &str = concat!("mediakit/", env!("CARGO_PKG_VERSION"));

/// Resolves a YouTube URL into a [`VideoMetadata`] record.
///
/// The API key is injected once and checked on every call, so a fetcher built
/// without one still rejects bad URLs before reporting the missing key.
#[derive(Debug, Clone)]
pub struct VideoMetadataFetcher {
    client: YouTubeClient,
    api_key: Option<String>,
}

impl VideoMetadataFetcher {
    pub fn new(api_key: Option<String>) -> MediaResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> MediaResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| MediaError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            client: YouTubeClient::new(client, base_url),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub async fn fetch(&self, url: &str) -> MediaResult<VideoMetadata> {
        let video_id = extract_video_id(url)?;
        let api_key = self
            .api_key()
            .ok_or_else(|| MediaError::Config("youtube api key is not configured".to_string()))?;

        debug!(%video_id, base_url = self.client.base_url(), "fetching video metadata");
        let response = self.client.fetch_video(&video_id, api_key).await?;
        Ok(normalize(response))
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Flattens the first returned item. An empty item list is a video the API
/// does not know, which yields an empty record rather than an error.
pub fn normalize(response: VideoListResponse) -> VideoMetadata {
    let Some(item) = response.items.into_iter().next() else {
        return VideoMetadata::default();
    };

    let duration = item
        .content_details
        .and_then(|details| details.duration)
        .and_then(|iso| format_duration(&iso));
    let snippet = item.snippet.unwrap_or_default();

    VideoMetadata {
        thumbnail_url: snippet.thumbnails.as_ref().and_then(|t| t.best_url()),
        title: snippet.title,
        description: snippet.description,
        duration,
        channel_name: snippet.channel_title,
        published_at: snippet.published_at,
        tags: snippet.tags.unwrap_or_default(),
        category: snippet.category_id,
    }
}
