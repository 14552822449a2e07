use mediakit_core::{MediaError, MediaResult, validate_url};

pub const SHORT_LINK_HOST: &str = "youtu.be";

pub const ALLOWED_HOSTS: [&str; 5] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    SHORT_LINK_HOST,
];

const ROUTE_PREFIXES: [&str; 2] = ["shorts", "embed"];

/// Pulls the video id out of a YouTube URL.
///
/// Rules are tried in order: the first path segment of a short link, the `v`
/// query parameter, then `/shorts/{id}` and `/embed/{id}`.
pub fn extract_video_id(input: &str) -> MediaResult<String> {
    let url = validate_url(input)?;
    let host = url.host_str().unwrap_or_default();
    if !ALLOWED_HOSTS.contains(&host) {
        return Err(MediaError::UnsupportedPlatform(format!(
            "not a youtube url: {input}"
        )));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    if host == SHORT_LINK_HOST
        && let Some(id) = segments.first()
    {
        return Ok(id.to_string());
    }

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v")
        && !id.is_empty()
    {
        return Ok(id.into_owned());
    }

    if segments.len() >= 2 && ROUTE_PREFIXES.contains(&segments[0]) {
        return Ok(segments[1].to_string());
    }

    Err(MediaError::UnsupportedPlatform(format!(
        "could not find a video id in {input}"
    )))
}
