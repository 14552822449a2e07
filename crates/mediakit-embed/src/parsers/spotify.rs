use mediakit_core::{ParsedMediaUrl, PlatformKind};
use regex::Regex;

const EMBED_BASE: &str = "https://open.spotify.com/embed";

/// Builds the canonical Spotify embed URL. Query parameters such as the `si`
/// share token are not carried over.
pub fn resolve_spotify(input: &str) -> Option<ParsedMediaUrl> {
    let regex =
        Regex::new(r"spotify\.com/(album|playlist|track|show|episode)/([A-Za-z0-9]+)").ok()?;
    let captures = regex.captures(input)?;
    let kind = captures.get(1)?.as_str();
    let id = captures.get(2)?.as_str();

    Some(ParsedMediaUrl::new(
        input,
        format!("{EMBED_BASE}/{kind}/{id}"),
        PlatformKind::Spotify,
    ))
}
