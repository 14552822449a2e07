use mediakit_core::{ParsedMediaUrl, PlatformKind};
use tracing::warn;
use url::Url;

pub const HOST: &str = "music.apple.com";
pub const EMBED_HOST: &str = "embed.music.apple.com";

/// Rewrites an Apple Music page URL onto the embed host, keeping path, query
/// and fragment as they are. Already-embedded URLs pass through unchanged.
pub fn resolve_apple_music(input: &str) -> Option<ParsedMediaUrl> {
    let embed_url = if input.contains(EMBED_HOST) {
        input.to_string()
    } else {
        input.replacen(HOST, EMBED_HOST, 1)
    };

    if let Err(err) = Url::parse(&embed_url) {
        warn!(url = input, error = %err, "apple music embed url is not an absolute url");
        return None;
    }

    Some(ParsedMediaUrl::new(input, embed_url, PlatformKind::AppleMusic))
}

#[cfg(test)]
mod tests {
    use super::resolve_apple_music;
    use mediakit_core::PlatformKind;

    #[test]
    fn rewrites_host_to_embed_host() {
        let parsed = resolve_apple_music("https://music.apple.com/us/album/x/123").unwrap();
        assert_eq!(parsed.embed_url(), "https://embed.music.apple.com/us/album/x/123");
        assert_eq!(parsed.original_url(), "https://music.apple.com/us/album/x/123");
        assert_eq!(parsed.platform_kind(), PlatformKind::AppleMusic);
    }

    #[test]
    fn keeps_query_and_fragment() {
        let url = "https://music.apple.com/us/album/blinding-lights/1496794033?i=1496794038#top";
        let parsed = resolve_apple_music(url).unwrap();
        assert_eq!(
            parsed.embed_url(),
            "https://embed.music.apple.com/us/album/blinding-lights/1496794033?i=1496794038#top"
        );
    }

    #[test]
    fn embed_url_is_left_alone() {
        let url = "https://embed.music.apple.com/us/album/x/123";
        let parsed = resolve_apple_music(url).unwrap();
        assert_eq!(parsed.embed_url(), url);

        let again = resolve_apple_music(parsed.embed_url()).unwrap();
        assert_eq!(again.embed_url(), url);
    }

    #[test]
    fn non_absolute_result_is_dropped() {
        assert!(resolve_apple_music("music.apple.com/us/album/x/123").is_none());
    }
}
