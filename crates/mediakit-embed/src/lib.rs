//! Detects which music platform a URL belongs to and computes the URL to use
//! as the source of an embedded player frame. No network access.

pub mod parsers;

use mediakit_core::{ParsedMediaUrl, PlatformKind};
use tracing::debug;

pub use parsers::apple_music::resolve_apple_music;
pub use parsers::spotify::resolve_spotify;

/// Classifies by host substring. Apple Music is checked first.
pub fn classify(url: &str) -> PlatformKind {
    if url.contains(parsers::apple_music::HOST) {
        PlatformKind::AppleMusic
    } else if url.contains("spotify.com") {
        PlatformKind::Spotify
    } else {
        PlatformKind::Unknown
    }
}

pub fn resolve(url: &str) -> Option<ParsedMediaUrl> {
    let kind = classify(url);
    debug!(url, ?kind, "resolving embed url");
    match kind {
        PlatformKind::AppleMusic => resolve_apple_music(url),
        PlatformKind::Spotify => resolve_spotify(url),
        PlatformKind::Unknown => None,
    }
}

/// True when the URL classifies to a known platform.
///
/// This does not promise that [`resolve`] succeeds: a Spotify URL whose path is
/// not an embeddable kind is supported here but resolves to `None`.
pub fn is_supported(url: &str) -> bool {
    classify(url) != PlatformKind::Unknown
}

pub fn default_embed_height(kind: PlatformKind) -> u32 {
    kind.default_embed_height()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_detects_apple_music() {
        assert_eq!(
            classify("https://music.apple.com/us/album/x/123"),
            PlatformKind::AppleMusic
        );
        assert_eq!(
            classify("https://embed.music.apple.com/us/album/x/123"),
            PlatformKind::AppleMusic
        );
    }

    #[test]
    fn classify_detects_spotify_hosts() {
        assert_eq!(classify("https://open.spotify.com/track/abc"), PlatformKind::Spotify);
        assert_eq!(classify("https://spotify.com/album/abc"), PlatformKind::Spotify);
    }

    #[test]
    fn classify_prefers_apple_music_when_both_match() {
        let url = "https://music.apple.com/us/album/x/123?ref=open.spotify.com";
        assert_eq!(classify(url), PlatformKind::AppleMusic);
    }

    #[test]
    fn classify_is_total() {
        assert_eq!(classify(""), PlatformKind::Unknown);
        assert_eq!(classify("not a url at all"), PlatformKind::Unknown);
        assert_eq!(classify("https://www.youtube.com/watch?v=x"), PlatformKind::Unknown);
    }

    #[test]
    fn resolve_dispatches_by_platform() {
        let apple = resolve("https://music.apple.com/us/album/x/123").unwrap();
        assert_eq!(apple.embed_url(), "https://embed.music.apple.com/us/album/x/123");

        let spotify = resolve("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M").unwrap();
        assert_eq!(
            spotify.embed_url(),
            "https://open.spotify.com/embed/playlist/37i9dQZF1DXcBWIGoYBM5M"
        );

        assert!(resolve("https://example.com/x").is_none());
    }

    #[test]
    fn resolve_never_returns_unknown_kind() {
        for url in [
            "https://music.apple.com/us/album/x/123",
            "https://open.spotify.com/track/abc",
            "https://open.spotify.com/user/abc",
            "https://example.com",
            "",
        ] {
            if let Some(parsed) = resolve(url) {
                assert_ne!(parsed.platform_kind(), PlatformKind::Unknown);
            }
        }
    }

    #[test]
    fn is_supported_only_classifies() {
        let url = "https://open.spotify.com/not-a-kind/xyz";
        assert!(is_supported(url));
        assert!(resolve(url).is_none());
        assert!(!is_supported("https://example.com"));
    }

    #[test]
    fn default_heights() {
        assert_eq!(default_embed_height(PlatformKind::AppleMusic), 450);
        assert_eq!(default_embed_height(PlatformKind::Spotify), 352);
        assert_eq!(default_embed_height(PlatformKind::Unknown), 400);
    }
}
