use serde::{Deserialize, Serialize};

/// External media platforms an embed can be produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformKind {
    AppleMusic,
    Spotify,
    Unknown,
}

impl PlatformKind {
    /// Suggested iframe height in pixels.
    pub fn default_embed_height(self) -> u32 {
        match self {
            PlatformKind::AppleMusic => 450,
            PlatformKind::Spotify => 352,
            PlatformKind::Unknown => 400,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PlatformKind::AppleMusic => "Apple Music",
            PlatformKind::Spotify => "Spotify",
            PlatformKind::Unknown => "Unknown",
        }
    }
}

/// A page URL paired with the URL to load inside an embedded player.
///
/// Only the resolver constructs these, and it never produces one with
/// [`PlatformKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMediaUrl {
    original_url: String,
    embed_url: String,
    platform_kind: PlatformKind,
}

impl ParsedMediaUrl {
    pub fn new(
        original_url: impl Into<String>,
        embed_url: impl Into<String>,
        platform_kind: PlatformKind,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            embed_url: embed_url.into(),
            platform_kind,
        }
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn platform_kind(&self) -> PlatformKind {
        self.platform_kind
    }

    pub fn embed_height(&self) -> u32 {
        self.platform_kind.default_embed_height()
    }
}
