mod error;
mod media;
mod video;

pub use error::{MediaError, MediaResult};
pub use media::{ParsedMediaUrl, PlatformKind};
pub use video::VideoMetadata;

pub fn validate_url(url: &str) -> MediaResult<url::Url> {
    url::Url::parse(url).map_err(|err| MediaError::InvalidInput(format!("invalid url: {err}")))
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::MediaError;

    #[test]
    fn test_validate_url_valid_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("https://www.youtube.com/watch?v=abc123").is_ok());
    }

    #[test]
    fn test_validate_url_returns_parsed_host() {
        let url = validate_url("https://YouTu.be/abc123").unwrap();
        assert_eq!(url.host_str(), Some("youtu.be"));
    }

    #[test]
    fn test_validate_url_invalid() {
        let result = validate_url("not-a-url");
        assert!(matches!(result, Err(MediaError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_url_error_message() {
        let result = validate_url("://no-scheme");
        match result {
            Err(MediaError::InvalidInput(msg)) => assert!(msg.contains("invalid url")),
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
