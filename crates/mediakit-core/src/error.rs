use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type MediaResult<T> = Result<T, MediaError>;
