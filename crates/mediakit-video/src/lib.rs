pub mod api;
pub mod fetcher;
pub mod parsers;

pub use fetcher::VideoMetadataFetcher;
pub use parsers::duration::format_duration;
pub use parsers::video_id::extract_video_id;
