pub mod duration;
pub mod video_id;
