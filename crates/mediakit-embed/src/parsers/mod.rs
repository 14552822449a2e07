pub mod apple_music;
pub mod spotify;
