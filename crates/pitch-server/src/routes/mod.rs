pub mod checkpoints;
pub mod config;
pub mod cues;
pub mod events;
pub mod mode;
pub mod scenes;
pub mod segments;
pub mod session;
pub mod timer;
pub mod tmdb;
