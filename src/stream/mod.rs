//! Playback infrastructure
//!
//! - Controller: single-stream play/pause state machine
//! - Player: VLC/mpv process output

pub mod controller;
pub mod player;

pub use controller::{AudioOutput, PlaybackController};
pub use player::{PlaybackError, PlayerType, ProcessOutput};
