//! Local Player - VLC/mpv audio output
//!
//! Plays radio streams through a headless VLC or mpv process. One process
//! per output; pausing a live stream drops it, resuming reconnects.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use super::controller::AudioOutput;

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpv media player (default)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle - check for it
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Mpv => "mpv",
        }
    }

    /// Get a display name for this player
    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Vlc => "VLC",
            PlayerType::Mpv => "mpv",
        }
    }

    /// Arguments for audio-only, interface-less playback of `url`
    pub fn args(&self, url: &str) -> Vec<String> {
        match self {
            PlayerType::Vlc => vec![
                "--intf".into(),
                "dummy".into(),
                "--no-video".into(),
                url.into(),
            ],
            PlayerType::Mpv => vec![
                "--no-video".into(),
                "--no-terminal".into(),
                "--really-quiet".into(),
                url.into(),
            ],
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors from audio output operations
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("No stream loaded")]
    NothingLoaded,
}

impl PlaybackError {
    /// Whether the failure means there is no usable output at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PlaybackError::NotFound(_))
    }
}

/// Audio output backed by a player process.
///
/// Must be used from within a tokio runtime: spawning registers the child
/// with the runtime's process driver.
pub struct ProcessOutput {
    player_type: PlayerType,
    url: Option<String>,
    child: Option<Child>,
}

impl ProcessOutput {
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            url: None,
            child: None,
        }
    }

    /// Check if the player is available on the system
    pub async fn is_available(&self) -> bool {
        let cmd = self.player_type.command();

        // If it's a full path (macOS app bundle), check if it exists
        if cmd.starts_with('/') {
            return std::path::Path::new(cmd).exists();
        }

        Command::new("which")
            .arg(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Whether a player process is currently running
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn stop_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(pid = ?child.id(), "stopping player");
            let _ = child.start_kill();
        }
    }
}

impl AudioOutput for ProcessOutput {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError> {
        self.stop_child();
        self.url = Some(url.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.is_running() {
            return Ok(());
        }
        let url = self.url.as_deref().ok_or(PlaybackError::NothingLoaded)?;

        let mut cmd = Command::new(self.player_type.command());
        cmd.args(self.player_type.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlaybackError::NotFound(self.player_type.command().to_string())
            } else {
                PlaybackError::StartFailed(e)
            }
        })?;

        info!(player = %self.player_type, url, pid = ?child.id(), "player started");
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.stop_child();
        Ok(())
    }
}

impl Drop for ProcessOutput {
    fn drop(&mut self) {
        self.stop_child();
    }
}
