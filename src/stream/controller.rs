//! Playback controller
//!
//! Owns the single audio output and drives it through
//! Idle → LoadedPlaying ⇄ LoadedPaused. Switching stations unloads the old
//! stream before loading the new one, so two streams never sound at once.

use tracing::{debug, warn};

use super::player::PlaybackError;
use crate::models::PlaybackState;

/// The capabilities the controller needs from an audio output
pub trait AudioOutput: Send {
    /// Replace whatever is loaded with `url`, without starting it
    fn load(&mut self, url: &str) -> Result<(), PlaybackError>;
    /// Start (or resume) the loaded stream
    fn play(&mut self) -> Result<(), PlaybackError>;
    /// Stop sounding; the stream stays loaded
    fn pause(&mut self) -> Result<(), PlaybackError>;
}

/// Single-stream playback state machine.
///
/// With no output mounted every operation is a no-op, since controls can
/// race the output becoming ready.
pub struct PlaybackController {
    output: Option<Box<dyn AudioOutput>>,
    loaded: Option<String>,
    state: PlaybackState,
}

impl PlaybackController {
    /// Controller bound to `output`
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output: Some(output),
            loaded: None,
            state: PlaybackState::Idle,
        }
    }

    /// Controller with nothing mounted yet
    pub fn unmounted() -> Self {
        Self {
            output: None,
            loaded: None,
            state: PlaybackState::Idle,
        }
    }

    /// Bind an output, replacing (and dropping) any previous one.
    /// The new output starts with nothing loaded.
    pub fn mount(&mut self, output: Box<dyn AudioOutput>) {
        self.output = Some(output);
        self.loaded = None;
        self.state = PlaybackState::Idle;
    }

    pub fn is_mounted(&self) -> bool {
        self.output.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// URL of the loaded stream, if any
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Play `url`, switching away from any other loaded stream.
    ///
    /// Selecting the stream that is already playing does nothing; selecting
    /// it while paused resumes it.
    pub fn select(&mut self, url: &str) {
        let Some(output) = self.output.as_mut() else {
            debug!(url, "select ignored: no audio output mounted");
            return;
        };

        if self.loaded.as_deref() == Some(url) {
            if self.state.is_playing() {
                return;
            }
            match output.play() {
                Ok(()) => self.state = PlaybackState::LoadedPlaying,
                Err(e) => report(&e),
            }
            return;
        }

        if self.loaded.is_some() {
            if let Err(e) = output.pause() {
                report(&e);
                return;
            }
            self.state = PlaybackState::LoadedPaused;
        }

        if let Err(e) = output.load(url) {
            report(&e);
            return;
        }
        self.loaded = Some(url.to_string());
        self.state = PlaybackState::LoadedPaused;

        match output.play() {
            Ok(()) => self.state = PlaybackState::LoadedPlaying,
            Err(e) => report(&e),
        }
    }

    /// Pause when playing, resume when paused, nothing when idle
    pub fn toggle(&mut self) {
        let Some(output) = self.output.as_mut() else {
            debug!("toggle ignored: no audio output mounted");
            return;
        };

        match self.state {
            PlaybackState::Idle => {}
            PlaybackState::LoadedPlaying => match output.pause() {
                Ok(()) => self.state = PlaybackState::LoadedPaused,
                Err(e) => report(&e),
            },
            PlaybackState::LoadedPaused => match output.play() {
                Ok(()) => self.state = PlaybackState::LoadedPlaying,
                Err(e) => report(&e),
            },
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("mounted", &self.output.is_some())
            .field("loaded", &self.loaded)
            .field("state", &self.state)
            .finish()
    }
}

fn report(e: &PlaybackError) {
    if e.is_unavailable() {
        debug!(error = %e, "audio output unavailable");
    } else {
        warn!(error = %e, "playback command failed");
    }
}
