//! radiotui - Internet radio browser for the terminal
//!
//! Search the Radio Browser directory, keep favorites on disk and play one
//! stream at a time through a local player.
//!
//! # Modules
//!
//! - `models` - Stations, favorites, playback state
//! - `api` - Radio Browser directory client
//! - `favorites` - Favorites persistence
//! - `stream` - Playback controller and player process output
//! - `state` - Immutable state snapshot and transitions
//! - `store` - State store wiring transitions to side effects
//! - `search` - Debounced directory queries
//! - `ui` - TUI components
//! - `app` - Terminal state and key handling

pub mod models;
pub mod api;
pub mod favorites;
pub mod stream;
pub mod state;
pub mod store;
pub mod search;
pub mod config;
pub mod cli;
pub mod ui;
pub mod app;

// Re-export commonly used types
pub use models::{Favorite, PlaybackState, Station};

pub use api::{DirectoryError, RadioBrowserClient};
pub use app::App;
pub use state::{LoadingState, RadioState};
pub use store::RadioStore;
