//! Data structures and types for RadioTUI
//!
//! Contains the shared models used across the application:
//! - **Directory**: stations as returned by the radio directory
//! - **Favorites**: locally persisted, editable copies of stations
//! - **Playback**: the state of the single audio output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// Directory Models
// =============================================================================

/// A radio station from one directory query.
///
/// `id` is only unique within a single result page; the stream URL is what
/// identifies a station for playback and favorite matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub url_resolved: String,
    pub country: String,
    pub tags: String,
    pub votes: u64,
}

impl Station {
    /// Short "country, tag, tag" line for list rows
    pub fn summary(&self) -> String {
        summarize(&self.country, &self.tags)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} [{}]", self.name, self.country)
        }
    }
}

// =============================================================================
// Favorite Models
// =============================================================================

/// A station the user chose to keep.
///
/// Serialized as `{id, name, url_resolved, country, tags}`; this is the
/// on-disk format of the favorites file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub url_resolved: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub tags: String,
}

impl Favorite {
    /// Copy a station into a new favorite with a local id.
    ///
    /// The id is `<station id>-<unix millis>`. Callers that need uniqueness
    /// against an existing list should go through [`Favorite::unique_id`].
    pub fn from_station(station: &Station, id: String) -> Self {
        Self {
            id,
            name: station.name.clone(),
            url_resolved: station.url_resolved.clone(),
            country: station.country.clone(),
            tags: station.tags.clone(),
        }
    }

    /// Generate an id for `station` that no entry of `existing` uses
    pub fn unique_id(station: &Station, existing: &[Favorite]) -> String {
        let base = format!("{}-{}", station.id, unix_millis());
        if !existing.iter().any(|f| f.id == base) {
            return base;
        }
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !existing.iter().any(|f| &f.id == candidate))
            .unwrap_or(base)
    }

    pub fn summary(&self) -> String {
        summarize(&self.country, &self.tags)
    }
}

impl fmt::Display for Favorite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url_resolved)
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn split_tags(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Country followed by at most two tags
fn summarize(country: &str, tags: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !country.is_empty() {
        parts.push(country);
    }
    parts.extend(split_tags(tags).into_iter().take(2));
    parts.join(", ")
}

// =============================================================================
// Playback Models
// =============================================================================

/// State of the single audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded
    #[default]
    Idle,
    /// A stream is loaded but not sounding
    LoadedPaused,
    /// A stream is loaded and playing
    LoadedPlaying,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::LoadedPlaying)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "Idle"),
            PlaybackState::LoadedPaused => write!(f, "⏸ Paused"),
            PlaybackState::LoadedPlaying => write!(f, "▶ Playing"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
