//! Favorites persistence
//!
//! The favorites list is stored as one JSON array in a single file,
//! `<config dir>/radiotui/favoriteStations.json` by default. Every save
//! rewrites the whole file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Favorite;

/// File name of the favorites payload
pub const FAVORITES_KEY: &str = "favoriteStations";

/// Errors from writing favorites
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine favorites path")]
    NoPath,
    #[error("Failed to write favorites: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage for the favorites list.
///
/// `load` never fails: a missing or unreadable payload is an empty list.
pub trait FavoritesStorage {
    fn load(&self) -> Vec<Favorite>;
    fn save(&self, favorites: &[Favorite]) -> Result<(), StorageError>;
}

// =============================================================================
// JSON file storage
// =============================================================================

/// Favorites kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radiotui").join(format!("{}.json", FAVORITES_KEY)))
    }

    /// Storage at the default location
    pub fn at_default_path() -> Result<Self, StorageError> {
        Self::default_path().map(Self::new).ok_or(StorageError::NoPath)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> Vec<Favorite> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no favorites file yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "favorites unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Favorite>>(&content) {
            Ok(favorites) => {
                debug!(count = favorites.len(), "favorites loaded");
                favorites
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "favorites payload corrupt, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(favorites)?;

        // Readers never see a partially written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(count = favorites.len(), path = %self.path.display(), "favorites saved");
        Ok(())
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Favorites kept in memory only (`--no-persist` sessions, tests).
///
/// Clones share the same payload, so a test can keep a handle and inspect
/// what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    payload: Arc<Mutex<Vec<Favorite>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `favorites`
    pub fn with_favorites(favorites: Vec<Favorite>) -> Self {
        Self {
            payload: Arc::new(Mutex::new(favorites)),
            saves: Arc::default(),
        }
    }

    /// Current persisted payload
    pub fn snapshot(&self) -> Vec<Favorite> {
        self.payload.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl FavoritesStorage for MemoryStorage {
    fn load(&self) -> Vec<Favorite> {
        self.snapshot()
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), StorageError> {
        if let Ok(mut payload) = self.payload.lock() {
            *payload = favorites.to_vec();
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}
