//! Radio state snapshot and its transitions
//!
//! `RadioState` is an immutable value: every transition borrows the current
//! snapshot and returns the next one. Side effects (persistence, playback,
//! network) live in [`crate::store::RadioStore`], which applies these
//! transitions and publishes the results.

use serde::Serialize;

use crate::models::{Favorite, PlaybackState, Station};

// =============================================================================
// Loading State
// =============================================================================

/// Loading state of the directory list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum LoadingState {
    /// Idle - no request pending
    #[default]
    Idle,
    /// Waiting for the directory
    Loading,
    /// Last request failed; the list on screen is from an earlier query
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Edit Buffer
// =============================================================================

/// Uncommitted edit of one favorite
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EditBuffer {
    pub favorite_id: Option<String>,
    pub name: String,
    pub country: String,
    pub tags: String,
    pub modal_open: bool,
}

// =============================================================================
// Radio State
// =============================================================================

/// Everything the UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioState {
    /// Current directory page
    pub stations: Vec<Station>,
    pub directory: LoadingState,
    /// Non-fatal message for the user
    pub notice: Option<String>,

    pub favorites: Vec<Favorite>,

    /// Stream picked by the user; set whenever `playing` is
    pub selected_url: Option<String>,
    pub playing: bool,

    pub search_term: String,
    /// Always >= 1
    pub current_page: u32,

    pub edit: EditBuffer,
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RadioState {
    /// Initial state with the persisted favorites, waiting on the first page
    pub fn new(favorites: Vec<Favorite>) -> Self {
        Self {
            stations: Vec::new(),
            directory: LoadingState::Loading,
            notice: None,
            favorites,
            selected_url: None,
            playing: false,
            search_term: String::new(),
            current_page: 1,
            edit: EditBuffer::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Whether any favorite streams from `url`
    pub fn is_favorite(&self, url: &str) -> bool {
        self.favorites.iter().any(|f| f.url_resolved == url)
    }

    pub fn favorite(&self, id: &str) -> Option<&Favorite> {
        self.favorites.iter().find(|f| f.id == id)
    }

    /// Whether `url` is the stream currently sounding
    pub fn is_playing_url(&self, url: &str) -> bool {
        self.playing && self.selected_url.as_deref() == Some(url)
    }

    /// Display name of the selected stream, from the directory page first and
    /// then from favorites
    pub fn selected_station_name(&self) -> Option<&str> {
        let url = self.selected_url.as_deref()?;
        self.stations
            .iter()
            .find(|s| s.url_resolved == url)
            .map(|s| s.name.as_str())
            .or_else(|| {
                self.favorites
                    .iter()
                    .find(|f| f.url_resolved == url)
                    .map(|f| f.name.as_str())
            })
    }

    // -------------------------------------------------------------------------
    // Directory transitions
    // -------------------------------------------------------------------------

    /// Replace the directory page wholesale
    pub fn with_stations(&self, stations: Vec<Station>) -> Self {
        Self {
            stations,
            directory: LoadingState::Idle,
            notice: None,
            ..self.clone()
        }
    }

    /// Record a failed refresh; the current page stays on screen
    pub fn with_directory_error(&self, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            directory: LoadingState::Error(message.clone()),
            notice: Some(message),
            ..self.clone()
        }
    }

    /// Mark a query as in flight
    pub fn with_loading(&self) -> Self {
        Self {
            directory: LoadingState::Loading,
            ..self.clone()
        }
    }

    /// New search term; always back to page 1
    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Jump to `page` (0 is read as 1)
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Favorite transitions
    // -------------------------------------------------------------------------

    /// Append a copy of `station` under `id`, unless its stream is already a
    /// favorite
    pub fn with_favorite_added(&self, station: &Station, id: String) -> Self {
        if self.is_favorite(&station.url_resolved) {
            return self.clone();
        }
        let mut favorites = self.favorites.clone();
        favorites.push(Favorite::from_station(station, id));
        Self {
            favorites,
            ..self.clone()
        }
    }

    pub fn with_favorite_removed(&self, id: &str) -> Self {
        Self {
            favorites: self
                .favorites
                .iter()
                .filter(|f| f.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Selection transitions
    // -------------------------------------------------------------------------

    /// Mirror the playback controller after it acted
    pub fn with_playback(&self, loaded_url: Option<&str>, playback: PlaybackState) -> Self {
        let selected_url = loaded_url
            .map(str::to_string)
            .or_else(|| self.selected_url.clone());
        Self {
            playing: playback.is_playing() && selected_url.is_some(),
            selected_url,
            ..self.clone()
        }
    }

    /// Highlight a stream without playing it. Ignored while something plays,
    /// so the playing stream stays the selected one.
    pub fn with_selected(&self, url: Option<String>) -> Self {
        if self.playing {
            return self.clone();
        }
        Self {
            selected_url: url,
            ..self.clone()
        }
    }

    // -------------------------------------------------------------------------
    // Edit transitions
    // -------------------------------------------------------------------------

    /// Seed the buffer from `favorite` and open the dialog
    pub fn with_edit_opened(&self, favorite: &Favorite) -> Self {
        Self {
            edit: EditBuffer {
                favorite_id: Some(favorite.id.clone()),
                name: favorite.name.clone(),
                country: favorite.country.clone(),
                tags: favorite.tags.clone(),
                modal_open: true,
            },
            ..self.clone()
        }
    }

    pub fn with_edited_name(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.edit.name = name.into();
        next
    }

    pub fn with_edited_country(&self, country: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.edit.country = country.into();
        next
    }

    pub fn with_edited_tags(&self, tags: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.edit.tags = tags.into();
        next
    }

    /// Apply the buffer to its favorite and close the dialog. Without an edit
    /// target nothing changes.
    pub fn with_edit_committed(&self) -> Self {
        let Some(target) = self.edit.favorite_id.as_deref() else {
            return self.clone();
        };

        let favorites = self
            .favorites
            .iter()
            .map(|f| {
                if f.id == target {
                    Favorite {
                        name: self.edit.name.clone(),
                        country: self.edit.country.clone(),
                        tags: self.edit.tags.clone(),
                        ..f.clone()
                    }
                } else {
                    f.clone()
                }
            })
            .collect();

        Self {
            favorites,
            edit: EditBuffer::default(),
            ..self.clone()
        }
    }

    /// Close the dialog, dropping the buffer
    pub fn with_edit_discarded(&self) -> Self {
        Self {
            edit: EditBuffer::default(),
            ..self.clone()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, url: &str) -> Station {
        Station {
            id: id.into(),
            name: format!("Station {}", id),
            url_resolved: url.into(),
            country: "BR".into(),
            tags: "jazz,live".into(),
            votes: 1,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = RadioState::default();
        assert_eq!(state.current_page, 1);
        assert!(state.directory.is_loading());
        assert!(!state.playing);
        assert!(!state.edit.modal_open);
    }

    #[test]
    fn test_search_term_resets_page() {
        let state = RadioState::default().with_page(7).with_search_term("jazz");
        assert_eq!(state.current_page, 1);
        assert_eq!(state.search_term, "jazz");
    }

    #[test]
    fn test_page_zero_clamped() {
        assert_eq!(RadioState::default().with_page(0).current_page, 1);
    }

    #[test]
    fn test_directory_error_keeps_list() {
        let state = RadioState::default()
            .with_stations(vec![station("1", "http://a")])
            .with_directory_error("offline");
        assert_eq!(state.stations.len(), 1);
        assert_eq!(state.directory.message(), Some("offline"));
        assert_eq!(state.notice.as_deref(), Some("offline"));

        let recovered = state.with_stations(vec![]);
        assert!(recovered.notice.is_none());
        assert_eq!(recovered.directory, LoadingState::Idle);
    }

    #[test]
    fn test_duplicate_stream_not_added() {
        let state = RadioState::default()
            .with_favorite_added(&station("1", "http://a"), "1-1".into())
            .with_favorite_added(&station("2", "http://a"), "2-1".into());
        assert_eq!(state.favorites.len(), 1);
        assert_eq!(state.favorites[0].id, "1-1");
    }

    #[test]
    fn test_transitions_leave_source_untouched() {
        let before = RadioState::default();
        let after = before.with_favorite_added(&station("1", "http://a"), "1-1".into());
        assert!(before.favorites.is_empty());
        assert_eq!(after.favorites.len(), 1);
    }

    #[test]
    fn test_with_selected_ignored_while_playing() {
        let state = RadioState::default().with_playback(Some("http://a"), PlaybackState::LoadedPlaying);
        let next = state.with_selected(Some("http://b".into()));
        assert_eq!(next.selected_url.as_deref(), Some("http://a"));

        let paused = state.with_playback(Some("http://a"), PlaybackState::LoadedPaused);
        let next = paused.with_selected(Some("http://b".into()));
        assert_eq!(next.selected_url.as_deref(), Some("http://b"));
    }

    #[test]
    fn test_playing_implies_selected() {
        let state = RadioState::default().with_playback(None, PlaybackState::LoadedPlaying);
        assert!(!state.playing);
        assert!(state.selected_url.is_none());
    }

    #[test]
    fn test_edit_commit_applies_buffer() {
        let state = RadioState::default()
            .with_favorite_added(&station("1", "http://a"), "1-1".into());
        let fav = state.favorites[0].clone();

        let state = state
            .with_edit_opened(&fav)
            .with_edited_name("Renamed")
            .with_edited_country("PT")
            .with_edited_tags("news")
            .with_edit_committed();

        assert!(!state.edit.modal_open);
        assert_eq!(state.favorites[0].name, "Renamed");
        assert_eq!(state.favorites[0].country, "PT");
        assert_eq!(state.favorites[0].tags, "news");
        assert_eq!(state.favorites[0].url_resolved, "http://a");
    }

    #[test]
    fn test_edit_discard_leaves_favorite() {
        let state = RadioState::default()
            .with_favorite_added(&station("1", "http://a"), "1-1".into());
        let fav = state.favorites[0].clone();

        let state = state
            .with_edit_opened(&fav)
            .with_edited_name("Renamed")
            .with_edit_discarded();

        assert_eq!(state.favorites[0], fav);
        assert_eq!(state.edit, EditBuffer::default());
    }

    #[test]
    fn test_commit_without_open_is_noop() {
        let state = RadioState::default()
            .with_favorite_added(&station("1", "http://a"), "1-1".into())
            .with_edited_name("Ghost");
        assert_eq!(state.with_edit_committed(), state);
    }

    #[test]
    fn test_selected_station_name_falls_back_to_favorites() {
        let state = RadioState::default()
            .with_favorite_added(&station("1", "http://a"), "1-1".into())
            .with_playback(Some("http://a"), PlaybackState::LoadedPlaying);
        assert_eq!(state.selected_station_name(), Some("Station 1"));

        let state = state.with_stations(vec![Station {
            name: "Directory Name".into(),
            ..station("9", "http://a")
        }]);
        assert_eq!(state.selected_station_name(), Some("Directory Name"));
    }
}
