//! Radio store
//!
//! Owns the current [`RadioState`] together with the ports it acts through:
//! favorites storage, playback, and directory search. Each operation applies
//! a pure transition, performs the side effects it implies, then publishes
//! the new snapshot to subscribers.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::favorites::FavoritesStorage;
use crate::models::{Favorite, Station};
use crate::search::{SearchCompletion, SearchPort};
use crate::state::RadioState;
use crate::stream::PlaybackController;

/// Application state store
pub struct RadioStore {
    state: RadioState,
    storage: Box<dyn FavoritesStorage>,
    playback: PlaybackController,
    search: Box<dyn SearchPort>,
    tx: watch::Sender<RadioState>,
}

impl RadioStore {
    /// Build the store, reading persisted favorites once
    pub fn new(
        storage: Box<dyn FavoritesStorage>,
        playback: PlaybackController,
        search: Box<dyn SearchPort>,
    ) -> Self {
        let favorites = storage.load();
        info!(count = favorites.len(), "favorites restored");
        let state = RadioState::new(favorites);
        let (tx, _) = watch::channel(state.clone());
        Self {
            state,
            storage,
            playback,
            search,
            tx,
        }
    }

    /// Current snapshot
    pub fn state(&self) -> &RadioState {
        &self.state
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<RadioState> {
        self.tx.subscribe()
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn is_favorite(&self, url: &str) -> bool {
        self.state.is_favorite(url)
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Fetch the current term and page without waiting out the debounce
    pub fn refresh(&mut self) {
        let generation = self
            .search
            .dispatch_now(&self.state.search_term, self.state.current_page);
        debug!(generation, "refresh requested");
        self.commit(self.state.with_loading());
    }

    pub fn set_stations(&mut self, stations: Vec<Station>) {
        self.commit(self.state.with_stations(stations));
    }

    /// New search term: page goes back to 1 and a debounced query is scheduled
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let next = self.state.with_search_term(term).with_loading();
        self.search.schedule(&next.search_term, next.current_page);
        self.commit(next);
    }

    pub fn set_current_page(&mut self, page: u32) {
        let next = self.state.with_page(page).with_loading();
        self.search.schedule(&next.search_term, next.current_page);
        self.commit(next);
    }

    pub fn next_page(&mut self) {
        self.set_current_page(self.state.current_page.saturating_add(1));
    }

    /// Previous page; nothing below page 1
    pub fn previous_page(&mut self) {
        if self.state.current_page > 1 {
            self.set_current_page(self.state.current_page - 1);
        }
    }

    /// Fold a finished query into the state. Returns false when the result
    /// was superseded and dropped.
    pub fn apply_search_result(&mut self, completion: SearchCompletion) -> bool {
        if !self.search.is_current(completion.generation) {
            debug!(
                generation = completion.generation,
                latest = self.search.latest(),
                "dropping stale search result"
            );
            return false;
        }

        match completion.result {
            Ok(stations) => {
                debug!(count = stations.len(), page = completion.page, "stations received");
                self.commit(self.state.with_stations(stations));
            }
            Err(e) => {
                warn!(error = %e, term = %completion.term, "directory search failed");
                self.commit(self.state.with_directory_error(e.to_string()));
            }
        }
        true
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Save a copy of `station`, unless its stream is already a favorite
    pub fn add_to_favorites(&mut self, station: &Station) {
        if self.state.is_favorite(&station.url_resolved) {
            debug!(url = %station.url_resolved, "already a favorite");
            return;
        }
        let id = Favorite::unique_id(station, &self.state.favorites);
        self.commit(self.state.with_favorite_added(station, id));
    }

    pub fn remove_from_favorites(&mut self, id: &str) {
        self.commit(self.state.with_favorite_removed(id));
    }

    /// Add when absent, remove every favorite of that stream when present
    pub fn toggle_favorite(&mut self, station: &Station) {
        let ids: Vec<String> = self
            .state
            .favorites
            .iter()
            .filter(|f| f.url_resolved == station.url_resolved)
            .map(|f| f.id.clone())
            .collect();

        if ids.is_empty() {
            self.add_to_favorites(station);
        } else {
            let next = ids
                .iter()
                .fold(self.state.clone(), |state, id| state.with_favorite_removed(id));
            self.commit(next);
        }
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Play `url`, switching away from whatever was playing
    pub fn select_station(&mut self, url: &str) {
        self.playback.select(url);
        let next = self
            .state
            .with_playback(self.playback.loaded_url(), self.playback.state());
        self.commit(next);
    }

    pub fn toggle_play(&mut self) {
        self.playback.toggle();
        let next = self
            .state
            .with_playback(self.playback.loaded_url(), self.playback.state());
        self.commit(next);
    }

    /// Highlight a stream without touching playback
    pub fn set_selected_station(&mut self, url: Option<String>) {
        self.commit(self.state.with_selected(url));
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Open the edit dialog for favorite `id`
    pub fn open_edit_modal(&mut self, id: &str) {
        let Some(favorite) = self.state.favorite(id).cloned() else {
            debug!(id, "edit requested for unknown favorite");
            return;
        };
        self.commit(self.state.with_edit_opened(&favorite));
    }

    pub fn set_edited_name(&mut self, name: impl Into<String>) {
        self.commit(self.state.with_edited_name(name));
    }

    pub fn set_edited_country(&mut self, country: impl Into<String>) {
        self.commit(self.state.with_edited_country(country));
    }

    pub fn set_edited_tags(&mut self, tags: impl Into<String>) {
        self.commit(self.state.with_edited_tags(tags));
    }

    /// Apply the edit buffer and close the dialog
    pub fn commit_edit(&mut self) {
        self.commit(self.state.with_edit_committed());
    }

    /// Close the dialog without saving
    pub fn close_edit_modal(&mut self) {
        self.commit(self.state.with_edit_discarded());
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self, next: RadioState) {
        if next == self.state {
            return;
        }
        let favorites_changed = next.favorites != self.state.favorites;
        self.state = next;

        if favorites_changed {
            if let Err(e) = self.storage.save(&self.state.favorites) {
                warn!(error = %e, "failed to persist favorites");
            }
        }

        self.tx.send_replace(self.state.clone());
    }
}

impl std::fmt::Debug for RadioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioStore")
            .field("state", &self.state)
            .field("playback", &self.playback)
            .finish()
    }
}
