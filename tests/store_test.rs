//! Radio store tests
//!
//! Drives the store through its ports with in-memory fakes: favorites
//! storage, a recording audio output and a search port that only counts.

use std::sync::{Arc, Mutex};

use radiotui::api::DirectoryError;
use radiotui::favorites::{FavoritesStorage, JsonFileStorage, MemoryStorage};
use radiotui::search::{SearchCompletion, SearchPort};
use radiotui::stream::{AudioOutput, PlaybackController, PlaybackError};
use radiotui::{Favorite, LoadingState, PlaybackState, RadioStore, Station};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Clone, Default)]
struct RecordingOutput {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingOutput {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioOutput for RecordingOutput {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError> {
        self.calls.lock().unwrap().push(format!("load {}", url));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.lock().unwrap().push("play".into());
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.calls.lock().unwrap().push("pause".into());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingSearch {
    issued: Arc<Mutex<Vec<(String, u32)>>>,
}

impl CountingSearch {
    fn issued(&self) -> Vec<(String, u32)> {
        self.issued.lock().unwrap().clone()
    }
}

impl SearchPort for CountingSearch {
    fn schedule(&mut self, term: &str, page: u32) -> u64 {
        let mut issued = self.issued.lock().unwrap();
        issued.push((term.to_string(), page));
        issued.len() as u64
    }

    fn dispatch_now(&mut self, term: &str, page: u32) -> u64 {
        self.schedule(term, page)
    }

    fn latest(&self) -> u64 {
        self.issued.lock().unwrap().len() as u64
    }
}

struct Harness {
    store: RadioStore,
    storage: MemoryStorage,
    output: RecordingOutput,
    search: CountingSearch,
}

fn harness_with(favorites: Vec<Favorite>) -> Harness {
    let storage = MemoryStorage::with_favorites(favorites);
    let output = RecordingOutput::default();
    let search = CountingSearch::default();
    let store = RadioStore::new(
        Box::new(storage.clone()),
        PlaybackController::new(Box::new(output.clone())),
        Box::new(search.clone()),
    );
    Harness {
        store,
        storage,
        output,
        search,
    }
}

fn harness() -> Harness {
    harness_with(Vec::new())
}

fn station(id: &str, name: &str, url: &str) -> Station {
    Station {
        id: id.into(),
        name: name.into(),
        url_resolved: url.into(),
        country: "UK".into(),
        tags: "jazz".into(),
        votes: 10,
    }
}

fn jazz_fm() -> Station {
    station("7", "Jazz FM", "http://j")
}

fn completion(generation: u64, result: Result<Vec<Station>, DirectoryError>) -> SearchCompletion {
    SearchCompletion {
        generation,
        term: String::new(),
        page: 1,
        result,
    }
}

// =============================================================================
// Favorites
// =============================================================================

#[test]
fn test_add_jazz_fm_scenario() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());

    let favorites = &h.store.state().favorites;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].name, "Jazz FM");
    assert_eq!(favorites[0].url_resolved, "http://j");
    assert_ne!(favorites[0].id, "7");
    assert!(favorites[0].id.starts_with("7-"));
    assert!(h.store.is_favorite("http://j"));

    assert_eq!(h.storage.snapshot(), h.store.state().favorites);
    assert_eq!(h.storage.save_count(), 1);
}

#[test]
fn test_duplicate_url_with_other_id_ignored() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());
    h.store.add_to_favorites(&station("8", "Jazz FM Mirror", "http://j"));

    assert_eq!(h.store.state().favorites.len(), 1);
    assert_eq!(h.storage.save_count(), 1, "no-op add does not persist");
}

#[test]
fn test_no_duplicate_urls_over_any_sequence() {
    let mut h = harness();
    let urls = ["http://a", "http://b", "http://a", "http://c", "http://b", "http://a"];
    for (i, url) in urls.iter().enumerate() {
        h.store.add_to_favorites(&station(&i.to_string(), "S", url));
        if i == 3 {
            let id = h.store.state().favorites[0].id.clone();
            h.store.remove_from_favorites(&id);
        }
    }

    let mut seen: Vec<&str> = h
        .store
        .state()
        .favorites
        .iter()
        .map(|f| f.url_resolved.as_str())
        .collect();
    let before = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), before);
}

#[test]
fn test_double_remove_is_idempotent() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());
    h.store.add_to_favorites(&station("9", "Other", "http://o"));
    let id = h.store.state().favorites[0].id.clone();

    h.store.remove_from_favorites(&id);
    let once = h.store.state().clone();
    h.store.remove_from_favorites(&id);

    assert_eq!(h.store.state(), &once);
    assert_eq!(h.store.state().favorites.len(), 1);
    assert_eq!(h.storage.snapshot().len(), 1);
}

#[test]
fn test_toggle_favorite() {
    let mut h = harness();
    h.store.toggle_favorite(&jazz_fm());
    assert!(h.store.is_favorite("http://j"));
    h.store.toggle_favorite(&jazz_fm());
    assert!(!h.store.is_favorite("http://j"));
    assert!(h.storage.snapshot().is_empty());
}

#[test]
fn test_favorites_loaded_once_at_construction() {
    let seeded = vec![Favorite {
        id: "7-1".into(),
        name: "Jazz FM".into(),
        url_resolved: "http://j".into(),
        country: "UK".into(),
        tags: "jazz".into(),
    }];
    let h = harness_with(seeded.clone());

    assert_eq!(h.store.state().favorites, seeded);
    assert_eq!(h.storage.save_count(), 0);
}

#[test]
fn test_favorites_survive_restart_on_disk() {
    let path = std::env::temp_dir()
        .join(format!("radiotui-store-{}", std::process::id()))
        .join("favoriteStations.json");
    let _ = std::fs::remove_file(&path);

    let mut store = RadioStore::new(
        Box::new(JsonFileStorage::new(&path)),
        PlaybackController::unmounted(),
        Box::new(CountingSearch::default()),
    );
    store.add_to_favorites(&jazz_fm());
    let id = store.state().favorites[0].id.clone();
    drop(store);

    let reloaded = JsonFileStorage::new(&path).load();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].id, id);
    assert_eq!(reloaded[0].country, "UK");
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn test_edit_round() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());
    let id = h.store.state().favorites[0].id.clone();

    h.store.open_edit_modal(&id);
    let edit = &h.store.state().edit;
    assert!(edit.modal_open);
    assert_eq!(edit.favorite_id.as_deref(), Some(id.as_str()));
    assert_eq!(edit.name, "Jazz FM");

    h.store.set_edited_name("Jazz FM London");
    h.store.set_edited_country("GB");
    h.store.set_edited_tags("jazz,soul");
    h.store.commit_edit();

    let fav = &h.store.state().favorites[0];
    assert_eq!(fav.name, "Jazz FM London");
    assert_eq!(fav.country, "GB");
    assert_eq!(fav.tags, "jazz,soul");
    assert_eq!(fav.id, id);
    assert!(!h.store.state().edit.modal_open);
    assert_eq!(h.storage.snapshot()[0].name, "Jazz FM London");
}

#[test]
fn test_commit_without_open_is_noop() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());
    let before = h.store.state().clone();
    let saves = h.storage.save_count();

    h.store.commit_edit();

    assert_eq!(h.store.state(), &before);
    assert_eq!(h.storage.save_count(), saves);
}

#[test]
fn test_close_modal_discards() {
    let mut h = harness();
    h.store.add_to_favorites(&jazz_fm());
    let id = h.store.state().favorites[0].id.clone();

    h.store.open_edit_modal(&id);
    h.store.set_edited_name("Nope");
    h.store.close_edit_modal();
    h.store.commit_edit();

    assert_eq!(h.store.state().favorites[0].name, "Jazz FM");
    assert!(h.store.state().edit.favorite_id.is_none());
}

#[test]
fn test_open_unknown_favorite_ignored() {
    let mut h = harness();
    h.store.open_edit_modal("missing");
    assert!(!h.store.state().edit.modal_open);
}

// =============================================================================
// Playback
// =============================================================================

#[test]
fn test_select_twice_while_playing() {
    let mut h = harness();
    h.store.select_station("http://a");
    h.store.select_station("http://a");

    assert_eq!(h.store.playback().state(), PlaybackState::LoadedPlaying);
    assert!(h.store.state().playing);
    assert_eq!(h.output.calls(), vec!["load http://a", "play"]);
}

#[test]
fn test_switch_station_sequence() {
    let mut h = harness();
    h.store.select_station("http://a");
    h.store.select_station("http://b");

    assert_eq!(
        h.output.calls(),
        vec!["load http://a", "play", "pause", "load http://b", "play"]
    );
    assert_eq!(h.store.state().selected_url.as_deref(), Some("http://b"));
    assert!(h.store.state().playing);
}

#[test]
fn test_toggle_play() {
    let mut h = harness();
    h.store.toggle_play();
    assert!(!h.store.state().playing);
    assert!(h.output.calls().is_empty());

    h.store.select_station("http://a");
    h.store.toggle_play();
    assert!(!h.store.state().playing);
    assert_eq!(h.store.state().selected_url.as_deref(), Some("http://a"));

    h.store.toggle_play();
    assert!(h.store.state().playing);
}

#[test]
fn test_unmounted_output_leaves_state() {
    let mut store = RadioStore::new(
        Box::new(MemoryStorage::new()),
        PlaybackController::unmounted(),
        Box::new(CountingSearch::default()),
    );
    store.select_station("http://a");
    store.toggle_play();

    assert!(!store.state().playing);
    assert!(store.state().selected_url.is_none());
}

#[test]
fn test_set_selected_only_when_not_playing() {
    let mut h = harness();
    h.store.set_selected_station(Some("http://x".into()));
    assert_eq!(h.store.state().selected_url.as_deref(), Some("http://x"));

    h.store.select_station("http://a");
    h.store.set_selected_station(Some("http://x".into()));
    assert_eq!(h.store.state().selected_url.as_deref(), Some("http://a"));
}

#[test]
fn test_now_playing_name() {
    let mut h = harness();
    h.store.set_stations(vec![jazz_fm()]);
    h.store.select_station("http://j");
    assert_eq!(h.store.state().selected_station_name(), Some("Jazz FM"));
}

// =============================================================================
// Directory
// =============================================================================

#[test]
fn test_search_term_resets_page_and_schedules() {
    let mut h = harness();
    h.store.set_current_page(4);
    h.store.set_search_term("jazz");

    assert_eq!(h.store.state().current_page, 1);
    assert_eq!(h.store.state().search_term, "jazz");
    assert_eq!(
        h.search.issued(),
        vec![(String::new(), 4), ("jazz".to_string(), 1)]
    );
}

#[test]
fn test_previous_page_stops_at_one() {
    let mut h = harness();
    h.store.previous_page();
    assert_eq!(h.store.state().current_page, 1);
    assert!(h.search.issued().is_empty());

    h.store.next_page();
    h.store.previous_page();
    assert_eq!(h.store.state().current_page, 1);
    assert_eq!(h.search.issued().len(), 2);
}

#[test]
fn test_latest_result_applied() {
    let mut h = harness();
    h.store.set_search_term("jazz");

    assert!(h
        .store
        .apply_search_result(completion(1, Ok(vec![jazz_fm()]))));
    assert_eq!(h.store.state().stations, vec![jazz_fm()]);
    assert_eq!(h.store.state().directory, LoadingState::Idle);
}

#[test]
fn test_stale_result_discarded() {
    let mut h = harness();
    h.store.set_search_term("j");
    h.store.set_search_term("jazz");

    // Response for "jazz" lands first, then the late one for "j"
    assert!(h
        .store
        .apply_search_result(completion(2, Ok(vec![jazz_fm()]))));
    assert!(!h
        .store
        .apply_search_result(completion(1, Ok(vec![station("1", "J-Pop", "http://p")]))));

    assert_eq!(h.store.state().stations, vec![jazz_fm()]);
}

#[test]
fn test_failed_search_keeps_list() {
    let mut h = harness();
    h.store.set_stations(vec![jazz_fm()]);
    h.store.set_current_page(2);

    h.store
        .apply_search_result(completion(1, Err(DirectoryError::Status(503))));

    let state = h.store.state();
    assert_eq!(state.stations, vec![jazz_fm()]);
    assert!(state.directory.is_error());
    assert!(state.notice.as_deref().unwrap_or_default().contains("503"));
}

#[test]
fn test_refresh_dispatches_current_query() {
    let mut h = harness();
    h.store.refresh();
    assert!(h.store.state().directory.is_loading());
    assert_eq!(h.search.issued(), vec![(String::new(), 1)]);
}

// =============================================================================
// Subscription
// =============================================================================

#[test]
fn test_subscribers_see_each_snapshot() {
    let mut h = harness();
    let mut rx = h.store.subscribe();
    assert!(!rx.has_changed().unwrap());

    h.store.add_to_favorites(&jazz_fm());
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().favorites.len(), 1);

    // No-op transitions publish nothing
    h.store.add_to_favorites(&jazz_fm());
    assert!(!rx.has_changed().unwrap());
}
