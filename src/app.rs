//! App state and core application logic
//!
//! Owns the radio store plus everything that only matters to the terminal:
//! pane focus, list cursors, text inputs. Keys are translated into store
//! operations here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{Favorite, Station};
use crate::search::SearchCompletion;
use crate::state::RadioState;
use crate::store::RadioStore;

// =============================================================================
// Focus & Input Mode
// =============================================================================

/// Pane receiving navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Directory results (sidebar)
    #[default]
    Stations,
    /// Saved favorites (main panel)
    Favorites,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Stations => Pane::Favorites,
            Pane::Favorites => Pane::Stations,
        }
    }
}

/// Field of the edit dialog holding the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Country,
    Tags,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Country,
            EditField::Country => EditField::Tags,
            EditField::Tags => EditField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EditField::Name => EditField::Tags,
            EditField::Country => EditField::Name,
            EditField::Tags => EditField::Country,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Country => "Country",
            EditField::Tags => "Tags",
        }
    }
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into the search box
    Search,
    /// Typing into the edit dialog
    Edit(EditField),
}

impl InputMode {
    pub fn is_typing(&self) -> bool {
        !matches!(self, InputMode::Normal)
    }
}

// =============================================================================
// Selection State (per-pane)
// =============================================================================

/// Cursor over one of the list panes. The viewport offset is derived at
/// render time from `selected`.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Track a new item count, keeping the cursor in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// =============================================================================
// Text Input
// =============================================================================

/// Single-line text input with a char-indexed cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    /// Cursor position in chars
    pub cursor: usize,
}

impl TextInput {
    /// Input holding `value`, cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) -> bool {
        let had = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        had
    }

    /// Apply an editing key; returns true when the text changed
    fn apply(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.left();
                false
            }
            KeyCode::Right => {
                self.right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            _ => false,
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub focus: Pane,
    pub input_mode: InputMode,
    /// One-shot status line message, cleared on the next key
    pub status: Option<String>,
    /// Shown whenever the status line is otherwise idle; survives key presses
    pub playback_warning: Option<String>,

    pub search: TextInput,
    /// Input for the edit dialog field holding the cursor
    pub edit_input: TextInput,

    pub stations_list: ListState,
    pub favorites_list: ListState,

    store: RadioStore,
}

impl App {
    pub fn new(store: RadioStore) -> Self {
        let mut app = Self {
            running: true,
            focus: Pane::Stations,
            input_mode: InputMode::Normal,
            status: None,
            playback_warning: None,
            search: TextInput::with_value(store.state().search_term.clone()),
            edit_input: TextInput::default(),
            stations_list: ListState::default(),
            favorites_list: ListState::default(),
            store,
        };
        app.sync_lists();
        app
    }

    pub fn state(&self) -> &RadioState {
        self.store.state()
    }

    pub fn store(&self) -> &RadioStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RadioStore {
        &mut self.store
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn highlighted_station(&self) -> Option<&Station> {
        self.state().stations.get(self.stations_list.selected)
    }

    pub fn highlighted_favorite(&self) -> Option<&Favorite> {
        self.state().favorites.get(self.favorites_list.selected)
    }

    /// Fold a directory completion in; a fresh page puts the cursor back on
    /// top
    pub fn on_search_completion(&mut self, completion: SearchCompletion) {
        let succeeded = completion.result.is_ok();
        if self.store.apply_search_result(completion) && succeeded {
            self.stations_list.first();
        }
        self.sync_lists();
    }

    fn sync_lists(&mut self) {
        let stations = self.store.state().stations.len();
        let favorites = self.store.state().favorites.len();
        self.stations_list.set_len(stations);
        self.favorites_list.set_len(favorites);
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.status = None;
        // The store may have changed since the last key
        self.sync_lists();

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        let consumed = match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::Edit(field) => self.handle_edit_key(key, field),
        };
        self.sync_lists();
        consumed
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Down | KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
                self.focus = Pane::Stations;
                true
            }
            code => {
                if self.search.apply(code) {
                    self.store.set_search_term(self.search.value.clone());
                }
                true
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, field: EditField) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.store.close_edit_modal();
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Enter => {
                self.store.commit_edit();
                self.input_mode = InputMode::Normal;
                self.status = Some("Favorite updated".into());
                true
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_edit_field(field.next());
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_edit_field(field.prev());
                true
            }
            code => {
                if self.edit_input.apply(code) {
                    let value = self.edit_input.value.clone();
                    match field {
                        EditField::Name => self.store.set_edited_name(value),
                        EditField::Country => self.store.set_edited_country(value),
                        EditField::Tags => self.store.set_edited_tags(value),
                    }
                }
                true
            }
        }
    }

    fn focus_edit_field(&mut self, field: EditField) {
        let edit = &self.store.state().edit;
        let value = match field {
            EditField::Name => edit.name.clone(),
            EditField::Country => edit.country.clone(),
            EditField::Tags => edit.tags.clone(),
        };
        self.edit_input = TextInput::with_value(value);
        self.input_mode = InputMode::Edit(field);
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.input_mode = InputMode::Search;
                self.search.end();
                true
            }
            KeyCode::Tab => {
                self.focus = self.focus.other();
                true
            }
            KeyCode::Char(' ') => {
                self.store.toggle_play();
                true
            }
            KeyCode::Char(']') | KeyCode::Char('n') => {
                self.store.next_page();
                true
            }
            KeyCode::Char('[') | KeyCode::Char('p') => {
                self.store.previous_page();
                true
            }
            KeyCode::Char('r') => {
                self.store.refresh();
                true
            }
            KeyCode::Esc => {
                if self.search.clear() {
                    self.store.set_search_term("");
                    return true;
                }
                false
            }
            _ => match self.focus {
                Pane::Stations => self.handle_stations_key(key),
                Pane::Favorites => self.handle_favorites_key(key),
            },
        }
    }

    fn handle_stations_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.stations_list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.stations_list.down();
                true
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.stations_list.first();
                true
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.stations_list.last();
                true
            }
            KeyCode::Enter => {
                if let Some(url) = self.highlighted_station().map(|s| s.url_resolved.clone()) {
                    self.store.select_station(&url);
                }
                true
            }
            KeyCode::Char('f') => {
                if let Some(station) = self.highlighted_station().cloned() {
                    let was_favorite = self.store.is_favorite(&station.url_resolved);
                    self.store.toggle_favorite(&station);
                    self.status = Some(if was_favorite {
                        format!("Removed {} from favorites", station.name)
                    } else {
                        format!("Added {} to favorites", station.name)
                    });
                }
                true
            }
            KeyCode::Char('a') => {
                if let Some(station) = self.highlighted_station().cloned() {
                    self.store.add_to_favorites(&station);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.favorites_list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.favorites_list.down();
                true
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.favorites_list.first();
                true
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.favorites_list.last();
                true
            }
            KeyCode::Enter => {
                if let Some(url) = self.highlighted_favorite().map(|f| f.url_resolved.clone()) {
                    self.store.select_station(&url);
                }
                true
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.highlighted_favorite().map(|f| f.id.clone()) {
                    self.store.open_edit_modal(&id);
                    if self.store.state().edit.modal_open {
                        self.focus_edit_field(EditField::Name);
                    }
                }
                true
            }
            KeyCode::Char('d') | KeyCode::Char('f') | KeyCode::Delete => {
                if let Some(fav) = self.highlighted_favorite().cloned() {
                    self.store.remove_from_favorites(&fav.id);
                    self.status = Some(format!("Removed {} from favorites", fav.name));
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryStorage;
    use crate::search::SearchPort;
    use crate::stream::PlaybackController;

    #[derive(Default)]
    struct NullSearch {
        generation: u64,
    }

    impl SearchPort for NullSearch {
        fn schedule(&mut self, _term: &str, _page: u32) -> u64 {
            self.generation += 1;
            self.generation
        }

        fn dispatch_now(&mut self, _term: &str, _page: u32) -> u64 {
            self.generation += 1;
            self.generation
        }

        fn latest(&self) -> u64 {
            self.generation
        }
    }

    fn app() -> App {
        let store = RadioStore::new(
            Box::new(MemoryStorage::new()),
            PlaybackController::unmounted(),
            Box::new(NullSearch::default()),
        );
        App::new(store)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn station(id: &str) -> Station {
        Station {
            id: id.into(),
            name: format!("Station {}", id),
            url_resolved: format!("http://stream/{}", id),
            country: "BR".into(),
            tags: "jazz".into(),
            votes: 0,
        }
    }

    // -------------------------------------------------------------------------
    // ListState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.down();
        list.down();
        list.down();
        list.down();
        list.down();
        assert_eq!(list.selected, 4);

        list.up();
        assert_eq!(list.selected, 3);

        list.first();
        assert_eq!(list.selected, 0);
        list.up();
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_list_state_set_len_clamps() {
        let mut list = ListState::new(10);
        list.last();
        list.set_len(3);
        assert_eq!(list.selected, 2);
        list.set_len(0);
        assert_eq!(list.selected, 0);
    }

    // -------------------------------------------------------------------------
    // TextInput Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::default();
        for c in "Rádio".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value, "Rdio");
        input.insert('á');
        assert_eq!(input.value, "Rádio");
        input.end();
        assert!(!input.delete());
    }

    // -------------------------------------------------------------------------
    // App Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_quit_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_typing_updates_search_term() {
        let mut app = app();
        app.store_mut().set_current_page(3);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('u'));
        assert!(app.running, "q while typing must not quit");
        assert_eq!(app.state().search_term, "qu");
        assert_eq!(app.state().current_page, 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_page_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.state().current_page, 3);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.state().current_page, 2);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.state().current_page, 1);
    }

    #[test]
    fn test_favorite_toggle_from_stations() {
        let mut app = app();
        app.store_mut().set_stations(vec![station("1"), station("2")]);
        app.sync_lists();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.state().favorites.len(), 1);
        assert_eq!(app.state().favorites[0].name, "Station 2");
        assert_eq!(app.favorites_list.len, 1);

        press(&mut app, KeyCode::Char('f'));
        assert!(app.state().favorites.is_empty());
    }

    #[test]
    fn test_edit_dialog_flow() {
        let mut app = app();
        app.store_mut().add_to_favorites(&station("1"));
        app.sync_lists();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Pane::Favorites);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::Edit(EditField::Name));
        assert!(app.state().edit.modal_open);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.input_mode, InputMode::Edit(EditField::Country));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        for c in "PT".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.state().edit.modal_open);
        assert_eq!(app.state().favorites[0].name, "Station X");
        assert_eq!(app.state().favorites[0].country, "PT");
    }

    #[test]
    fn test_edit_escape_discards() {
        let mut app = app();
        app.store_mut().add_to_favorites(&station("1"));
        app.sync_lists();
        app.focus = Pane::Favorites;

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('!'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state().favorites[0].name, "Station 1");
        assert!(!app.state().edit.modal_open);
    }

    #[test]
    fn test_delete_favorite() {
        let mut app = app();
        app.store_mut().add_to_favorites(&station("1"));
        app.sync_lists();
        app.focus = Pane::Favorites;

        press(&mut app, KeyCode::Char('d'));
        assert!(app.state().favorites.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_playback_warning_survives_keys() {
        let mut app = app();
        app.playback_warning = Some("mpv not found: playback disabled".into());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Tab);

        assert!(app.status.is_none());
        assert_eq!(
            app.playback_warning.as_deref(),
            Some("mpv not found: playback disabled")
        );
    }
}
