//! Sidebar: search box, directory results and pager

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{panel, scroll_offset, visible_rows, Theme};
use crate::app::{App, InputMode, Pane};
use crate::models::Station;
use crate::state::RadioState;

/// Placeholder while the first page is on its way
pub const LOADING_TEXT: &str = "Loading stations...";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_box(frame, parts[0], app);
    render_stations(frame, parts[1], app);
    render_pager(frame, parts[2], app.state());
}

fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.input_mode == InputMode::Search;
    let input = &app.search;

    let line = if input.value.is_empty() && !focused {
        Line::from(Span::styled("Search stations by name", Theme::dimmed()))
    } else if focused {
        let chars: Vec<char> = input.value.chars().collect();
        let before: String = chars[..input.cursor.min(chars.len())].iter().collect();
        let at: String = chars
            .get(input.cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars.iter().skip(input.cursor + 1).collect();
        Line::from(vec![
            Span::styled(before, Theme::input()),
            Span::styled(at, Theme::input_cursor()),
            Span::styled(after, Theme::input()),
        ])
    } else {
        Line::from(Span::styled(input.value.clone(), Theme::text()))
    };

    let search = Paragraph::new(line).block(panel(" / SEARCH ".into(), focused));
    frame.render_widget(search, area);
}

fn render_stations(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let focused = app.focus == Pane::Stations && !app.input_mode.is_typing();
    let title = format!(" STATIONS ({}) ", state.stations.len());

    if state.stations.is_empty() {
        let text = if state.directory.is_loading() {
            Span::styled(LOADING_TEXT, Theme::loading())
        } else if state.directory.is_error() {
            Span::styled("Directory unavailable", Theme::error())
        } else {
            Span::styled("No stations found", Theme::dimmed())
        };
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(panel(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    let visible = visible_rows(area);
    let selected = app.stations_list.selected;
    let offset = scroll_offset(selected, visible);

    let items: Vec<ListItem> = state
        .stations
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, station)| station_row(station, state, focused && i == selected))
        .collect();

    let list = List::new(items)
        .block(panel(title, focused))
        .style(Theme::text());
    frame.render_widget(list, area);
}

/// Format: ▸ ♪ ★ Name  BR, jazz, live
fn station_row(station: &Station, state: &RadioState, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };

    let play = if state.is_playing_url(&station.url_resolved) {
        Span::styled("♪ ", Theme::playing())
    } else {
        Span::raw("  ")
    };

    let star = if state.is_favorite(&station.url_resolved) {
        Span::styled("★ ", Theme::favorite())
    } else {
        Span::raw("  ")
    };

    let line = Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        play,
        star,
        Span::styled(
            station.name.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::list_item()
            },
        ),
        Span::raw("  "),
        Span::styled(station.summary(), Theme::tags()),
    ]);

    ListItem::new(line)
}

fn render_pager(frame: &mut Frame, area: Rect, state: &RadioState) {
    let prev = if state.current_page > 1 { "◂ [" } else { "  " };
    let line = Line::from(vec![
        Span::styled(prev, Theme::keybind()),
        Span::styled(format!(" Page {} ", state.current_page), Theme::title()),
        Span::styled("] ▸", Theme::keybind()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
