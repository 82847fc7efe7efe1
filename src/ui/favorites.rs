//! Main panel: now-playing bar above the favorites list

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{panel, scroll_offset, visible_rows, Theme};
use crate::app::{App, Pane};
use crate::models::Favorite;
use crate::state::RadioState;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_now_playing(frame, parts[0], app.state());
    render_favorites(frame, parts[1], app);
}

fn render_now_playing(frame: &mut Frame, area: Rect, state: &RadioState) {
    let line = match state.selected_station_name() {
        Some(name) if state.playing => Line::from(vec![
            Span::styled("▶ NOW PLAYING  ", Theme::playing()),
            Span::styled(name.to_string(), Theme::text()),
        ]),
        Some(name) => Line::from(vec![
            Span::styled("❚❚ PAUSED  ", Theme::paused()),
            Span::styled(name.to_string(), Theme::text()),
        ]),
        None => Line::from(Span::styled("Nothing playing", Theme::dimmed())),
    };

    let bar = Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(panel(" PLAYER ".into(), false));
    frame.render_widget(bar, area);
}

fn render_favorites(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let focused = app.focus == Pane::Favorites && !app.input_mode.is_typing();
    let title = format!(" ★ FAVORITES ({}) ", state.favorites.len());

    if state.favorites.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No favorites yet", Theme::dimmed())),
            Line::from(Span::styled("Press f on a station to add it", Theme::keybind_desc())),
        ])
        .alignment(Alignment::Center)
        .block(panel(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    let visible = visible_rows(area);
    let selected = app.favorites_list.selected;
    let offset = scroll_offset(selected, visible);

    let items: Vec<ListItem> = state
        .favorites
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, fav)| favorite_row(fav, state, focused && i == selected))
        .collect();

    frame.render_widget(List::new(items).block(panel(title, focused)), area);
}

fn favorite_row(fav: &Favorite, state: &RadioState, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let play = if state.is_playing_url(&fav.url_resolved) {
        Span::styled("♪ ", Theme::playing())
    } else {
        Span::raw("  ")
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        play,
        Span::styled(
            fav.name.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::list_item()
            },
        ),
        Span::raw("  "),
        Span::styled(fav.summary(), Theme::tags()),
    ]))
}
