//! Terminal UI components
//!
//! Built with ratatui in a neon palette. Layout:
//!
//! ```text
//! ┌ header ─────────────────────────────────────────┐
//! │ search      │ now playing                       │
//! │ stations    │ favorites                         │
//! │ page        │                                   │
//! └ status bar ─────────────────────────────────────┘
//! ```

pub mod theme;
pub mod sidebar;
pub mod favorites;
pub mod edit_dialog;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

/// Draw the whole screen for `app`
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, rows[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(rows[1]);

    sidebar::render(frame, columns[0], app);
    favorites::render(frame, columns[1], app);
    render_status_bar(frame, rows[2], app);

    if app.state().edit.modal_open {
        edit_dialog::render(frame, area, app);
    }
}

/// Rows that fit inside a bordered block of `area`
pub(crate) fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

/// First row to draw so `selected` stays on screen
pub(crate) fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

/// Rounded block with focus-dependent border
pub(crate) fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let mut spans = vec![
        Span::styled(" ◉ RADIO", Theme::title()),
        Span::styled("TUI ", Theme::secondary()),
    ];
    if state.directory.is_loading() {
        spans.push(Span::styled(" ⟳ loading", Theme::loading()));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Theme::BORDER)),
        );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Search => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
        InputMode::Edit(_) => Span::styled(
            " EDIT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let message = if let Some(status) = &app.status {
        Span::styled(format!(" {} ", status), Theme::success())
    } else if let Some(notice) = &app.state().notice {
        Span::styled(format!(" ✗ {} ", notice), Theme::error())
    } else if let Some(warning) = &app.playback_warning {
        Span::styled(format!(" ⚠ {} ", warning), Theme::paused())
    } else {
        Span::styled(
            " q:quit  /:search  enter:play  space:pause  f:fav  e:edit  [ ]:page  tab:pane ",
            Theme::keybind_desc(),
        )
    };

    let status = Paragraph::new(Line::from(vec![mode, message])).style(Theme::status_bar());
    frame.render_widget(status, area);
}
