//! Favorite edit dialog

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::{App, EditField, InputMode};

/// Centered dialog over `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let width = 60.min(area.width.saturating_sub(4));
    let height = 9.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let edit = &app.state().edit;
    let active = match app.input_mode {
        InputMode::Edit(field) => Some(field),
        _ => None,
    };

    let field_line = |field: EditField, value: &str| {
        let is_active = active == Some(field);
        let shown = if is_active {
            format!("{}▏", app.edit_input.value)
        } else {
            value.to_string()
        };
        Line::from(vec![
            Span::styled(
                format!("{:>8}: ", field.label()),
                if is_active { Theme::accent() } else { Theme::dimmed() },
            ),
            Span::styled(shown, if is_active { Theme::input() } else { Theme::text() }),
        ])
    };

    let lines = vec![
        Line::from(""),
        field_line(EditField::Name, &edit.name),
        field_line(EditField::Country, &edit.country),
        field_line(EditField::Tags, &edit.tags),
        Line::from(""),
        Line::from(Span::styled(
            "enter:save  esc:cancel  tab:next field",
            Theme::keybind_desc(),
        )),
    ];

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::border_focused())
            .title(Span::styled(" EDIT FAVORITE ", Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(dialog, popup);
}
