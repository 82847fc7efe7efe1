//! Neon theme for radiotui
//!
//! Palette constants plus the styles each panel draws with.

use ratatui::style::{Color, Modifier, Style};

/// Neon color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);
    /// Status bar and input fields
    pub const PANEL: Color = Color::Rgb(0x14, 0x14, 0x1e);
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    pub const DIM: Color = Color::Rgb(0x40, 0x40, 0x50);
    /// On air
    pub const LIVE: Color = Color::Rgb(0x00, 0xff, 0x00);
    /// Loaded but silent
    pub const HELD: Color = Color::Rgb(0xff, 0xaa, 0x00);
    pub const ERROR: Color = Color::Rgb(0xff, 0x00, 0x40);
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    // ═══════════════════════════════════════════════════════════════════════
    // CHROME
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    /// Transient status messages
    pub fn success() -> Style {
        Style::default().fg(Self::LIVE).add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn input_cursor() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::PRIMARY)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PANEL)
    }

    pub fn loading() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATION MARKERS
    // ═══════════════════════════════════════════════════════════════════════

    /// ♪ and the NOW PLAYING label
    pub fn playing() -> Style {
        Style::default().fg(Self::LIVE).add_modifier(Modifier::BOLD)
    }

    /// PAUSED label
    pub fn paused() -> Style {
        Style::default().fg(Self::HELD)
    }

    /// ★ on favorited rows
    pub fn favorite() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Country and tag summary under a station name
    pub fn tags() -> Style {
        Style::default().fg(Self::DIM)
    }
}

/// RGB components of a palette color; `None` for named terminal colors
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
