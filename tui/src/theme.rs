//! Color theme and glyphs for the phone UI.
//!
//! Dark phone chrome by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use katphone_config::UiOptions;
use katphone_types::{AppCatalogEntry, Rgb, Wallpaper};

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_PHONE: Color = Color::Rgb(0, 0, 0);
    pub const BG_PANEL: Color = Color::Rgb(21, 21, 21); // store rows
    pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 44, 48);
    pub const BG_POPUP: Color = Color::Rgb(36, 36, 40);
    pub const BORDER: Color = Color::Rgb(68, 68, 72);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
    pub const TEXT_MUTED: Color = Color::Rgb(142, 142, 147);

    // === Accents ===
    pub const STORE_GOLD: Color = Color::Rgb(255, 209, 26);
    pub const SPACE_BLUE: Color = Color::Rgb(0, 212, 255);
    pub const TIMER_TRACK: Color = Color::Rgb(51, 51, 51);
    pub const TIMER_FILL: Color = SPACE_BLUE;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_phone: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_popup: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub gold: Color,
    pub accent: Color,
    pub timer_track: Color,
    pub timer_fill: Color,
    /// Use catalog and wallpaper colors; off in high contrast.
    pub brand_colors: bool,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_phone: colors::BG_PHONE,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_popup: colors::BG_POPUP,
            border: colors::BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            gold: colors::STORE_GOLD,
            accent: colors::SPACE_BLUE,
            timer_track: colors::TIMER_TRACK,
            timer_fill: colors::TIMER_FILL,
            brand_colors: true,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_phone: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::White,
            bg_popup: Color::Black,
            border: Color::White,
            text_primary: Color::White,
            text_muted: Color::Gray,
            gold: Color::Yellow,
            accent: Color::Cyan,
            timer_track: Color::DarkGray,
            timer_fill: Color::White,
            brand_colors: false,
        }
    }

    /// Tile color for a catalog entry.
    #[must_use]
    pub fn app_color(&self, entry: &AppCatalogEntry) -> Color {
        if self.brand_colors {
            rgb(entry.color)
        } else {
            self.text_primary
        }
    }

    /// Readable foreground on top of an app tile.
    #[must_use]
    pub fn app_text(&self, entry: &AppCatalogEntry) -> Color {
        if !self.brand_colors || entry.color.is_light() {
            Color::Black
        } else {
            Color::White
        }
    }

    #[must_use]
    pub fn wallpaper_tint(&self, wallpaper: Wallpaper) -> Color {
        if self.brand_colors {
            rgb(wallpaper.tint())
        } else {
            self.bg_phone
        }
    }

    #[must_use]
    pub fn speaker_color(&self, accent: Rgb) -> Color {
        if self.brand_colors {
            rgb(accent)
        } else {
            self.text_primary
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

#[must_use]
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Glyphs for icons that have emoji and ASCII renditions.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub ascii: bool,
    pub target: &'static str,
    pub lock: &'static str,
    pub home: &'static str,
    pub messages: &'static str,
    pub swipe: &'static str,
    pub timer_fill: &'static str,
    pub timer_track: &'static str,
}

impl Glyphs {
    #[must_use]
    pub fn app(&self, entry: &AppCatalogEntry) -> &'static str {
        if self.ascii {
            entry.ascii_glyph
        } else {
            entry.glyph
        }
    }
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            ascii: true,
            target: "=^.^=",
            lock: "L",
            home: "H",
            messages: "M",
            swipe: "^",
            timer_fill: "#",
            timer_track: "-",
        }
    } else {
        Glyphs {
            ascii: false,
            target: "🐱",
            lock: "🔒",
            home: "🏠",
            messages: "✉️",
            swipe: "⌃",
            timer_fill: "█",
            timer_track: "░",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Styles;

impl Styles {
    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn selected(palette: &Palette) -> Style {
        let style = Style::default().bg(palette.bg_highlight);
        if palette.brand_colors {
            style
        } else {
            style.fg(Color::Black)
        }
    }

    #[must_use]
    pub fn button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }
}
