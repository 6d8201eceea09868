//! Color theme and glyphs for Folio TUI.
//!
//! Dark and light palettes share the portfolio's red accent. High contrast
//! overrides both with named terminal colours.

use ratatui::style::{Color, Modifier, Style};

use folio_engine::{TextRole, ThemeMode, UiOptions};

/// Portfolio palette constants.
mod colors {
    use super::Color;

    // === Dark ===
    pub const DARK_BG: Color = Color::Rgb(0, 0, 0);
    pub const DARK_PANEL: Color = Color::Rgb(17, 17, 17); // dark-100
    pub const DARK_BORDER: Color = Color::Rgb(51, 51, 51);
    pub const DARK_TEXT: Color = Color::Rgb(255, 255, 255);
    pub const DARK_SECONDARY: Color = Color::Rgb(209, 213, 219); // gray-300
    pub const DARK_MUTED: Color = Color::Rgb(156, 163, 175); // gray-400
    pub const DARK_DISABLED: Color = Color::Rgb(107, 114, 128); // gray-500

    // === Light ===
    pub const LIGHT_BG: Color = Color::Rgb(250, 250, 250);
    pub const LIGHT_PANEL: Color = Color::Rgb(240, 240, 240);
    pub const LIGHT_BORDER: Color = Color::Rgb(212, 212, 212);
    pub const LIGHT_TEXT: Color = Color::Rgb(17, 17, 17);
    pub const LIGHT_SECONDARY: Color = Color::Rgb(55, 65, 81); // gray-700
    pub const LIGHT_MUTED: Color = Color::Rgb(107, 114, 128); // gray-500
    pub const LIGHT_DISABLED: Color = Color::Rgb(156, 163, 175); // gray-400

    // === Accent ===
    pub const RED: Color = Color::Rgb(211, 47, 47);
    pub const RED_LIGHT: Color = Color::Rgb(239, 83, 80);
    pub const GREEN: Color = Color::Rgb(74, 222, 128);
    pub const GREEN_DARK: Color = Color::Rgb(22, 163, 74);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub bg_panel: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub primary: Color,
    pub primary_bright: Color,
    pub success: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            bg: colors::DARK_BG,
            bg_panel: colors::DARK_PANEL,
            border: colors::DARK_BORDER,
            text_primary: colors::DARK_TEXT,
            text_secondary: colors::DARK_SECONDARY,
            text_muted: colors::DARK_MUTED,
            text_disabled: colors::DARK_DISABLED,
            primary: colors::RED,
            primary_bright: colors::RED_LIGHT,
            success: colors::GREEN,
            error: colors::RED_LIGHT,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            bg: colors::LIGHT_BG,
            bg_panel: colors::LIGHT_PANEL,
            border: colors::LIGHT_BORDER,
            text_primary: colors::LIGHT_TEXT,
            text_secondary: colors::LIGHT_SECONDARY,
            text_muted: colors::LIGHT_MUTED,
            text_disabled: colors::LIGHT_DISABLED,
            primary: colors::RED,
            primary_bright: colors::RED,
            success: colors::GREEN_DARK,
            error: colors::RED,
        }
    }

    #[must_use]
    pub fn high_contrast(theme: ThemeMode) -> Self {
        let (bg, fg) = match theme {
            ThemeMode::Dark => (Color::Black, Color::White),
            ThemeMode::Light => (Color::White, Color::Black),
        };
        Self {
            bg,
            bg_panel: bg,
            border: fg,
            text_primary: fg,
            text_secondary: fg,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            primary: Color::Red,
            primary_bright: Color::LightRed,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Style for a page text role.
    #[must_use]
    pub fn role(&self, role: TextRole) -> Style {
        let style = Style::default();
        match role {
            TextRole::Display => style
                .fg(self.text_primary)
                .add_modifier(Modifier::BOLD),
            TextRole::Title => style.fg(self.text_primary).add_modifier(Modifier::BOLD),
            TextRole::Heading => style.fg(self.text_primary).add_modifier(Modifier::BOLD),
            TextRole::Body => style.fg(self.text_secondary),
            TextRole::Muted => style.fg(self.text_muted),
            TextRole::Accent | TextRole::Bullet => style.fg(self.primary_bright),
            TextRole::Number => style.fg(self.primary).add_modifier(Modifier::BOLD),
            TextRole::Tag => style.fg(self.text_secondary).bg(self.bg_panel),
            TextRole::Link => style
                .fg(self.primary_bright)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        return Palette::high_contrast(options.theme);
    }
    match options.theme {
        ThemeMode::Dark => Palette::dark(),
        ThemeMode::Light => Palette::light(),
    }
}

/// ASCII/Unicode glyphs for bullets, rules, and indicators.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub bullet: &'static str,
    pub rule: &'static str,
    pub cursor: &'static str,
    pub separator: &'static str,
    pub arrow_up: &'static str,
    pub progress_fill: &'static str,
    pub progress_track: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    /// Box corners clockwise from top-left, then horizontal and vertical.
    pub box_corners: [&'static str; 4],
    pub box_horizontal: &'static str,
    pub box_vertical: &'static str,
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            bullet: "*",
            rule: "=",
            cursor: "|",
            separator: "|",
            arrow_up: "^",
            progress_fill: "=",
            progress_track: "-",
            success: "OK",
            error: "!!",
            box_corners: ["+", "+", "+", "+"],
            box_horizontal: "-",
            box_vertical: "|",
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            bullet: "•",
            rule: "━",
            cursor: "▌",
            separator: "·",
            arrow_up: "↑",
            progress_fill: "━",
            progress_track: "─",
            success: "✓",
            error: "✗",
            box_corners: ["╭", "╮", "╯", "╰"],
            box_horizontal: "─",
            box_vertical: "│",
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn nav_link(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn nav_active(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary_bright)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn brand(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary_bright)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn field_label(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(palette.primary_bright)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_secondary)
        }
    }

    #[must_use]
    pub fn field_border(palette: &Palette, focused: bool, invalid: bool) -> Style {
        let color = if invalid {
            palette.error
        } else if focused {
            palette.primary
        } else {
            palette.border
        };
        Style::default().fg(color)
    }

    #[must_use]
    pub fn button(palette: &Palette, focused: bool) -> Style {
        let style = Style::default()
            .fg(palette.text_primary)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD);
        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    #[must_use]
    pub fn button_disabled(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_disabled)
            .bg(palette.bg_panel)
    }
}

#[cfg(test)]
mod tests {
    use folio_engine::{ThemeMode, UiOptions};

    use super::{Palette, glyphs, palette, spinner_frame};

    #[test]
    fn spinner_frame_cycles_without_reduced_motion() {
        let options = UiOptions::default();
        let frame0 = spinner_frame(0, options);
        let frame1 = spinner_frame(1, options);
        assert_ne!(frame0, frame1, "spinner should cycle through frames");
    }

    #[test]
    fn spinner_frame_static_with_reduced_motion() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        assert_eq!(spinner_frame(0, options), spinner_frame(1, options));
        assert_eq!(spinner_frame(0, options), spinner_frame(100, options));
    }

    #[test]
    fn theme_selects_palette() {
        let light = UiOptions {
            theme: ThemeMode::Light,
            ..UiOptions::default()
        };
        assert_eq!(palette(UiOptions::default()), Palette::dark());
        assert_eq!(palette(light), Palette::light());
    }

    #[test]
    fn high_contrast_overrides_theme() {
        let options = UiOptions {
            theme: ThemeMode::Light,
            high_contrast: true,
            ..UiOptions::default()
        };
        assert_eq!(palette(options), Palette::high_contrast(ThemeMode::Light));
    }

    #[test]
    fn ascii_glyphs_are_ascii() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let g = glyphs(options);
        for glyph in [
            g.bullet,
            g.rule,
            g.cursor,
            g.separator,
            g.arrow_up,
            g.progress_fill,
            g.progress_track,
            g.success,
            g.error,
            g.box_horizontal,
            g.box_vertical,
        ]
        .into_iter()
        .chain(g.box_corners)
        .chain(g.spinner_frames.iter().copied())
        {
            assert!(glyph.is_ascii(), "{glyph:?} is not ascii");
        }
    }
}
