//! Theme configuration for TUI and CLI
//!
//! One palette drives both the board (ratatui styles) and the headless
//! transcript (ANSI escape codes). The active theme is picked once from the
//! config at startup; `NO_COLOR` turns the ANSI helpers into plain text.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

use crate::model::Category;

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for highlights, titles and key hints
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    /// Token colors, one per category
    pub sync: Color,
    pub micro: Color,
    pub macro_task: Color,
    pub worker: Color,
    pub connection: Color,
    pub heap: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::loopviz()
    }
}

impl Theme {
    /// Names accepted by `[ui] theme`.
    pub const NAMES: &'static [&'static str] = &["default", "classic", "ocean"];

    /// Standard ANSI colors only, so the board looks the same everywhere.
    pub fn loopviz() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            error: Color::Red,
            success: Color::Green,
            sync: Color::Yellow,
            micro: Color::Magenta,
            macro_task: Color::Blue,
            worker: Color::Cyan,
            connection: Color::LightGreen,
            heap: Color::Gray,
        }
    }

    /// White text, yellow accents.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            accent: Color::Yellow,
            sync: Color::White,
            heap: Color::White,
            ..Self::loopviz()
        }
    }

    /// Cyan/blue theme.
    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            accent: Color::LightCyan,
            sync: Color::LightCyan,
            micro: Color::LightMagenta,
            macro_task: Color::LightBlue,
            worker: Color::Cyan,
            ..Self::loopviz()
        }
    }

    /// Look up a theme by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::loopviz()),
            "classic" => Some(Self::classic()),
            "ocean" => Some(Self::ocean()),
            _ => None,
        }
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Sync => self.sync,
            Category::Micro => self.micro,
            Category::Macro => self.macro_task,
            Category::Worker => self.worker,
            Category::Connection => self.connection,
            Category::Heap => self.heap,
        }
    }

    // Style helpers

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for bold accented text (keybindings, active tab).
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Border and label style of a live token.
    pub fn token_style(&self, category: Category) -> Style {
        Style::default().fg(self.category_color(category))
    }

    /// A call-stack frame that has finished but not yet left.
    pub fn completed_style(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    }

    /// A token that just appeared.
    pub fn fresh_style(&self, category: Category) -> Style {
        self.token_style(category).add_modifier(Modifier::BOLD)
    }

    // ANSI color helpers for CLI output

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }

    pub fn category_text(&self, category: Category, text: &str) -> String {
        paint(self.category_color(category), text)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    let code = color_to_ansi(color);
    if code.is_empty() || no_color() {
        text.to_string()
    } else {
        format!("{}{}{}", code, text, ANSI_RESET)
    }
}

/// Whether the user asked for colorless output (<https://no-color.org>).
pub fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB and indexed colors have no fixed escape
        _ => "",
    }
}

static ACTIVE: OnceLock<Theme> = OnceLock::new();

/// Install the theme used for the rest of the process.
///
/// Only the first call has any effect.
pub fn set_theme(theme: Theme) {
    let _ = ACTIVE.set(theme);
}

/// The active theme, or the default one if none was installed.
pub fn current_theme() -> Theme {
    ACTIVE.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_loopviz() {
        let theme = Theme::default();
        assert_eq!(theme.text_primary, Color::Gray);
        assert_eq!(theme.accent, Color::Green);
    }

    #[test]
    fn from_name_knows_every_listed_theme() {
        for name in Theme::NAMES {
            assert!(Theme::from_name(name).is_some(), "{}", name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn classic_theme_uses_white() {
        assert_eq!(Theme::classic().text_primary, Color::White);
    }

    #[test]
    fn ocean_theme_uses_cyan() {
        assert_eq!(Theme::ocean().text_primary, Color::Cyan);
    }

    #[test]
    fn categories_have_distinct_colors() {
        let theme = Theme::default();
        let colors = [
            theme.category_color(Category::Sync),
            theme.category_color(Category::Micro),
            theme.category_color(Category::Macro),
            theme.category_color(Category::Worker),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn completed_style_is_crossed_out() {
        let style = Theme::default().completed_style();
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn color_to_ansi_maps_standard_colors() {
        assert_eq!(color_to_ansi(Color::Green), "\x1b[32m");
        assert_eq!(color_to_ansi(Color::Red), "\x1b[31m");
        assert_eq!(color_to_ansi(Color::DarkGray), "\x1b[90m");
        assert_eq!(color_to_ansi(Color::Rgb(1, 2, 3)), "");
    }

    #[test]
    fn paint_leaves_uncolorable_text_alone() {
        assert_eq!(paint(Color::Rgb(1, 2, 3), "plain"), "plain");
    }
}
