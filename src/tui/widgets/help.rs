//! Help overlay listing every key binding.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Key bindings grouped by section, as (key, description).
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("r / Enter", "Run selected scenario"),
            ("Space / p", "Pause / Resume"),
            ("x", "Reset containers"),
        ],
    ),
    (
        "Scenarios",
        &[
            ("<- / ->", "Previous / next scenario"),
            ("Tab", "Next scenario"),
        ],
    ),
    (
        "General",
        &[("?", "Show this help"), ("q / Esc", "Quit")],
    ),
];

/// Width of the key column
const KEY_WIDTH: usize = 12;

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::default()];
        for (section, keys) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("  {}", section),
                self.theme.accent_bold_style(),
            )));
            for (key, desc) in *keys {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    {:<width$}", key, width = KEY_WIDTH),
                        self.theme.accent_style(),
                    ),
                    Span::styled(desc.to_string(), self.theme.text_style()),
                ]));
            }
            lines.push(Line::default());
        }
        lines.push(
            Line::from(Span::styled(
                "Press any key to close",
                self.theme.text_secondary_style(),
            ))
            .alignment(Alignment::Center),
        );
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(60, 70, area);
        Clear.render(popup, buf);
        Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(self.theme.accent_style())
                    .title(Span::styled(" loopviz help ", self.theme.accent_bold_style()))
                    .title_alignment(Alignment::Center),
            )
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_keys() {
        for (section, keys) in HELP_SECTIONS {
            assert!(!keys.is_empty(), "{}", section);
        }
    }

    #[test]
    fn help_mentions_pause_and_quit() {
        let all: Vec<&str> = HELP_SECTIONS
            .iter()
            .flat_map(|(_, keys)| keys.iter().map(|(_, d)| *d))
            .collect();
        assert!(all.iter().any(|d| d.contains("Pause")));
        assert!(all.iter().any(|d| d.contains("Quit")));
    }

    #[test]
    fn overlay_renders_title() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("loopviz help"));
        assert!(text.contains("Run selected scenario"));
    }
}
