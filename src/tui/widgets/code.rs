//! Source listing shown beside the board.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::scenario::Listing;
use crate::tui::theme::Theme;

pub struct CodePanel<'a> {
    listing: Option<&'a Listing>,
    theme: &'a Theme,
    /// Whether a run of this listing is active
    running: bool,
}

impl<'a> CodePanel<'a> {
    pub fn new(listing: Option<&'a Listing>, theme: &'a Theme) -> Self {
        Self {
            listing,
            theme,
            running: false,
        }
    }

    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    fn block(&self, title: &str) -> Block<'static> {
        let border = if self.running {
            self.theme.accent_style()
        } else {
            self.theme.text_secondary_style()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(format!(" {} ", title), self.theme.text_style()))
    }

    fn code(&self, source: &str, title: &str) -> Paragraph<'static> {
        let lines: Vec<Line> = source
            .lines()
            .map(|l| Line::styled(l.to_string(), self.theme.text_style()))
            .collect();
        Paragraph::new(lines).block(self.block(title))
    }
}

impl Widget for CodePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.listing {
            None => Paragraph::new(Line::styled("(no listing)", self.theme.text_secondary_style()))
                .block(self.block("script.js"))
                .render(area, buf),
            Some(Listing::Single(source)) => self.code(source, "script.js").render(area, buf),
            Some(Listing::Split { main, worker }) => {
                let halves =
                    Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .split(area);
                self.code(main, "main.js").render(halves[0], buf);
                self.code(worker, "worker.js").render(halves[1], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(listing: Option<&Listing>) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| f.render_widget(CodePanel::new(listing, &theme), f.area()))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn single_listing_is_titled_script() {
        let listing = Listing::Single("console.log('A');".into());
        let text = rendered(Some(&listing));
        assert!(text.contains("script.js"));
        assert!(text.contains("console.log('A');"));
    }

    #[test]
    fn split_listing_shows_both_files() {
        let listing = Listing::Split {
            main: "new Worker()".into(),
            worker: "onmessage".into(),
        };
        let text = rendered(Some(&listing));
        assert!(text.contains("main.js"));
        assert!(text.contains("worker.js"));
        assert!(text.contains("onmessage"));
    }

    #[test]
    fn missing_listing_says_so() {
        assert!(rendered(None).contains("(no listing)"));
    }
}
