//! Tokens in motion: transfers and connection markers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use super::fit;
use crate::model::Token;
use crate::tui::theme::Theme;

pub struct MovingToken<'a> {
    token: &'a Token,
    theme: &'a Theme,
    marker: bool,
}

impl<'a> MovingToken<'a> {
    /// A token on its way between containers.
    pub fn flight(token: &'a Token, theme: &'a Theme) -> Self {
        Self {
            token,
            theme,
            marker: false,
        }
    }

    /// A message crossing between engines.
    pub fn connection(token: &'a Token, theme: &'a Theme) -> Self {
        Self {
            token,
            theme,
            marker: true,
        }
    }
}

impl Widget for MovingToken<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        Clear.render(area, buf);

        let style = self
            .theme
            .token_style(self.token.category)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED);
        let line = if self.marker {
            let label = fit(&self.token.label, area.width.saturating_sub(4) as usize);
            Line::from(Span::styled(format!("◆ {} ◆", label), style))
        } else {
            let label = fit(&self.token.label, area.width.saturating_sub(2) as usize);
            Line::from(vec![
                Span::styled("▌", self.theme.token_style(self.token.category)),
                Span::styled(format!(" {}", label), style),
            ])
        };
        line.render(area, buf);
    }
}
