//! One container panel: a titled box with a token per row.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::fit;
use crate::model::ContainerKind;
use crate::tui::board::{slot_rect, TokenVisual};
use crate::tui::theme::Theme;

pub struct ContainerPanel<'a> {
    kind: ContainerKind,
    visuals: &'a [TokenVisual],
    theme: &'a Theme,
    now: Instant,
}

impl<'a> ContainerPanel<'a> {
    pub fn new(kind: ContainerKind, visuals: &'a [TokenVisual], theme: &'a Theme) -> Self {
        Self {
            kind,
            visuals,
            theme,
            now: Instant::now(),
        }
    }

    /// Render as of `now` instead of the construction time.
    pub fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl Widget for ContainerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.text_secondary_style())
            .title(Span::styled(
                format!(" {} ", self.kind.label()),
                self.theme.text_style(),
            ))
            .render(area, buf);

        for (index, visual) in self.visuals.iter().enumerate() {
            if visual.hidden {
                continue;
            }
            let slot = slot_rect(area, self.kind, index);
            if slot.width == 0 || !area.contains(slot.as_position()) {
                continue;
            }
            let category = visual.token.category;
            let style = if visual.completed {
                self.theme.completed_style()
            } else if visual.is_fresh(self.now) {
                self.theme.fresh_style(category)
            } else {
                self.theme.token_style(category)
            };
            let label = fit(&visual.token.label, slot.width.saturating_sub(2) as usize);
            Line::from(vec![
                Span::styled("▌", self.theme.token_style(category)),
                Span::styled(format!(" {}", label), style),
            ])
            .render(slot, buf);
        }
    }
}
