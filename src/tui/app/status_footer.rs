//! Status line and footer rendering for the board
//!
//! The status line shows the run phase, the step counter with a progress bar
//! and the label of the step being applied. The footer lists the keys that do
//! something in the current phase.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::player::SessionStatus;
use crate::tui::theme::{current_theme, Theme};

/// Render the status line.
///
/// `step_label` is the step in progress, `notice` an optional message such
/// as a run error.
pub fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    status: &SessionStatus,
    step_label: Option<&str>,
    notice: Option<&str>,
) {
    let theme = current_theme();
    let mut spans = vec![Span::styled(
        format!(" {} ", status.phase_label()),
        theme.accent_bold_style(),
    )];

    if status.total_steps > 0 {
        spans.push(Span::styled(
            format!("step {}/{} ", status.step_index, status.total_steps),
            theme.text_secondary_style(),
        ));
        spans.push(Span::styled(
            progress_bar(20, status.fraction()),
            theme.accent_style(),
        ));
    }
    if let Some(label) = step_label {
        spans.push(Span::styled(format!("  {}", label), theme.text_style()));
    }
    if let Some(notice) = notice {
        spans.push(Span::styled(format!("  {}", notice), theme.error_style()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a centered footer with keybinding hints.
///
/// Takes pairs of (key, description) and joins them with " | " separators.
///
/// Example: `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let theme = current_theme();
    let spans: Vec<Span<'static>> = build_footer_spans(keys, &theme);
    let footer = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Build styled spans for footer keybinding hints.
///
/// Each key is highlighted with the theme accent color, descriptions use
/// the secondary text color, and entries are separated by " | ".
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " | ".to_string(),
                Style::default().fg(theme.text_secondary),
            ));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::styled(
            format!(": {}", desc),
            Style::default().fg(theme.text_secondary),
        ));
    }
    spans
}

/// Text progress bar: `━` for done, `─` for remaining, `⏺` at the head.
pub fn progress_bar(width: usize, fraction: f64) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = ((width as f64) * fraction.clamp(0.0, 1.0)) as usize;
    let mut bar: Vec<char> = (0..width)
        .map(|i| if i < filled { '━' } else { '─' })
        .collect();
    if filled < width {
        bar[filled] = '⏺';
    }
    bar.into_iter().collect()
}
