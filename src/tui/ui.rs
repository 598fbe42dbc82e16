//! UI rendering helpers for TUI
//!
//! Layout of the board screen and small geometry utilities.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::board::BoardLayout;
use crate::model::ContainerKind;

/// Create a centered layout with the given constraints.
///
/// Returns the center area that can be used for content.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical_layout[1])[1]
}

/// Linear interpolation between two rects, `t` in `0.0..=1.0`.
pub fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u16, b: u16| -> u16 { (a as f64 + (b as f64 - a as f64) * t).round() as u16 };
    Rect::new(
        lerp(from.x, to.x),
        lerp(from.y, to.y),
        lerp(from.width, to.width),
        lerp(from.height, to.height),
    )
}

/// Regions of the board screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub tabs: Rect,
    pub code: Rect,
    pub main_engine: Rect,
    /// Only laid out when the selected scenario uses the worker
    pub worker_engine: Option<Rect>,
    pub board: BoardLayout,
    pub status: Rect,
    pub footer: Rect,
}

/// Split the frame for the selected scenario.
///
/// ```text
/// +-------------------- tabs ---------------------+
/// | code       | Main Thread                      |
/// |            | stack | heap | micro             |
/// |            |       |      | macro             |
/// |            |----------------------------------|
/// |            | Worker Thread (worker only)      |
/// status
/// footer
/// ```
pub fn screen_layout(area: Rect, with_worker: bool) -> ScreenLayout {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let (main_engine, worker_engine) = if with_worker {
        let split = Layout::vertical([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(body[1]);
        (split[0], Some(split[1]))
    } else {
        (body[1], None)
    };

    let main_inner = inner(main_engine);
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(main_inner);
    let queues = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[2]);

    let mut board = BoardLayout::default();
    board.containers[ContainerKind::CallStack.index()] = Some(columns[0]);
    board.containers[ContainerKind::Heap.index()] = Some(columns[1]);
    board.containers[ContainerKind::MicrotaskQueue.index()] = Some(queues[0]);
    board.containers[ContainerKind::MacrotaskQueue.index()] = Some(queues[1]);
    board.containers[ContainerKind::WorkerCallStack.index()] = worker_engine.map(inner);
    board.engines = [Some(main_engine), worker_engine];

    ScreenLayout {
        tabs: rows[0],
        code: body[0],
        main_engine,
        worker_engine,
        board,
        status: rows[2],
        footer: rows[3],
    }
}

/// Area inside a one-cell border.
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}
