//! TUI (Text User Interface) module for loopviz
//!
//! Terminal front end built on ratatui/crossterm. The [`Board`] is the
//! renderer the playback engine drives; [`VisualizerApp`] draws it together
//! with the scenario tabs, the code listing and the controls.

pub mod app;
pub mod board;
pub mod theme;
pub mod ui;
pub mod visualizer;
pub mod widgets;

pub use board::{Board, BoardLayout, BoardView};
pub use theme::{current_theme, Theme};
pub use visualizer::VisualizerApp;
