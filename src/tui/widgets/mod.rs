//! TUI widgets for the board
//!
//! Reusable UI components for the terminal interface.

pub mod code;
pub mod container;
pub mod help;
pub mod motion;

pub use code::CodePanel;
pub use container::ContainerPanel;
pub use help::HelpOverlay;
pub use motion::MovingToken;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_short_text() {
        assert_eq!(fit("main()", 10), "main()");
    }

    #[test]
    fn fit_marks_cut() {
        assert_eq!(fit("console.log(\"A\")", 8), "console…");
    }

    #[test]
    fn fit_counts_wide_chars() {
        assert_eq!(fit("日本語テキスト", 5), "日本…");
        assert_eq!(fit("abc", 0), "");
    }
}
