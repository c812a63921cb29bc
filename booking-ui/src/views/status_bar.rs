//! Status line listing the keys available on the current screen.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hint shown under a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Spans for `hints`, keys in bold, separated by a bar.
pub fn hint_line(hints: &[KeyHint]) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, key_style));
        spans.push(Span::raw(format!(": {}", hint.action)));
    }
    Line::from(spans)
}

pub fn build_status_bar(hints: &[KeyHint]) -> Paragraph<'static> {
    Paragraph::new(hint_line(hints))
}

/// Hints shared by several screens.
pub mod hints {
    use super::KeyHint;

    pub const BACK: KeyHint = KeyHint::new("Esc", "Branches");
    pub const QUIT: KeyHint = KeyHint::new("q", "Exit");
}
