//! Instructional panels shown after the splash.

use booking_core::OnboardingPanel;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::status_bar::{KeyHint, hints};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    step: usize,
    panel: &OnboardingPanel,
) -> Vec<KeyHint> {
    let next_label = if OnboardingPanel::is_last(step) {
        "Get Started"
    } else {
        "Next"
    };

    let [_, content, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .areas(area);
    let text = vec![
        Line::from(Span::styled(
            panel.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(panel.description),
        Line::default(),
        dots(step),
        Line::default(),
        Line::from(Span::styled(
            format!("[ {next_label} ]"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        content,
    );

    vec![
        KeyHint::new("Enter", next_label),
        KeyHint::new("Esc", "Skip"),
        hints::QUIT,
    ]
}

/// Progress dots, the current panel filled.
fn dots(step: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for i in 0..OnboardingPanel::count() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(if i == step {
            Span::styled("●", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("○", Style::default().fg(Color::DarkGray))
        });
    }
    Line::from(spans)
}
