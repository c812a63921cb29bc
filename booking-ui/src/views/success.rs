use booking_core::SuccessSummary;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::status_bar::{KeyHint, hints};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    summary: &SuccessSummary,
) -> Vec<KeyHint> {
    let [_, content, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .areas(area);

    let dim = Style::default().fg(Color::DarkGray);
    let text = vec![
        Line::from(Span::styled(
            "✓ Booking Confirmed!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Your request has been sent to {}.", summary.branch_name)),
        Line::from(vec![
            Span::styled("Branch: ", dim),
            Span::raw(format!("{}, {}", summary.branch_name, summary.branch_area)),
        ]),
        Line::from(vec![Span::styled("Car: ", dim), Span::raw(summary.car.clone())]),
        Line::from(vec![Span::styled("Driver: ", dim), Span::raw(summary.driver.clone())]),
        Line::default(),
        Line::from(Span::styled(
            "[ Back to Home ]",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), content);

    vec![KeyHint::new("Enter", "Back to Home"), hints::QUIT]
}
