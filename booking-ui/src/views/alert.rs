use booking_core::{Alert, AlertKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
};

use super::centered;

const WIDTH: u16 = 56;

fn title(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::BookingFailed => " Booking Failed ",
        AlertKind::NetworkError => " Network Error ",
        AlertKind::Validation => " Check Your Details ",
    }
}

/// Draws `alert` as a popup centred in `area`, clearing what is beneath.
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    alert: &Alert,
) {
    let mut lines = vec![Line::from(alert.message.as_str()), Line::default()];
    lines.extend(alert.details.iter().map(|d| Line::from(format!("- {d}"))));

    // Message, spacer and details, between two border rows.
    let height = lines.len() as u16 + 2;
    let popup = centered(area, WIDTH, height);

    let block = Block::bordered()
        .title(title(alert.kind))
        .border_style(Style::default().fg(Color::Red))
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
