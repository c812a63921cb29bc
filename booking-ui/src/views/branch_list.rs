use booking_core::Branch;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::highlight;
use super::status_bar::{KeyHint, hints};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    cursor: usize,
) -> Vec<KeyHint> {
    let [heading, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Select Branch",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Choose the branch nearest to you",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        heading,
    );

    let items: Vec<ListItem> = Branch::all()
        .iter()
        .enumerate()
        .map(|(i, branch)| {
            ListItem::new(vec![
                Line::from(format!("{}. {}", i + 1, branch.name)),
                Line::from(Span::styled(
                    format!("   {}", branch.area),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let list = List::new(items)
        .highlight_style(highlight())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, list_area, &mut state);

    vec![
        KeyHint::new("↑/↓", "Move"),
        KeyHint::new("Enter/1-4", "Select"),
        hints::QUIT,
    ]
}
