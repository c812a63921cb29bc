//! Driver and vehicle details form.

use booking_core::{FormField, FuelType, Transmission, WorkflowState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::highlight;
use super::status_bar::{KeyHint, hints};
use crate::input::FormSlot;

const LABEL_WIDTH: usize = 16;

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &WorkflowState,
    focus: FormSlot,
) -> Vec<KeyHint> {
    let form = state.form();
    let mut lines = Vec::new();

    if let Some(branch) = state.selected_branch() {
        lines.push(Line::from(vec![
            Span::styled(branch.name, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" · {}", branch.area),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::default());
    }

    for field in FormField::all() {
        let focused = focus == FormSlot::Text(*field);
        let marker = if field.is_required() { "*" } else { " " };
        let value = form.get(*field);
        let shown = match (value.is_empty(), focused) {
            (_, true) => format!("{value}_"),
            (true, false) => "-".to_string(),
            (false, false) => value.to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Red)),
            Span::raw(" "),
            label(field.label(), focused),
            Span::raw(shown),
        ]));
    }

    lines.push(choice_line(
        "Fuel Type",
        focus == FormSlot::Fuel,
        FuelType::all().iter().map(|f| (f.label(), *f == form.fuel_type)),
    ));
    lines.push(choice_line(
        "Transmission",
        focus == FormSlot::Transmission,
        Transmission::all()
            .iter()
            .map(|t| (t.label(), *t == form.transmission)),
    ));
    lines.push(Line::default());

    let contacts = state.contacts().len();
    if contacts > 0 {
        lines.push(Line::from(Span::styled(
            format!("  {contacts} emergency contact(s) attached"),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::default());
    }

    let button = if state.is_submitting() {
        "[ Processing... ]"
    } else {
        "[ Confirm Request ]"
    };
    let button_style = if focus == FormSlot::Submit {
        highlight()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![Span::raw("  "), Span::styled(button, button_style)]));

    frame.render_widget(Paragraph::new(lines), area);

    let submit = if state.can_submit() {
        KeyHint::new("Ctrl-S", "Confirm")
    } else {
        KeyHint::new("Ctrl-S", "Unavailable")
    };
    vec![KeyHint::new("Tab", "Next field"), submit, hints::BACK]
}

fn label(
    text: &str,
    focused: bool,
) -> Span<'static> {
    let padded = format!("{text:<LABEL_WIDTH$}");
    if focused {
        Span::styled(padded, highlight())
    } else {
        Span::raw(padded)
    }
}

/// A segmented choice row, the selected option in brackets.
fn choice_line<'a>(
    name: &str,
    focused: bool,
    options: impl Iterator<Item = (&'a str, bool)>,
) -> Line<'static> {
    let mut spans = vec![Span::raw("  "), label(name, focused)];
    for (i, (option, selected)) in options.enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(if selected {
            Span::styled(format!("[{option}]"), Style::default().fg(Color::Cyan))
        } else {
            Span::raw(option.to_string())
        });
    }
    Line::from(spans)
}
