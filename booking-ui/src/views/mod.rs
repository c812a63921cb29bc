//! Ratatui screens for the terminal front end.
//!
//! - `onboarding` - instructional panels
//! - `branch_list` - branch selection
//! - `booking_form` - driver and vehicle details
//! - `success` - booking confirmation
//! - `alert` - modal error popup drawn over the current screen
//!
//! Everything is drawn from the [`WorkflowState`]; the only other input is
//! the terminal-side cursor in [`UiState`].

mod alert;
mod booking_form;
mod branch_list;
mod onboarding;
mod status_bar;
mod success;

use booking_core::{Screen, WorkflowState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::input::UiState;
use status_bar::{KeyHint, hints};

const TITLE: &str = " Thandra Self Drive ";

/// Draws the whole screen for `state`, alert included.
pub fn draw(
    frame: &mut Frame,
    state: &WorkflowState,
    ui: &UiState,
) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let block = Block::bordered()
        .title(TITLE)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let hints = match state.screen() {
        Screen::Splash => {
            draw_splash(frame, inner);
            vec![hints::QUIT]
        }
        Screen::Onboarding { .. } => match state.onboarding_panel() {
            Some((step, panel)) => onboarding::draw(frame, inner, step, panel),
            None => vec![hints::QUIT],
        },
        Screen::BranchSelect => branch_list::draw(frame, inner, ui.branch),
        Screen::Form => booking_form::draw(frame, inner, state, ui.focus),
        Screen::Success => match state.success_summary() {
            Some(summary) => success::draw(frame, inner, &summary),
            None => vec![hints::QUIT],
        },
    };

    let hints = match state.alert() {
        Some(alert) => {
            alert::draw(frame, body, alert);
            vec![KeyHint::new("Enter", "Dismiss")]
        }
        None => hints,
    };
    frame.render_widget(status_bar::build_status_bar(&hints), status);
}

fn draw_splash(
    frame: &mut Frame,
    area: Rect,
) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);
    let text = vec![
        Line::from(Span::styled(
            "Thandra Self Drive",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled("Loading...", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered(
    area: Rect,
    width: u16,
    height: u16,
) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Style for the focused row or selected option.
fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
