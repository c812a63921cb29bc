//! Key and rendering helpers for driving a [`Session`] in tests.

use booking_ui::Session;
use booking_ui::input::FormSlot;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

pub fn press(
    session: &mut Session,
    code: KeyCode,
) {
    assert!(session.handle_key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn ctrl(
    session: &mut Session,
    c: char,
) {
    assert!(session.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
}

pub fn type_text(
    session: &mut Session,
    text: &str,
) {
    for c in text.chars() {
        press(session, KeyCode::Char(c));
    }
}

/// Tabs until `slot` has focus.
pub fn focus(
    session: &mut Session,
    slot: FormSlot,
) {
    for _ in 0..FormSlot::all().len() {
        if session.ui().focus == slot {
            return;
        }
        press(session, KeyCode::Tab);
    }
    panic!("{slot:?} never took focus");
}

/// Draws the session once on an 80x30 test terminal.
pub fn render(session: &Session) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");
    terminal
        .draw(|frame| session.draw(frame))
        .expect("draw");
    buffer_to_string(terminal.backend().buffer())
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }
    output
}
