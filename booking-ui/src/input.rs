//! Key bindings for the booking screens.
//!
//! Keys become workflow [`Event`]s. Cursor positions that only matter to
//! the terminal (highlighted branch, focused form slot) live in
//! [`UiState`], never in the workflow.

use booking_core::{Branch, Event, FormField, FuelType, Screen, Transmission, WorkflowState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A focusable row of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Text(FormField),
    Fuel,
    Transmission,
    Submit,
}

impl FormSlot {
    /// Every slot, top to bottom.
    pub fn all() -> Vec<FormSlot> {
        FormField::all()
            .iter()
            .copied()
            .map(FormSlot::Text)
            .chain([FormSlot::Fuel, FormSlot::Transmission, FormSlot::Submit])
            .collect()
    }

    fn first() -> Self {
        FormSlot::Text(FormField::FirstName)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Highlighted row of the branch list.
    pub branch: usize,
    pub focus: FormSlot,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            branch: 0,
            focus: FormSlot::first(),
        }
    }
}

impl UiState {
    fn move_focus(&mut self, step: isize) {
        let slots = FormSlot::all();
        let at = slots.iter().position(|s| *s == self.focus).unwrap_or(0);
        self.focus = slots[wrap(at, step, slots.len())];
    }

    fn move_branch(&mut self, step: isize) {
        self.branch = wrap(self.branch, step, Branch::all().len());
    }
}

fn wrap(at: usize, step: isize, len: usize) -> usize {
    (at as isize + step).rem_euclid(len as isize) as usize
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Post(Event),
    Quit,
    Nothing,
}

pub fn map_key(
    key: KeyEvent,
    state: &WorkflowState,
    ui: &mut UiState,
) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // An open alert swallows everything but its dismiss keys.
    if state.alert().is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::Post(Event::AlertDismissed),
            _ => Action::Nothing,
        };
    }

    match state.screen() {
        Screen::Splash => quit_on_q(key),
        Screen::Onboarding { .. } => match key.code {
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => {
                Action::Post(Event::OnboardingNext)
            }
            KeyCode::Esc | KeyCode::Char('s') => Action::Post(Event::OnboardingSkip),
            _ => quit_on_q(key),
        },
        Screen::BranchSelect => branch_key(key, ui),
        Screen::Form => form_key(key, state, ui),
        Screen::Success => match key.code {
            KeyCode::Enter | KeyCode::Char('h') => Action::Post(Event::ReturnHome),
            _ => quit_on_q(key),
        },
    }
}

fn quit_on_q(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Nothing,
    }
}

fn branch_key(
    key: KeyEvent,
    ui: &mut UiState,
) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            ui.move_branch(-1);
            Action::Nothing
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ui.move_branch(1);
            Action::Nothing
        }
        KeyCode::Enter => select_branch(ui, ui.branch),
        KeyCode::Char(c) if c.is_ascii_digit() => match c.to_digit(10) {
            Some(position) if position > 0 => select_branch(ui, position as usize - 1),
            _ => Action::Nothing,
        },
        _ => quit_on_q(key),
    }
}

fn select_branch(
    ui: &mut UiState,
    index: usize,
) -> Action {
    let Some(branch) = Branch::all().get(index) else {
        return Action::Nothing;
    };
    ui.branch = index;
    ui.focus = FormSlot::first();
    Action::Post(Event::BranchSelected(branch.id.to_string()))
}

fn form_key(
    key: KeyEvent,
    state: &WorkflowState,
    ui: &mut UiState,
) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Action::Post(Event::SubmitRequested),
            _ => Action::Nothing,
        };
    }

    let form = state.form();
    match (key.code, ui.focus) {
        (KeyCode::Tab | KeyCode::Down, _) => {
            ui.move_focus(1);
            Action::Nothing
        }
        (KeyCode::BackTab | KeyCode::Up, _) => {
            ui.move_focus(-1);
            Action::Nothing
        }
        (KeyCode::Esc, _) => Action::Post(Event::Back),
        (KeyCode::Enter, FormSlot::Submit) => Action::Post(Event::SubmitRequested),
        (KeyCode::Enter, _) => {
            ui.move_focus(1);
            Action::Nothing
        }
        (KeyCode::Char(c), FormSlot::Text(field)) => {
            let mut value = form.get(field).to_string();
            value.push(c);
            Action::Post(Event::FieldEdited { field, value })
        }
        (KeyCode::Backspace, FormSlot::Text(field)) => {
            let mut value = form.get(field).to_string();
            match value.pop() {
                Some(_) => Action::Post(Event::FieldEdited { field, value }),
                None => Action::Nothing,
            }
        }
        (KeyCode::Left, FormSlot::Fuel) => {
            Action::Post(Event::FuelTypeChosen(cycle(FuelType::all(), form.fuel_type, -1)))
        }
        (KeyCode::Right | KeyCode::Char(' '), FormSlot::Fuel) => {
            Action::Post(Event::FuelTypeChosen(cycle(FuelType::all(), form.fuel_type, 1)))
        }
        (KeyCode::Left, FormSlot::Transmission) => Action::Post(Event::TransmissionChosen(
            cycle(Transmission::all(), form.transmission, -1),
        )),
        (KeyCode::Right | KeyCode::Char(' '), FormSlot::Transmission) => Action::Post(
            Event::TransmissionChosen(cycle(Transmission::all(), form.transmission, 1)),
        ),
        _ => Action::Nothing,
    }
}

/// The option `step` places away from `current`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(
    options: &[T],
    current: T,
    step: isize,
) -> T {
    let at = options.iter().position(|o| *o == current).unwrap_or(0);
    options[wrap(at, step, options.len())]
}
