//! Booking workflow state machine.
//!
//! [`WorkflowState::apply`] is a pure transition function: it takes one
//! [`Event`] (a user action or the completion of background work), updates
//! the state, and returns the [`Effect`]s the caller must run. Nothing here
//! touches the network, the address book or a clock, so every transition
//! can be tested without a rendering surface.

use tracing::{debug, error, info, warn};

use crate::models::{
    Branch, BookingPayload, Contact, FormData, FormField, FuelType, OnboardingPanel,
    SuccessSummary, Transmission,
};
use crate::services::BookingError;

pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Check your internet connection.";
pub const INVALID_FORM_MESSAGE: &str = "Please fix the highlighted fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Onboarding { step: usize },
    BranchSelect,
    Form,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    BookingFailed,
    NetworkError,
    Validation,
}

/// Blocking message shown over the current screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub details: Vec<String>,
}

impl Alert {
    fn booking_failed() -> Self {
        Self {
            kind: AlertKind::BookingFailed,
            message: BOOKING_FAILED_MESSAGE.to_string(),
            details: Vec::new(),
        }
    }

    fn network_error() -> Self {
        Self {
            kind: AlertKind::NetworkError,
            message: NETWORK_ERROR_MESSAGE.to_string(),
            details: Vec::new(),
        }
    }

    fn validation(details: Vec<String>) -> Self {
        Self {
            kind: AlertKind::Validation,
            message: INVALID_FORM_MESSAGE.to_string(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // user actions
    OnboardingNext,
    OnboardingSkip,
    BranchSelected(String),
    FieldEdited { field: FormField, value: String },
    FuelTypeChosen(FuelType),
    TransmissionChosen(Transmission),
    Back,
    SubmitRequested,
    AlertDismissed,
    ReturnHome,

    // background completions
    SplashElapsed,
    ContactsSynced {
        generation: u64,
        contacts: Vec<Contact>,
    },
    SubmissionResolved {
        ticket: u64,
        outcome: Result<(), BookingError>,
    },
}

impl Event {
    /// Completions are applied even while an alert is blocking the screen.
    fn is_background(&self) -> bool {
        matches!(
            self,
            Event::SplashElapsed | Event::ContactsSynced { .. } | Event::SubmissionResolved { .. }
        )
    }
}

/// Work the controller must start on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hold the splash, tear down native chrome, then post `SplashElapsed`.
    Startup,
    /// Ask for contacts access and post `ContactsSynced` with this generation.
    SyncContacts { generation: u64 },
    /// Send one booking and post `SubmissionResolved` with this ticket.
    Submit {
        ticket: u64,
        generation: u64,
        payload: BookingPayload,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    ticket: u64,
    generation: u64,
}

/// Everything the booking screens render from.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    screen: Screen,
    onboarding_enabled: bool,
    selected_branch: Option<&'static Branch>,
    form: FormData,
    contacts: Vec<Contact>,
    /// Bumped on every branch selection; tags contact syncs and submissions
    /// so results from an earlier visit to the form are recognised.
    generation: u64,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    alert: Option<Alert>,
}

impl WorkflowState {
    pub fn new(onboarding_enabled: bool) -> Self {
        Self {
            screen: Screen::Splash,
            onboarding_enabled,
            selected_branch: None,
            form: FormData::default(),
            contacts: Vec::new(),
            generation: 0,
            in_flight: None,
            next_ticket: 1,
            alert: None,
        }
    }

    /// Effects to run once when the app comes up.
    pub fn start(&self) -> Vec<Effect> {
        vec![Effect::Startup]
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_branch(&self) -> Option<&'static Branch> {
        self.selected_branch
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// True from the moment a booking is sent until its result arrives.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.screen == Screen::Form && self.in_flight.is_none() && self.alert.is_none()
    }

    pub fn onboarding_panel(&self) -> Option<(usize, &'static OnboardingPanel)> {
        match self.screen {
            Screen::Onboarding { step } => OnboardingPanel::get(step).map(|p| (step, p)),
            _ => None,
        }
    }

    pub fn success_summary(&self) -> Option<SuccessSummary> {
        if self.screen != Screen::Success {
            return None;
        }
        let branch = self.selected_branch?;
        Some(SuccessSummary {
            branch_name: branch.name.to_string(),
            branch_area: branch.area.to_string(),
            car: self.form.car_description(),
            driver: self.form.driver_name(),
        })
    }

    /// Applies one event and returns the effects it triggers.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        if self.alert.is_some() && !event.is_background() && event != Event::AlertDismissed {
            debug!(?event, "ignored while an alert is open");
            return Vec::new();
        }

        match event {
            Event::SplashElapsed => {
                if self.screen == Screen::Splash {
                    let next = if self.onboarding_enabled {
                        Screen::Onboarding { step: 0 }
                    } else {
                        Screen::BranchSelect
                    };
                    self.go_to(next);
                }
                Vec::new()
            }
            Event::OnboardingNext => {
                if let Screen::Onboarding { step } = self.screen {
                    if OnboardingPanel::is_last(step) {
                        self.go_to(Screen::BranchSelect);
                    } else {
                        self.go_to(Screen::Onboarding { step: step + 1 });
                    }
                }
                Vec::new()
            }
            Event::OnboardingSkip => {
                if matches!(self.screen, Screen::Onboarding { .. }) {
                    self.go_to(Screen::BranchSelect);
                }
                Vec::new()
            }
            Event::BranchSelected(id) => self.select_branch(&id),
            Event::FieldEdited { field, value } => {
                if self.screen == Screen::Form {
                    self.form.set(field, value);
                }
                Vec::new()
            }
            Event::FuelTypeChosen(fuel_type) => {
                if self.screen == Screen::Form {
                    self.form.fuel_type = fuel_type;
                }
                Vec::new()
            }
            Event::TransmissionChosen(transmission) => {
                if self.screen == Screen::Form {
                    self.form.transmission = transmission;
                }
                Vec::new()
            }
            Event::Back => {
                // Form data survives going back; only a completed booking clears it.
                if self.screen == Screen::Form {
                    self.go_to(Screen::BranchSelect);
                }
                Vec::new()
            }
            Event::SubmitRequested => self.submit(),
            Event::AlertDismissed => {
                self.alert = None;
                Vec::new()
            }
            Event::ReturnHome => {
                if self.screen == Screen::Success {
                    self.form = FormData::default();
                    self.go_to(Screen::BranchSelect);
                }
                Vec::new()
            }
            Event::ContactsSynced {
                generation,
                contacts,
            } => {
                if generation == self.generation {
                    debug!(count = contacts.len(), "contact cache replaced");
                    self.contacts = contacts;
                } else {
                    debug!(generation, current = self.generation, "stale contact sync dropped");
                }
                Vec::new()
            }
            Event::SubmissionResolved { ticket, outcome } => {
                self.resolve_submission(ticket, outcome);
                Vec::new()
            }
        }
    }

    fn go_to(&mut self, screen: Screen) {
        debug!(from = ?self.screen, to = ?screen, "screen transition");
        if screen == Screen::BranchSelect {
            self.selected_branch = None;
        }
        self.screen = screen;
    }

    fn select_branch(&mut self, id: &str) -> Vec<Effect> {
        if self.screen != Screen::BranchSelect {
            debug!(branch = id, screen = ?self.screen, "branch selection outside branch list");
            return Vec::new();
        }
        let Some(branch) = Branch::find(id) else {
            warn!(branch = id, "unknown branch selected");
            return Vec::new();
        };

        self.generation += 1;
        self.selected_branch = Some(branch);
        self.go_to(Screen::Form);
        vec![Effect::SyncContacts {
            generation: self.generation,
        }]
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Form {
            return Vec::new();
        }
        if let Some(in_flight) = self.in_flight {
            debug!(ticket = in_flight.ticket, "submit ignored; booking already in flight");
            return Vec::new();
        }
        let Some(branch) = self.selected_branch else {
            self.alert = Some(Alert::validation(vec!["Select a branch first.".to_string()]));
            return Vec::new();
        };
        if let Err(errors) = self.form.validate() {
            debug!(count = errors.len(), "booking form invalid");
            self.alert = Some(Alert::validation(errors));
            return Vec::new();
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(InFlight {
            ticket,
            generation: self.generation,
        });
        info!(ticket, branch = branch.id, "submitting booking");

        vec![Effect::Submit {
            ticket,
            generation: self.generation,
            payload: BookingPayload::new(&self.form, branch, &self.contacts),
        }]
    }

    fn resolve_submission(&mut self, ticket: u64, outcome: Result<(), BookingError>) {
        let Some(in_flight) = self.in_flight.filter(|f| f.ticket == ticket) else {
            debug!(ticket, "result for unknown booking dropped");
            return;
        };
        self.in_flight = None;

        // The user may have left the form (or come back via another branch)
        // while the request was out; such a result must not move the screen.
        if self.screen != Screen::Form || in_flight.generation != self.generation {
            match outcome {
                Ok(()) => info!(ticket, "booking accepted after leaving the form"),
                Err(error) => warn!(ticket, %error, "booking failed after leaving the form"),
            }
            return;
        }

        match outcome {
            Ok(()) => {
                info!(ticket, "booking confirmed");
                self.go_to(Screen::Success);
            }
            Err(BookingError::Rejected { status }) => {
                error!(ticket, status, "booking rejected");
                self.alert = Some(Alert::booking_failed());
            }
            Err(BookingError::Network(reason)) => {
                error!(ticket, %reason, "booking request failed");
                self.alert = Some(Alert::network_error());
            }
            Err(BookingError::Configuration(reason)) => {
                error!(ticket, %reason, "booking client misconfigured");
                self.alert = Some(Alert::network_error());
            }
        }
    }
}
