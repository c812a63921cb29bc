//! Wires configuration, services and the controller into a terminal session.

use std::sync::Arc;

use anyhow::{Context, Result};
use booking_contacts::{CsvContactsProvider, PermissionGate};
use booking_core::{BookingApiRegistry, BookingController, EventSender, Services, WorkflowState};
use booking_http::HttpBookingApiFactory;
use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::Frame;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::input::{self, Action, UiState};
use crate::platform::ConsolePlatform;
use crate::terminal::{CrosstermTerminal, TerminalGuard};
use crate::views;

/// Registry with every booking backend this build ships.
pub fn build_registry() -> BookingApiRegistry {
    let mut registry = BookingApiRegistry::new();
    registry.register(Box::new(HttpBookingApiFactory));
    registry
}

pub async fn build_services(config: &AppConfig) -> Result<Services> {
    let api_config = config.api_config();
    debug!(backend = %api_config.backend, url = %api_config.book_url(), "creating booking api");
    let api = build_registry()
        .create(&api_config)
        .await
        .context("creating booking api")?;

    let contacts = CsvContactsProvider::new(
        config.contacts.file.clone(),
        PermissionGate::new(config.contacts.permission),
    );

    Ok(Services {
        api: Arc::from(api),
        contacts: Arc::new(contacts),
        platform: Arc::new(ConsolePlatform::new(config.app.native)),
    })
}

pub async fn build_controller(config: &AppConfig) -> Result<BookingController> {
    let services = build_services(config).await?;
    Ok(BookingController::new(config.controller_settings(), services))
}

/// One user's run through the booking screens.
///
/// Key presses are posted through the controller's [`EventSender`], the
/// same path background completions take, and applied by pumping.
pub struct Session {
    controller: BookingController,
    sender: EventSender,
    ui: UiState,
}

impl Session {
    pub fn new(controller: BookingController) -> Self {
        let sender = controller.sender();
        Self {
            controller,
            sender,
            ui: UiState::default(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.controller.state()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    /// Applies one key press. Returns `false` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match input::map_key(key, self.controller.state(), &mut self.ui) {
            Action::Quit => return false,
            Action::Post(event) => {
                if self.sender.send(event) {
                    self.controller.pump();
                }
            }
            Action::Nothing => {}
        }
        true
    }

    /// Waits for the next background completion.
    pub async fn step(&mut self) -> bool {
        self.controller.step().await
    }

    pub async fn run_until(&mut self, done: impl Fn(&WorkflowState) -> bool) {
        self.controller.run_until(done).await;
    }

    pub fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self.controller.state(), &self.ui);
    }
}

/// Runs the interactive session until the user quits.
pub async fn run(config: AppConfig) -> Result<()> {
    let controller = build_controller(&config).await?;
    let mut session = Session::new(controller);

    let mut guard = TerminalGuard::enter().context("preparing terminal")?;
    session.start();
    info!(url = %config.api_config().book_url(), "booking session started");

    let result = event_loop(&mut session, guard.terminal_mut()).await;
    guard.restore()?;

    info!("booking session ended");
    result
}

async fn event_loop(
    session: &mut Session,
    terminal: &mut CrosstermTerminal,
) -> Result<()> {
    let mut keys = EventStream::new();
    loop {
        terminal.draw(|frame| session.draw(frame))?;

        tokio::select! {
            input = keys.next() => match input {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if !session.handle_key(key) {
                        break;
                    }
                }
                // Resizes and the like only need the redraw at the top.
                Some(Ok(_)) => {}
                Some(Err(error)) => return Err(error).context("reading terminal input"),
                None => break,
            },
            alive = session.step() => {
                if !alive {
                    break;
                }
            }
        }
    }
    Ok(())
}
