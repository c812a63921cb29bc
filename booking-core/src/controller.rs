//! Async driver around [`WorkflowState`].
//!
//! The controller is the single owner of the workflow state. User input and
//! background completions arrive as [`Event`]s on one channel and are applied
//! in order; effects run as tokio tasks that report back on the same channel.

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::BookingPayload;
use crate::services::{
    BookingApi, ContactsProvider, DevicePlatform, PlatformError, retry_contacts, sync_contacts,
};
use crate::workflow::{Effect, Event, WorkflowState};

pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Minimum time the splash stays up.
    pub splash_duration: Duration,
    /// Show the instructional panels after the splash.
    pub onboarding: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            splash_duration: DEFAULT_SPLASH_DURATION,
            onboarding: true,
        }
    }
}

/// External collaborators the workflow talks to.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn BookingApi>,
    pub contacts: Arc<dyn ContactsProvider>,
    pub platform: Arc<dyn DevicePlatform>,
}

/// Cloneable handle for posting events into a running controller.
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::UnboundedSender<Event>);

impl EventSender {
    /// Returns `false` once the controller has been dropped.
    pub fn send(&self, event: Event) -> bool {
        self.0.send(event).is_ok()
    }
}

pub struct BookingController {
    state: WorkflowState,
    settings: ControllerSettings,
    services: Services,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl BookingController {
    pub fn new(settings: ControllerSettings, services: Services) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: WorkflowState::new(settings.onboarding),
            settings,
            services,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn sender(&self) -> EventSender {
        EventSender(self.tx.clone())
    }

    /// Kicks off the splash. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let effects = self.state.start();
        self.run_effects(effects);
    }

    /// Applies `event` immediately and starts whatever it triggers.
    pub fn dispatch(&mut self, event: Event) {
        let effects = self.state.apply(event);
        self.run_effects(effects);
    }

    /// Waits for the next queued event and applies it.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Applies every event already queued, without waiting for more.
    ///
    /// Input posted through an [`EventSender`] takes effect once pumped.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Applies queued events until `done` holds for the state.
    pub async fn run_until(&mut self, done: impl Fn(&WorkflowState) -> bool) {
        while !done(&self.state) {
            if !self.step().await {
                break;
            }
        }
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Startup => self.spawn_startup(),
                Effect::SyncContacts { generation } => self.spawn_contact_sync(generation),
                Effect::Submit {
                    ticket,
                    generation,
                    payload,
                } => self.spawn_submission(ticket, generation, payload),
            }
        }
    }

    fn spawn_startup(&self) {
        let platform = self.services.platform.clone();
        let delay = self.settings.splash_duration;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if platform.is_native() {
                match platform.hide_splash().await {
                    Ok(()) => {}
                    Err(PlatformError::Unsupported) => debug!("splash hide not supported"),
                    Err(error) => warn!(%error, "splash hide failed"),
                }
                match platform.request_notification_permission().await {
                    Ok(status) => info!(%status, "notification permission"),
                    Err(error) => warn!(%error, "notification permission request failed"),
                }
            }

            let _ = tx.send(Event::SplashElapsed);
        });
    }

    fn spawn_contact_sync(&self, generation: u64) {
        if !self.services.platform.is_native() {
            debug!("contact sync skipped; no native contacts");
            return;
        }
        let provider = self.services.contacts.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            // An empty fetch still supersedes what an earlier branch visit cached.
            if let Some(contacts) = sync_contacts(provider.as_ref()).await {
                let _ = tx.send(Event::ContactsSynced {
                    generation,
                    contacts,
                });
            }
        });
    }

    fn spawn_submission(
        &self,
        ticket: u64,
        generation: u64,
        mut payload: BookingPayload,
    ) {
        let services = self.services.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            if payload.contacts.is_empty() && services.platform.is_native() {
                if let Some(retried) = retry_contacts(services.contacts.as_ref()).await {
                    debug!(ticket, count = retried.len(), "contacts fetched on retry");
                    let _ = tx.send(Event::ContactsSynced {
                        generation,
                        contacts: retried.clone(),
                    });
                    payload.contacts = retried;
                }
            }

            let outcome = services.api.submit(&payload).await;
            let _ = tx.send(Event::SubmissionResolved { ticket, outcome });
        });
    }
}
