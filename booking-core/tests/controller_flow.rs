//! End-to-end runs of the booking controller against stub collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use booking_core::{
    BookingApi, BookingController, BookingError, BookingPayload, ContactProjection,
    ContactsError, ContactsProvider, ControllerSettings, DevicePlatform, Event, FormField,
    PermissionStatus, PlatformError, RawContact, RawName, RawPhone, Screen, Services,
    WorkflowState,
};
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

// ── stubs ────────────────────────────────────────────────────────────────

/// Records every payload and answers with a fixed outcome, optionally
/// holding each request until released.
struct StubApi {
    outcome: Result<(), BookingError>,
    payloads: Mutex<Vec<BookingPayload>>,
    gate: Option<Arc<Notify>>,
}

impl StubApi {
    fn answering(outcome: Result<(), BookingError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            payloads: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(()),
            payloads: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    fn sent(&self) -> Vec<BookingPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for StubApi {
    async fn submit(&self, payload: &BookingPayload) -> Result<(), BookingError> {
        self.payloads.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

/// Address book whose permission answer changes after the first prompt.
struct StubContacts {
    answers: Mutex<Vec<PermissionStatus>>,
    current: Mutex<PermissionStatus>,
    records: Mutex<Vec<RawContact>>,
    reads: AtomicUsize,
}

impl StubContacts {
    /// `answers` are handed out one per prompt; the last one repeats.
    fn new(answers: Vec<PermissionStatus>, names: &[&str]) -> Arc<Self> {
        let records = names
            .iter()
            .enumerate()
            .map(|(i, name)| RawContact {
                name: Some(RawName {
                    display: Some(name.to_string()),
                    given: None,
                }),
                phones: vec![RawPhone {
                    number: Some(format!("90000 0000{i}")),
                    label: None,
                }],
            })
            .collect();
        Arc::new(Self {
            answers: Mutex::new(answers),
            current: Mutex::new(PermissionStatus::Prompt),
            records: Mutex::new(records),
            reads: AtomicUsize::new(0),
        })
    }

    fn clear_address_book(&self) {
        self.records.lock().unwrap().clear();
    }
}

#[async_trait]
impl ContactsProvider for StubContacts {
    async fn check_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        Ok(*self.current.lock().unwrap())
    }

    async fn request_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        let mut answers = self.answers.lock().unwrap();
        let answer = if answers.len() > 1 {
            answers.remove(0)
        } else {
            answers.first().copied().unwrap_or(PermissionStatus::Denied)
        };
        *self.current.lock().unwrap() = answer;
        Ok(answer)
    }

    async fn get_contacts(
        &self,
        _projection: ContactProjection,
    ) -> Result<Vec<RawContact>, ContactsError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Contacts provider that always throws.
struct BrokenContacts;

#[async_trait]
impl ContactsProvider for BrokenContacts {
    async fn check_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        Err(ContactsError::Unavailable("no address book".into()))
    }
    async fn request_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        Err(ContactsError::Unavailable("no address book".into()))
    }
    async fn get_contacts(
        &self,
        _projection: ContactProjection,
    ) -> Result<Vec<RawContact>, ContactsError> {
        Err(ContactsError::Read("unreachable".into()))
    }
}

struct StubPlatform {
    native: bool,
}

#[async_trait]
impl DevicePlatform for StubPlatform {
    fn is_native(&self) -> bool {
        self.native
    }
    async fn hide_splash(&self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
    async fn request_notification_permission(&self) -> Result<PermissionStatus, PlatformError> {
        Err(PlatformError::Failed("no notification service".into()))
    }
}

// ── helpers ──────────────────────────────────────────────────────────────

fn controller(
    api: Arc<dyn BookingApi>,
    contacts: Arc<dyn ContactsProvider>,
    native: bool,
) -> BookingController {
    let settings = ControllerSettings {
        splash_duration: Duration::ZERO,
        onboarding: false,
    };
    BookingController::new(
        settings,
        Services {
            api,
            contacts,
            platform: Arc::new(StubPlatform { native }),
        },
    )
}

async fn drive(ctrl: &mut BookingController, done: impl Fn(&WorkflowState) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), ctrl.run_until(done))
        .await
        .expect("controller did not reach the expected state in time");
}

async fn open_form(ctrl: &mut BookingController, branch: &str) {
    ctrl.start();
    drive(ctrl, |s| s.screen() == Screen::BranchSelect).await;
    ctrl.dispatch(Event::BranchSelected(branch.to_string()));
}

fn fill_required(ctrl: &mut BookingController) {
    for (field, value) in [
        (FormField::FirstName, "John"),
        (FormField::LastName, "Doe"),
        (FormField::Mobile, "9876543210"),
        (FormField::CarMake, "Toyota"),
        (FormField::CarModel, "Innova"),
        (FormField::LicenseNumber, "DL-1234567890"),
        (FormField::PlateNumber, "TS 09 AB 1234"),
    ] {
        ctrl.dispatch(Event::FieldEdited {
            field,
            value: value.to_string(),
        });
    }
}

fn resolved(state: &WorkflowState) -> bool {
    !state.is_submitting()
}

// ── scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_booking_reaches_confirmation() {
    let api = StubApi::answering(Ok(()));
    let mut ctrl = controller(api.clone(), StubContacts::new(vec![PermissionStatus::Denied], &[]), true);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    let summary = ctrl.state().success_summary().unwrap();
    assert_eq!(summary.branch_name, "Madhapur");
    assert_eq!(summary.car, "Toyota Innova");

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].branch_id, "thandra_madhapur");
    assert_eq!(sent[0].form.plate_number, "TS 09 AB 1234");
}

#[tokio::test]
async fn server_error_keeps_form_and_reenables_submit() {
    let api = StubApi::answering(Err(BookingError::Rejected { status: 500 }));
    let mut ctrl = controller(api, StubContacts::new(vec![PermissionStatus::Denied], &[]), true);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    let before = ctrl.state().form().clone();
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    let state = ctrl.state();
    assert_eq!(state.screen(), Screen::Form);
    assert_eq!(state.form(), &before);
    assert_eq!(state.alert().unwrap().message, "Booking failed. Please try again.");

    ctrl.dispatch(Event::AlertDismissed);
    assert!(ctrl.state().can_submit());
}

#[tokio::test]
async fn network_error_shows_network_message() {
    let api = StubApi::answering(Err(BookingError::Network("connection refused".into())));
    let mut ctrl = controller(api, StubContacts::new(vec![PermissionStatus::Denied], &[]), true);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    let state = ctrl.state();
    assert_eq!(state.screen(), Screen::Form);
    assert_eq!(
        state.alert().unwrap().message,
        "Network error. Check your internet connection."
    );
    assert_eq!(state.form().first_name, "John");
}

#[tokio::test]
async fn denied_contacts_still_book_with_empty_list() {
    let api = StubApi::answering(Ok(()));
    let contacts = StubContacts::new(vec![PermissionStatus::Denied], &["Asha", "Ravi"]);
    let mut ctrl = controller(api.clone(), contacts.clone(), true);

    open_form(&mut ctrl, "thandra_dsnr").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    assert!(ctrl.state().alert().is_none());
    assert!(api.sent()[0].contacts.is_empty());
    assert_eq!(contacts.reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_refetch_replaces_contacts_from_earlier_branch() {
    let api = StubApi::answering(Ok(()));
    let contacts = StubContacts::new(vec![PermissionStatus::Granted], &["Asha"]);
    let mut ctrl = controller(api.clone(), contacts.clone(), true);

    open_form(&mut ctrl, "thandra_madhapur").await;
    drive(&mut ctrl, |s| s.contacts().len() == 1).await;

    contacts.clear_address_book();
    ctrl.dispatch(Event::Back);
    ctrl.dispatch(Event::BranchSelected("thandra_jntu".into()));
    drive(&mut ctrl, |s| s.contacts().is_empty()).await;

    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    let sent = api.sent();
    assert_eq!(sent[0].branch_id, "thandra_jntu");
    assert!(sent[0].contacts.is_empty(), "sent {:?}", sent[0].contacts);
}

#[tokio::test]
async fn broken_contacts_provider_never_surfaces() {
    let api = StubApi::answering(Ok(()));
    let mut ctrl = controller(api.clone(), Arc::new(BrokenContacts), true);

    open_form(&mut ctrl, "thandra_jntu").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    assert!(api.sent()[0].contacts.is_empty());
}

#[tokio::test]
async fn retry_at_submit_attaches_contacts_granted_late() {
    let api = StubApi::answering(Ok(()));
    // First prompt (branch selection) is denied, the retry is granted.
    let contacts = StubContacts::new(
        vec![PermissionStatus::Denied, PermissionStatus::Granted],
        &["Asha", "Ravi", "Sita"],
    );
    let mut ctrl = controller(api.clone(), contacts, true);

    open_form(&mut ctrl, "thandra_bnreddy").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    let sent = api.sent();
    assert_eq!(sent[0].contacts.len(), 3);
    assert_eq!(sent[0].contacts[0].name, "Asha");
    assert_eq!(ctrl.state().contacts().len(), 3);
}

#[tokio::test]
async fn retry_granted_with_no_contacts_sends_empty_list() {
    let api = StubApi::answering(Ok(()));
    let contacts = StubContacts::new(
        vec![PermissionStatus::Denied, PermissionStatus::Granted],
        &[],
    );
    let mut ctrl = controller(api.clone(), contacts, true);

    open_form(&mut ctrl, "thandra_bnreddy").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    assert!(api.sent()[0].contacts.is_empty());
}

#[tokio::test]
async fn non_native_platform_never_touches_contacts() {
    let api = StubApi::answering(Ok(()));
    let contacts = StubContacts::new(vec![PermissionStatus::Granted], &["Asha"]);
    let mut ctrl = controller(api.clone(), contacts.clone(), false);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    assert_eq!(ctrl.state().screen(), Screen::Success);
    assert!(api.sent()[0].contacts.is_empty());
    assert_eq!(contacts.reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rapid_submits_send_a_single_request() {
    let gate = Arc::new(Notify::new());
    let api = StubApi::gated(gate.clone());
    let mut ctrl = controller(api.clone(), StubContacts::new(vec![PermissionStatus::Denied], &[]), false);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    ctrl.dispatch(Event::SubmitRequested);
    ctrl.dispatch(Event::SubmitRequested);

    assert!(ctrl.state().is_submitting());
    assert!(!ctrl.state().can_submit());

    // let the one spawned request reach the gate
    while api.sent().is_empty() {
        tokio::task::yield_now().await;
    }
    gate.notify_one();
    drive(&mut ctrl, resolved).await;

    assert_eq!(api.sent().len(), 1);
    assert_eq!(ctrl.state().screen(), Screen::Success);
}

#[tokio::test]
async fn return_home_resets_form_for_next_booking() {
    let api = StubApi::answering(Ok(()));
    let mut ctrl = controller(api.clone(), StubContacts::new(vec![PermissionStatus::Denied], &[]), false);

    open_form(&mut ctrl, "thandra_madhapur").await;
    fill_required(&mut ctrl);
    ctrl.dispatch(Event::SubmitRequested);
    drive(&mut ctrl, resolved).await;

    ctrl.dispatch(Event::ReturnHome);
    assert_eq!(ctrl.state().screen(), Screen::BranchSelect);
    assert!(ctrl.state().form().first_name.is_empty());

    ctrl.dispatch(Event::BranchSelected("thandra_madhapur".into()));
    assert_eq!(ctrl.state().screen(), Screen::Form);

    ctrl.dispatch(Event::SubmitRequested);
    assert_eq!(
        api.sent().len(),
        1,
        "an empty form must not be sent"
    );
}

#[tokio::test]
async fn events_posted_through_sender_are_applied_in_order() {
    let api = StubApi::answering(Ok(()));
    let mut ctrl = controller(api.clone(), StubContacts::new(vec![PermissionStatus::Denied], &[]), false);
    ctrl.start();
    drive(&mut ctrl, |s| s.screen() == Screen::BranchSelect).await;

    let sender = ctrl.sender();
    tokio::spawn(async move {
        sender.send(Event::BranchSelected("thandra_bnreddy".into()));
        sender.send(Event::FieldEdited {
            field: FormField::CarMake,
            value: "Maruti".into(),
        });
    });

    drive(&mut ctrl, |s| s.form().car_make == "Maruti").await;
    assert_eq!(ctrl.state().selected_branch().map(|b| b.name), Some("BN Reddy"));
}

#[tokio::test]
async fn pump_applies_posted_input_without_waiting() {
    let api = StubApi::answering(Ok(()));
    let mut ctrl = controller(api, StubContacts::new(vec![PermissionStatus::Denied], &[]), false);
    ctrl.start();
    drive(&mut ctrl, |s| s.screen() == Screen::BranchSelect).await;

    let sender = ctrl.sender();
    assert!(sender.send(Event::BranchSelected("thandra_dsnr".into())));
    assert!(sender.send(Event::FieldEdited {
        field: FormField::FirstName,
        value: "Sita".into(),
    }));

    assert_eq!(ctrl.pump(), 2);
    assert_eq!(ctrl.state().screen(), Screen::Form);
    assert_eq!(ctrl.state().form().first_name, "Sita");
    assert_eq!(ctrl.pump(), 0);
}

#[tokio::test]
async fn sender_reports_closed_controller() {
    let api = StubApi::answering(Ok(()));
    let ctrl = controller(api, StubContacts::new(vec![PermissionStatus::Denied], &[]), false);
    let sender = ctrl.sender();
    drop(ctrl);

    assert!(!sender.send(Event::Back));
}
