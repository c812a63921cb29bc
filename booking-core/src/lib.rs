pub mod controller;
pub mod models;
pub mod services;
pub mod workflow;

pub use controller::{BookingController, ControllerSettings, EventSender, Services};
pub use models::*;
pub use services::{
    ApiConfig, BookingApi, BookingApiFactory, BookingApiRegistry, BookingError, ContactsError,
    ContactsProvider, DevicePlatform, PermissionStatus, PlatformError,
};
pub use workflow::{Alert, AlertKind, Effect, Event, Screen, WorkflowState};
