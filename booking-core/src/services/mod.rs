pub mod booking_api;
pub mod contacts;
pub mod factory;
pub mod platform;

pub use booking_api::{BookingApi, BookingError};
pub use contacts::{ContactsError, ContactsProvider, PermissionStatus, retry_contacts, sync_contacts};
pub use factory::{ApiConfig, BookingApiFactory, BookingApiRegistry};
pub use platform::{DevicePlatform, PlatformError};
