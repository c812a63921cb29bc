mod branch;
mod contact;
mod form_data;
mod onboarding;
mod payload;

pub use branch::{BRANCHES, Branch};
pub use contact::{Contact, ContactProjection, RawContact, RawName, RawPhone, project_contacts};
pub use form_data::{FormData, FormField, FuelType, ParseChoiceError, Transmission};
pub use onboarding::{ONBOARDING_PANELS, OnboardingPanel};
pub use payload::{BookingPayload, SuccessSummary};
