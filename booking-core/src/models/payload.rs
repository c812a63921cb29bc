use serde::Serialize;

use super::{Branch, Contact, FormData};

/// JSON body posted to the booking endpoint.
///
/// The form fields are flattened alongside `branchId` and `contacts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(flatten)]
    pub form: FormData,
    pub branch_id: String,
    pub contacts: Vec<Contact>,
}

impl BookingPayload {
    pub fn new(
        form: &FormData,
        branch: &Branch,
        contacts: &[Contact],
    ) -> Self {
        Self {
            form: form.clone(),
            branch_id: branch.id.to_string(),
            contacts: contacts.to_vec(),
        }
    }
}

/// What the confirmation screen shows after a booking goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessSummary {
    pub branch_name: String,
    pub branch_area: String,
    pub car: String,
    pub driver: String,
}
