use serde::{Deserialize, Serialize};

const UNKNOWN_NAME: &str = "Unknown";
const DEFAULT_LABEL: &str = "mobile";

/// Address-book entry attached to a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub label: String,
}

/// Which parts of a device contact a provider should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactProjection {
    pub name: bool,
    pub phones: bool,
}

impl Default for ContactProjection {
    fn default() -> Self {
        Self {
            name: true,
            phones: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawName {
    pub display: Option<String>,
    pub given: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPhone {
    pub number: Option<String>,
    pub label: Option<String>,
}

/// A contact record as a provider returns it, before projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContact {
    pub name: Option<RawName>,
    pub phones: Vec<RawPhone>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RawContact {
    /// Reduces the record to a [`Contact`] using the first phone entry.
    /// Returns `None` when the record has no usable phone number.
    pub fn project(&self) -> Option<Contact> {
        let first_phone = self.phones.first()?;
        let phone = non_blank(&first_phone.number)?;

        let name = self
            .name
            .as_ref()
            .and_then(|n| non_blank(&n.display).or_else(|| non_blank(&n.given)))
            .unwrap_or(UNKNOWN_NAME);
        let label = non_blank(&first_phone.label).unwrap_or(DEFAULT_LABEL);

        Some(Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            label: label.to_string(),
        })
    }
}

/// Projects every raw record, dropping those without a phone number.
pub fn project_contacts(raw: &[RawContact]) -> Vec<Contact> {
    raw.iter().filter_map(RawContact::project).collect()
}
