//! Address-book export reader.
//!
//! ## CSV Format
//!
//! Headers are matched by name; every column is optional.
//!
//! | Column         | Notes                                        |
//! |----------------|----------------------------------------------|
//! | `display_name` | Full name as shown in the address book       |
//! | `given_name`   | Used when `display_name` is empty            |
//! | `phone`        | One number per row                           |
//! | `phone_label`  | `mobile`, `home`, `work`, ...                |
//!
//! Consecutive rows sharing the same non-empty `display_name` belong to one
//! contact, so a contact with several numbers spans several rows:
//!
//! ```csv
//! display_name,given_name,phone,phone_label
//! Ravi Kumar,Ravi,98480 22338,mobile
//! Ravi Kumar,Ravi,040 2345 6789,home
//! ,Sita,90000 11111,
//! ```
use std::io::Read;

use booking_core::{ContactProjection, RawContact, RawName, RawPhone};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("CSV parse error on row {row}: {message}")]
    Parse { row: usize, message: String },
}

/// A single row of the export.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AddressBookRecord {
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub phone: Option<String>,
    pub phone_label: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl AddressBookRecord {
    fn phone(&self) -> Option<RawPhone> {
        present(&self.phone).map(|number| RawPhone {
            number: Some(number),
            label: present(&self.phone_label),
        })
    }

    fn continues(&self, contact: &RawContact) -> bool {
        let Some(display) = present(&self.display_name) else {
            return false;
        };
        contact
            .name
            .as_ref()
            .and_then(|n| n.display.as_deref())
            .is_some_and(|d| d == display)
    }
}

pub struct AddressBook;

impl AddressBook {
    /// Parse rows from any CSV reader.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<AddressBookRecord>, AddressBookError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: AddressBookRecord = result.map_err(|e| AddressBookError::Parse {
                row: index + 1,
                message: e.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Group rows into contacts, keeping only what `projection` asks for.
    pub fn to_contacts(
        records: &[AddressBookRecord],
        projection: ContactProjection,
    ) -> Vec<RawContact> {
        let mut contacts: Vec<RawContact> = Vec::new();

        for record in records {
            if let Some(last) = contacts.last_mut() {
                if record.continues(last) {
                    last.phones.extend(record.phone());
                    continue;
                }
            }
            contacts.push(RawContact {
                name: Some(RawName {
                    display: present(&record.display_name),
                    given: present(&record.given_name),
                }),
                phones: record.phone().into_iter().collect(),
            });
        }

        for contact in &mut contacts {
            if !projection.name {
                contact.name = None;
            }
            if !projection.phones {
                contact.phones.clear();
            }
        }
        contacts
    }

    pub fn parse<R: Read>(
        reader: R,
        projection: ContactProjection,
    ) -> Result<Vec<RawContact>, AddressBookError> {
        let records = Self::parse_records(reader)?;
        Ok(Self::to_contacts(&records, projection))
    }
}
