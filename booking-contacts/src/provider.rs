use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use booking_core::{
    ContactProjection, ContactsError, ContactsProvider, PermissionStatus, RawContact,
};
use tracing::debug;

use crate::{AddressBook, PermissionGate};

/// [`ContactsProvider`] backed by an address-book CSV export on disk.
///
/// The file is read on every `get_contacts` call so edits show up
/// without a restart.
pub struct CsvContactsProvider {
    path: PathBuf,
    gate: PermissionGate,
}

impl CsvContactsProvider {
    pub fn new(path: impl Into<PathBuf>, gate: PermissionGate) -> Self {
        Self {
            path: path.into(),
            gate,
        }
    }
}

#[async_trait]
impl ContactsProvider for CsvContactsProvider {
    async fn check_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        Ok(self.gate.check())
    }

    async fn request_permissions(&self) -> Result<PermissionStatus, ContactsError> {
        Ok(self.gate.request())
    }

    async fn get_contacts(
        &self,
        projection: ContactProjection,
    ) -> Result<Vec<RawContact>, ContactsError> {
        if !self.gate.check().is_granted() {
            return Err(ContactsError::PermissionDenied);
        }

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                ContactsError::Unavailable(format!("no address book at '{}'", self.path.display()))
            }
            _ => ContactsError::Read(format!("cannot read '{}': {e}", self.path.display())),
        })?;

        let contacts = AddressBook::parse(bytes.as_slice(), projection)
            .map_err(|e| ContactsError::Read(e.to_string()))?;
        debug!(path = %self.path.display(), count = contacts.len(), "address book read");
        Ok(contacts)
    }
}
