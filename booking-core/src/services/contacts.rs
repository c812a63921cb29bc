use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Contact, ContactProjection, ParseChoiceError, RawContact, project_contacts};

/// Answer from a device permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Not decided yet; asking will show the prompt.
    #[default]
    Prompt,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl FromStr for PermissionStatus {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(PermissionStatus::Granted),
            "denied" => Ok(PermissionStatus::Denied),
            "prompt" => Ok(PermissionStatus::Prompt),
            _ => Err(ParseChoiceError::new("permission", s)),
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Prompt => "prompt",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactsError {
    #[error("Contacts permission denied")]
    PermissionDenied,

    #[error("Contacts unavailable: {0}")]
    Unavailable(String),

    #[error("Contacts read failed: {0}")]
    Read(String),
}

/// Device address book.
#[async_trait]
pub trait ContactsProvider: Send + Sync {
    async fn check_permissions(&self) -> Result<PermissionStatus, ContactsError>;

    async fn request_permissions(&self) -> Result<PermissionStatus, ContactsError>;

    async fn get_contacts(
        &self,
        projection: ContactProjection,
    ) -> Result<Vec<RawContact>, ContactsError>;
}

async fn fetch_projected(provider: &dyn ContactsProvider) -> Result<Vec<Contact>, ContactsError> {
    let raw = provider.get_contacts(ContactProjection::default()).await?;
    Ok(project_contacts(&raw))
}

async fn try_sync(provider: &dyn ContactsProvider) -> Result<Option<Vec<Contact>>, ContactsError> {
    let status = provider.request_permissions().await?;
    if !status.is_granted() {
        debug!(%status, "contacts permission not granted");
        return Ok(None);
    }
    fetch_projected(provider).await.map(Some)
}

async fn try_retry(provider: &dyn ContactsProvider) -> Result<Option<Vec<Contact>>, ContactsError> {
    let mut status = provider.check_permissions().await?;
    if !status.is_granted() {
        status = provider.request_permissions().await?;
    }
    if !status.is_granted() {
        debug!(%status, "contacts permission not granted on retry");
        return Ok(None);
    }
    fetch_projected(provider).await.map(Some)
}

/// Best-effort sync run when a branch is picked: ask for permission and,
/// if granted, read the address book.
///
/// `Some` holds whatever the address book returned, possibly nothing.
/// `None` means the sync degraded (denied or provider error, logged here).
pub async fn sync_contacts(provider: &dyn ContactsProvider) -> Option<Vec<Contact>> {
    try_sync(provider).await.unwrap_or_else(|error| {
        warn!(%error, "contact sync skipped");
        None
    })
}

/// Second attempt made at submit time when the cache is still empty.
///
/// Checks the current permission first and only prompts if it is not
/// already granted. Same result shape as [`sync_contacts`].
pub async fn retry_contacts(provider: &dyn ContactsProvider) -> Option<Vec<Contact>> {
    try_retry(provider).await.unwrap_or_else(|error| {
        warn!(%error, "contact retry skipped");
        None
    })
}
