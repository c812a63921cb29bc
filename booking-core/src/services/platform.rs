use async_trait::async_trait;
use thiserror::Error;

use super::PermissionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("not supported on this platform")]
    Unsupported,

    #[error("platform call failed: {0}")]
    Failed(String),
}

/// Native chrome around the booking flow.
///
/// Failures here never reach the user; callers log them and move on.
#[async_trait]
pub trait DevicePlatform: Send + Sync {
    /// Whether native capabilities (contacts, splash, notifications) exist.
    fn is_native(&self) -> bool;

    async fn hide_splash(&self) -> Result<(), PlatformError>;

    async fn request_notification_permission(&self) -> Result<PermissionStatus, PlatformError>;
}
