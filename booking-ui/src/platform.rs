use async_trait::async_trait;
use booking_core::{DevicePlatform, PermissionStatus, PlatformError};
use tracing::debug;

/// Terminal stand-in for the device shell.
///
/// With `native` off it behaves like a browser build: no splash to hide,
/// no notifications and no contacts.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePlatform {
    native: bool,
}

impl ConsolePlatform {
    pub fn new(native: bool) -> Self {
        Self { native }
    }
}

#[async_trait]
impl DevicePlatform for ConsolePlatform {
    fn is_native(&self) -> bool {
        self.native
    }

    async fn hide_splash(&self) -> Result<(), PlatformError> {
        if !self.native {
            return Err(PlatformError::Unsupported);
        }
        debug!("splash hidden");
        Ok(())
    }

    async fn request_notification_permission(&self) -> Result<PermissionStatus, PlatformError> {
        if !self.native {
            return Err(PlatformError::Unsupported);
        }
        Ok(PermissionStatus::Granted)
    }
}
