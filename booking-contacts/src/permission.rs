use std::sync::Mutex;

use booking_core::PermissionStatus;

/// Stand-in for the operating system's contacts permission.
///
/// Starts undecided. The first `request` answers with the configured
/// decision and later checks report it; once decided, requests do not
/// prompt again.
#[derive(Debug)]
pub struct PermissionGate {
    current: Mutex<PermissionStatus>,
    decision: PermissionStatus,
}

impl PermissionGate {
    pub fn new(decision: PermissionStatus) -> Self {
        Self::with_initial(PermissionStatus::Prompt, decision)
    }

    pub fn with_initial(initial: PermissionStatus, decision: PermissionStatus) -> Self {
        Self {
            current: Mutex::new(initial),
            decision,
        }
    }

    pub fn check(&self) -> PermissionStatus {
        *self.lock()
    }

    pub fn request(&self) -> PermissionStatus {
        let mut current = self.lock();
        if *current == PermissionStatus::Prompt {
            *current = self.decision;
        }
        *current
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PermissionStatus> {
        // The guarded value is a plain enum, so a poisoned lock still holds a valid status.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
