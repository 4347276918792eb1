//! Microphone permission gate.
//!
//! Queries the platform permission prompt at most once per process lifetime
//! and caches the answer. The gate fails closed: a query error or an
//! unresolved prompt both read as `Denied`.

use crate::platform::{PermissionClient, PermissionState};
use tracing::{error, info, warn};

/// Read-only permission gate consulted by the recording control.
pub struct PermissionGate {
    client: Box<dyn PermissionClient>,
    cached: Option<PermissionState>,
}

impl PermissionGate {
    /// Create a gate over the given platform client. No query is made yet.
    pub fn new(client: Box<dyn PermissionClient>) -> Self {
        Self {
            client,
            cached: None,
        }
    }

    /// Resolve the permission state, prompting the platform at most once.
    ///
    /// Subsequent calls return the cached result without re-prompting. After
    /// this returns, the state is never `Undetermined`.
    pub fn request(&mut self) -> PermissionState {
        if let Some(state) = self.cached {
            return state;
        }

        let state = match self.client.request_permission() {
            Ok(PermissionState::Undetermined) => {
                warn!("Permission prompt resolved undetermined, treating as denied");
                PermissionState::Denied
            }
            Ok(state) => {
                info!("Microphone permission: {}", state);
                state
            }
            Err(e) => {
                error!("Permission query failed: {}", e);
                PermissionState::Denied
            }
        };

        self.cached = Some(state);
        state
    }

    /// The cached state, `Undetermined` until [`request`](Self::request) has
    /// resolved.
    pub fn state(&self) -> PermissionState {
        self.cached.unwrap_or_default()
    }

    /// Check if recording is allowed.
    pub fn is_granted(&self) -> bool {
        self.state().is_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePermission;

    #[test]
    fn test_gate_caches_granted_answer() {
        let fake = FakePermission::granted();
        let calls = fake.calls();
        let mut gate = PermissionGate::new(Box::new(fake));

        assert_eq!(gate.request(), PermissionState::Granted);
        assert_eq!(gate.request(), PermissionState::Granted);
        assert_eq!(gate.request(), PermissionState::Granted);

        // The platform prompt fired exactly once
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert!(gate.is_granted());
    }

    #[test]
    fn test_gate_fails_closed_on_query_error() {
        let mut gate = PermissionGate::new(Box::new(FakePermission::failing()));
        assert_eq!(gate.request(), PermissionState::Denied);
        assert!(!gate.is_granted());
    }

    #[test]
    fn test_gate_coerces_undetermined_to_denied() {
        let mut gate = PermissionGate::new(Box::new(FakePermission::undetermined()));
        assert_eq!(gate.request(), PermissionState::Denied);
    }

    #[test]
    fn test_state_before_request_is_undetermined() {
        let gate = PermissionGate::new(Box::new(FakePermission::granted()));
        assert!(gate.state().is_undetermined());
        assert!(!gate.is_granted());
    }
}
