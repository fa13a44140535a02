//! App-wide yewdux store and session reducers.
//!
//! # Design
//! - One owned session slice shared across screens; no ambient globals.
//! - Reducers are free functions over the slice so transitions are
//!   testable without a component tree.
//! - The slice mirrors the stored token for fast header access; durable
//!   storage writes stay with the caller.

use crate::core::session::{Identity, Restored, SessionPhase};
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Session lifecycle and identity state.
    pub session: SessionSlice,
}

/// Shared session state for the UI.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SessionSlice {
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Token mirrored in memory while held.
    pub token: Option<String>,
    /// Identity decoded from the held token.
    pub identity: Option<Identity>,
    /// Last login/register failure, surfaced inline on the auth screens.
    pub error: Option<String>,
}

impl SessionSlice {
    /// Whether a token is currently held.
    ///
    /// True regardless of server-side expiry, which is only discovered via
    /// a 401 on a later request.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Apply the startup restoration outcome to the slice.
///
/// The caller is responsible for clearing durable storage when the outcome
/// was [`Restored::Corrupt`].
pub fn apply_restored(slice: &mut SessionSlice, restored: Restored) {
    match restored {
        Restored::Missing | Restored::Corrupt => {
            slice.phase = SessionPhase::Unauthenticated;
            slice.token = None;
            slice.identity = None;
        }
        Restored::Active { token, identity } => {
            slice.phase = SessionPhase::Authenticated;
            slice.token = Some(token);
            slice.identity = Some(identity);
        }
    }
    slice.error = None;
}

/// Enter the transient state while a login/register request is in flight.
pub fn begin_auth(slice: &mut SessionSlice) {
    slice.phase = SessionPhase::Authenticating;
    slice.error = None;
}

/// Complete a successful login or registration.
pub fn complete_auth(slice: &mut SessionSlice, token: String, identity: Identity) {
    slice.phase = SessionPhase::Authenticated;
    slice.token = Some(token);
    slice.identity = Some(identity);
    slice.error = None;
}

/// Record a failed login or registration; the credentials were rejected or
/// the request never completed, so no token is held.
pub fn fail_auth(slice: &mut SessionSlice, message: String) {
    slice.phase = SessionPhase::Unauthenticated;
    slice.token = None;
    slice.identity = None;
    slice.error = Some(message);
}

/// Drop the session. Safe to call repeatedly; logout is idempotent.
pub fn clear_session(slice: &mut SessionSlice) {
    slice.phase = SessionPhase::Unauthenticated;
    slice.token = None;
    slice.identity = None;
    slice.error = None;
}

#[cfg(test)]
mod tests {
    use super::{
        SessionSlice, apply_restored, begin_auth, clear_session, complete_auth, fail_auth,
    };
    use crate::core::session::{Identity, Restored, SessionPhase};

    fn identity() -> Identity {
        Identity {
            id: 7,
            email: "a@b.com".to_string(),
            name: None,
        }
    }

    #[test]
    fn restoration_outcomes_map_to_phases() {
        let mut slice = SessionSlice::default();
        assert_eq!(slice.phase, SessionPhase::Initializing);

        apply_restored(&mut slice, Restored::Missing);
        assert_eq!(slice.phase, SessionPhase::Unauthenticated);
        assert!(!slice.is_authenticated());

        apply_restored(
            &mut slice,
            Restored::Active {
                token: "t".to_string(),
                identity: identity(),
            },
        );
        assert_eq!(slice.phase, SessionPhase::Authenticated);
        assert!(slice.is_authenticated());
        assert_eq!(slice.identity.as_ref().map(|who| who.id), Some(7));

        apply_restored(&mut slice, Restored::Corrupt);
        assert_eq!(slice.phase, SessionPhase::Unauthenticated);
        assert_eq!(slice.token, None);
    }

    #[test]
    fn login_flow_transitions_through_authenticating() {
        let mut slice = SessionSlice::default();
        begin_auth(&mut slice);
        assert_eq!(slice.phase, SessionPhase::Authenticating);

        complete_auth(&mut slice, "tok".to_string(), identity());
        assert_eq!(slice.phase, SessionPhase::Authenticated);
        assert_eq!(slice.token.as_deref(), Some("tok"));
        assert_eq!(
            slice.identity,
            Some(Identity {
                id: 7,
                email: "a@b.com".to_string(),
                name: None,
            })
        );
    }

    #[test]
    fn failed_auth_surfaces_message_and_holds_no_token() {
        let mut slice = SessionSlice::default();
        begin_auth(&mut slice);
        fail_auth(&mut slice, "Invalid credentials".to_string());
        assert_eq!(slice.phase, SessionPhase::Unauthenticated);
        assert_eq!(slice.error.as_deref(), Some("Invalid credentials"));
        assert!(!slice.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let mut slice = SessionSlice::default();
        complete_auth(&mut slice, "tok".to_string(), identity());

        clear_session(&mut slice);
        let after_first = slice.clone();
        clear_session(&mut slice);
        assert_eq!(slice, after_first);
        assert_eq!(slice.phase, SessionPhase::Unauthenticated);
        assert_eq!(slice.token, None);
        assert_eq!(slice.identity, None);
    }
}
