//! Route guard state machine
//!
//! Every protected request starts with the session state `Unknown` while the
//! bearer token is being resolved. Resolution moves the machine to
//! `Authenticated` with a principal or to `Unauthenticated`, and an
//! authenticated session drops to `Unauthenticated` on sign-out or expiry.
//! `Unauthenticated` is terminal until a new login re-enters at `Unknown`.

use uuid::Uuid;

/// The authenticated identity behind a session
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
}

/// Session state as seen by the route guard
#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    /// Session check in flight
    Unknown,
    /// Session resolved to a principal
    Authenticated(Principal),
    /// No session; protected views must redirect to login
    Unauthenticated,
}

impl GuardState {
    /// Apply the outcome of a session check
    ///
    /// Only an in-flight check can resolve; resolving an already settled
    /// state leaves it unchanged.
    pub fn resolve(self, principal: Option<Principal>) -> GuardState {
        match (self, principal) {
            (GuardState::Unknown, Some(principal)) => GuardState::Authenticated(principal),
            (GuardState::Unknown, None) => GuardState::Unauthenticated,
            (state, _) => state,
        }
    }

    /// Explicit sign-out or external session expiry
    pub fn sign_out(self) -> GuardState {
        match self {
            GuardState::Authenticated(_) => GuardState::Unauthenticated,
            state => state,
        }
    }

    /// A new login attempt re-enters the machine at `Unknown`
    pub fn renew(self) -> GuardState {
        GuardState::Unknown
    }

    /// The principal, when the session is authenticated
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            GuardState::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}
