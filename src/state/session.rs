//! Session cell owned by the provider, and the read-only view guards use.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` is only ever written by `SessionProvider`, one whole-value
//! update per event. Everything else reads `AuthState`, which is recomputed
//! from the session on each read.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::identity::SessionCheck;
use crate::net::types::{IdentityError, Role, SessionRecord, User};

/// Authentication state as held by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    /// True from provider mount until the initial session check resolves.
    pub loading: bool,
    /// Failure from the initial session check, if it failed.
    pub error: Option<IdentityError>,
}

impl Default for Session {
    fn default() -> Self {
        Self::pending()
    }
}

impl Session {
    /// Freshly mounted: nobody known yet, check outstanding.
    pub fn pending() -> Self {
        Self { user: None, loading: true, error: None }
    }

    /// Apply the outcome of the initial session check.
    ///
    /// A failure records the error and leaves `user` as it is.
    pub fn resolve_check(&mut self, outcome: SessionCheck) {
        match outcome {
            Ok(record) => self.user = record.map(|r| r.user),
            Err(err) => self.error = Some(err),
        }
        self.loading = false;
    }

    /// Apply a change notification. Only `user` changes.
    pub fn apply_change(&mut self, record: Option<SessionRecord>) {
        self.user = record.map(|r| r.user);
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::from(self)
    }
}

/// Derived, read-only view of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<IdentityError>,
}

impl From<&Session> for AuthState {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            is_authenticated: session.user.is_some(),
            loading: session.loading,
            error: session.error.clone(),
        }
    }
}

impl AuthState {
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.role() == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    pub fn is_employee(&self) -> bool {
        self.has_role(&Role::Employee)
    }

    pub fn is_client(&self) -> bool {
        self.has_role(&Role::Client)
    }

    pub fn is_marketing(&self) -> bool {
        self.has_role(&Role::Marketing)
    }

    pub fn is_hr(&self) -> bool {
        self.has_role(&Role::Hr)
    }

    pub fn is_finance(&self) -> bool {
        self.has_role(&Role::Finance)
    }
}
