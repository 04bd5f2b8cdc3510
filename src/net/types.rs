//! Identity DTOs and backend failure types shared by the session core.
//!
//! DESIGN
//! ======
//! `SessionRecord` is what the identity backend hands back; the session core
//! only ever keeps the `User` half of it. Roles stay open-ended strings on the
//! wire and are classified into `Role` on the way in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Failures reported by the identity backend.
///
/// These are recorded on the session rather than propagated to guards; a
/// failed session check reads as "nobody is signed in".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The HTTP request never produced a response.
    #[error("identity request failed: {0}")]
    Request(String),

    /// The identity service answered with a non-success status.
    #[error("identity service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("identity response parse failed: {0}")]
    Parse(String),

    /// No identity service is reachable from this build or configuration.
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

impl IdentityError {
    /// Stable machine-readable code for logs and UI messages.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_IDENTITY_REQUEST",
            Self::Status { .. } => "E_IDENTITY_STATUS",
            Self::Parse(_) => "E_IDENTITY_PARSE",
            Self::Unavailable(_) => "E_IDENTITY_UNAVAILABLE",
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Status { status: 400 | 401, .. } => "Invalid email or password.".to_owned(),
            Self::Unavailable(_) => "Sign-in is not available right now.".to_owned(),
            _ if self.retryable() => "Could not reach the sign-in service. Try again in a moment.".to_owned(),
            _ => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

// =============================================================================
// ROLES
// =============================================================================

/// Role attached to a portal user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Employee,
    Client,
    Marketing,
    Hr,
    Finance,
    /// Any role name the portal has no dedicated section for.
    Other(String),
}

/// Role name assigned when the profile row carries none.
pub const UNKNOWN_ROLE: &str = "unknown";

impl Role {
    /// Classify a role name as stored in the `roles` table.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "employee" => Self::Employee,
            "client" => Self::Client,
            "marketing" => Self::Marketing,
            "hr" => Self::Hr,
            "finance" => Self::Finance,
            "" => Self::Other(UNKNOWN_ROLE.to_owned()),
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Client => "client",
            Self::Marketing => "marketing",
            Self::Hr => "hr",
            Self::Finance => "finance",
            Self::Other(name) => name,
        }
    }

    /// Landing page for users holding this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Hr => "/dashboard/hr",
            Self::Finance => "/dashboard/finance",
            Self::Client => "/dashboard/clients",
            Self::Employee => "/dashboard/tasks",
            Self::Marketing => "/dashboard/reports",
            Self::Admin | Self::Other(_) => "/dashboard",
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// A signed-in portal user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row id in the portal `users` table.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: String,
    /// Role used for section gating.
    pub role: Role,
}

/// The identity backend's view of a live session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    /// Bearer token for the session.
    pub access_token: String,
    /// Portal user resolved for the session.
    pub user: User,
}
