//! Identity service configuration and route constants.
//!
//! The browser build has no process environment, so values are baked in at
//! compile time (`PORTAL_IDENTITY_URL`, `PORTAL_IDENTITY_ANON_KEY`). Parsing
//! goes through a lookup function so it can be exercised without either.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Default landing view for signed-in users.
pub const LANDING_PATH: &str = "/dashboard";

pub const IDENTITY_URL_VAR: &str = "PORTAL_IDENTITY_URL";
pub const IDENTITY_ANON_KEY_VAR: &str = "PORTAL_IDENTITY_ANON_KEY";

/// Configuration problems. These are programming or deployment defects, not
/// runtime conditions a user can fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable was not set or was blank.
    #[error("missing configuration: {var} not set")]
    MissingVar { var: String },

    /// The identity URL is not an http(s) URL.
    #[error("invalid identity URL: {0}")]
    InvalidUrl(String),

    /// The session hook was called outside an `AuthProvider`.
    #[error("session state requested outside of an AuthProvider")]
    MissingProvider,
}

/// Connection settings for the hosted identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Service base URL without a trailing slash.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
}

impl IdentityConfig {
    /// Build config from the values compiled into this binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is missing or the URL is
    /// malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            IDENTITY_URL_VAR => option_env!("PORTAL_IDENTITY_URL").map(str::to_owned),
            IDENTITY_ANON_KEY_VAR => option_env!("PORTAL_IDENTITY_ANON_KEY").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Required:
    /// - `PORTAL_IDENTITY_URL`: `http://` or `https://` base URL
    /// - `PORTAL_IDENTITY_ANON_KEY`: public API key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is missing or the URL is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, IDENTITY_URL_VAR)?;
        let url = parse_url(&url)?;
        let anon_key = required(&lookup, IDENTITY_ANON_KEY_VAR)?;
        Ok(Self { url, anon_key })
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVar { var: var.to_owned() })
}

fn parse_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidUrl(format!("'{raw}' must start with http:// or https://")))?;
    if rest.is_empty() {
        return Err(ConfigError::InvalidUrl(format!("'{raw}' has no host")));
    }
    Ok(trimmed.to_owned())
}
