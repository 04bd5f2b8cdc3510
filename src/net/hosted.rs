//! Hosted identity service client (GoTrue-style auth + PostgREST profile).
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, session token kept
//! in `localStorage` the way the service's own browser client keeps it.
//! Server-side (SSR): stubs returning `IdentityError::Unavailable`, since a
//! browser session only exists in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, IdentityError>`. A 401/403 on the session
//! check is not an error: the stored refresh token is traded for a new pair,
//! and only when that is refused is the token dropped and "no session"
//! reported.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "hosted_test.rs"]
mod hosted_test;

use std::sync::Arc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
#[cfg(any(test, feature = "hydrate"))]
use serde::{Deserialize, Serialize};

use super::identity::{IdentityBackend, SessionCallback, SessionCheck, SessionListeners, Subscription};
use super::types::{IdentityError, User};
#[cfg(any(test, feature = "hydrate"))]
use super::types::{Role, UNKNOWN_ROLE};
#[cfg(feature = "hydrate")]
use super::types::SessionRecord;
use crate::config::IdentityConfig;

#[cfg(any(test, feature = "hydrate"))]
const USER_PATH: &str = "/auth/v1/user";
#[cfg(any(test, feature = "hydrate"))]
const TOKEN_PATH: &str = "/auth/v1/token?grant_type=password";
#[cfg(any(test, feature = "hydrate"))]
const REFRESH_PATH: &str = "/auth/v1/token?grant_type=refresh_token";
#[cfg(any(test, feature = "hydrate"))]
const VERIFY_PATH: &str = "/auth/v1/verify";
#[cfg(any(test, feature = "hydrate"))]
const LOGOUT_PATH: &str = "/auth/v1/logout";
/// Role given to self-service sign-ups.
#[cfg(any(test, feature = "hydrate"))]
const DEFAULT_SIGNUP_ROLE: &str = "employee";
#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "portal.auth.session";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: AuthUser,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(default)]
    email: Option<String>,
}

/// Row from `users` joined with its role.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ProfileRow {
    user_id: i64,
    name: String,
    email: String,
    #[serde(default)]
    roles: Option<RoleRef>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RoleRef {
    #[serde(default)]
    role_name: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RoleIdRow {
    role_id: i64,
}

/// What is persisted between page loads.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Error envelopes differ between the auth and REST halves of the service.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
impl TokenResponse {
    fn stored(&self) -> StoredSession {
        StoredSession { access_token: self.access_token.clone(), refresh_token: self.refresh_token.clone() }
    }
}

#[cfg(any(test, feature = "hydrate"))]
impl ProfileRow {
    fn into_user(self) -> User {
        let role = self.roles.and_then(|r| r.role_name).unwrap_or_else(|| UNKNOWN_ROLE.to_owned());
        User { id: self.user_id, name: self.name, email: self.email, role: Role::from_name(&role) }
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

/// Profile lookup by (already URI-encoded) email.
#[cfg(any(test, feature = "hydrate"))]
fn profile_path(encoded_email: &str) -> String {
    format!("/rest/v1/users?select=user_id,name,email,roles(role_name)&email=eq.{encoded_email}")
}

#[cfg(any(test, feature = "hydrate"))]
fn role_id_path(role_name: &str) -> String {
    format!("/rest/v1/roles?select=role_id&role_name=eq.{role_name}")
}

/// Sign-up with the (already URI-encoded) page the confirmation email links to.
#[cfg(any(test, feature = "hydrate"))]
fn signup_path(encoded_redirect: &str) -> String {
    format!("/auth/v1/signup?redirect_to={encoded_redirect}")
}

#[cfg(any(test, feature = "hydrate"))]
fn recover_path(encoded_redirect: &str) -> String {
    format!("/auth/v1/recover?redirect_to={encoded_redirect}")
}

/// The stored token is no longer accepted.
#[cfg(any(test, feature = "hydrate"))]
fn session_expired(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// The refresh token was refused; the stored session cannot be revived.
#[cfg(any(test, feature = "hydrate"))]
fn refresh_rejected(status: u16) -> bool {
    matches!(status, 400 | 401 | 403)
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> IdentityError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.error_description.or(parsed.msg).or(parsed.message).unwrap_or_default();
    IdentityError::Status { status, message }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_stored(raw: &str) -> Option<StoredSession> {
    serde_json::from_str::<StoredSession>(raw).ok().filter(|s| !s.access_token.is_empty())
}

#[cfg(not(feature = "hydrate"))]
fn unavailable_on_server() -> IdentityError {
    IdentityError::Unavailable("not available on server".to_owned())
}

// =============================================================================
// CLIENT
// =============================================================================

/// Identity backend talking to the hosted auth service.
#[derive(Clone)]
pub struct HostedIdentity {
    inner: Arc<HostedInner>,
}

struct HostedInner {
    config: Option<IdentityConfig>,
    listeners: SessionListeners,
}

impl HostedIdentity {
    pub fn new(config: IdentityConfig) -> Self {
        Self { inner: Arc::new(HostedInner { config: Some(config), listeners: SessionListeners::new() }) }
    }

    /// A backend with no service behind it; every session check fails.
    pub fn unconfigured() -> Self {
        Self { inner: Arc::new(HostedInner { config: None, listeners: SessionListeners::new() }) }
    }

    /// Use the compiled-in configuration, degrading to `unconfigured` with a
    /// warning when it is missing or malformed.
    pub fn from_build_env() -> Self {
        match IdentityConfig::from_build_env() {
            Ok(config) => Self::new(config),
            Err(e) => {
                log::warn!("identity service not configured ({e}); sign-in disabled");
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.config.is_some()
    }

    fn config(&self) -> Result<&IdentityConfig, IdentityError> {
        self.inner
            .config
            .as_ref()
            .ok_or_else(|| IdentityError::Unavailable("identity service is not configured".to_owned()))
    }

    /// Resolve the stored token into a portal session.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the service or the profile lookup fails.
    pub async fn fetch_session(&self) -> SessionCheck {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let Some(stored) = token_store::load() else {
                return Ok(None);
            };
            let (access_token, auth_user) = match fetch_auth_user(config, &stored.access_token).await? {
                Some(auth_user) => (stored.access_token, auth_user),
                None => {
                    let refreshed = match stored.refresh_token.as_deref() {
                        Some(refresh_token) => refresh_tokens(config, refresh_token).await?,
                        None => None,
                    };
                    let Some(token) = refreshed else {
                        log::info!("stored session expired; clearing");
                        token_store::clear();
                        return Ok(None);
                    };
                    log::info!("stored session refreshed");
                    token_store::save(&token.stored());
                    (token.access_token, token.user)
                }
            };
            let email = auth_user.email.ok_or_else(|| IdentityError::Parse("session user has no email".to_owned()))?;
            let user = load_profile(config, &access_token, &email).await?;
            Ok(Some(SessionRecord { access_token, user }))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = config;
            Err(unavailable_on_server())
        }
    }

    /// Sign in with email + password and announce the new session.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Status` for rejected credentials, or another
    /// `IdentityError` when the service or profile lookup fails.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&endpoint(&config.url, TOKEN_PATH))
                .header("apikey", &config.anon_key)
                .json(&body)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            let token: TokenResponse = resp.json().await.map_err(parse_error)?;
            let user = self.establish(config, token, email).await?;
            log::info!("signed in as user {}", user.id);
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, email, password);
            Err(unavailable_on_server())
        }
    }

    /// Create an auth account and its portal `users` row.
    ///
    /// The account is not signed in; the service emails a confirmation link
    /// pointing at `redirect_to`.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if any of the three calls fails.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str, redirect_to: &str) -> Result<(), IdentityError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&endpoint(&config.url, &signup_path(&encode(redirect_to))))
                .header("apikey", &config.anon_key)
                .json(&body)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }

            let resp = authed(
                gloo_net::http::Request::get(&endpoint(&config.url, &role_id_path(DEFAULT_SIGNUP_ROLE))),
                config,
                &config.anon_key,
            )
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await
            .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            let role: RoleIdRow = resp.json().await.map_err(parse_error)?;

            let row = serde_json::json!([{
                "email": email,
                "name": name,
                "role_id": role.role_id,
                "password_hash": "managed_by_identity_service",
            }]);
            let resp = authed(gloo_net::http::Request::post(&endpoint(&config.url, "/rest/v1/users")), config, &config.anon_key)
                .header("Prefer", "return=minimal")
                .json(&row)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            log::info!("signed up new account");
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, name, email, password, redirect_to);
            Err(unavailable_on_server())
        }
    }

    /// End the session. Local state is cleared and listeners are told even
    /// when the service call fails.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the logout call fails.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        #[cfg(feature = "hydrate")]
        {
            let result = match (self.config(), token_store::load()) {
                (Ok(config), Some(stored)) => {
                    match authed(gloo_net::http::Request::post(&endpoint(&config.url, LOGOUT_PATH)), config, &stored.access_token)
                        .send()
                        .await
                    {
                        Ok(resp) if resp.ok() || session_expired(resp.status()) => Ok(()),
                        Ok(resp) => Err(status_error(resp.status(), &resp.text().await.unwrap_or_default())),
                        Err(e) => Err(request_error(e)),
                    }
                }
                _ => Ok(()),
            };
            token_store::clear();
            log::info!("signed out");
            self.inner.listeners.notify(None);
            result
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.inner.listeners.notify(None);
            Ok(())
        }
    }

    /// Ask the service to email a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the request fails.
    pub async fn request_password_reset(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "email": email });
            let resp = gloo_net::http::Request::post(&endpoint(&config.url, &recover_path(&encode(redirect_to))))
                .header("apikey", &config.anon_key)
                .json(&body)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, email, redirect_to);
            Err(unavailable_on_server())
        }
    }

    /// Set a new password for the account `access_token` belongs to, such as
    /// the short-lived token carried by a recovery link.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Status` when the token is no longer accepted,
    /// or another `IdentityError` if the request fails.
    pub async fn update_password(&self, access_token: &str, password: &str) -> Result<(), IdentityError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "password": password });
            let resp = authed(gloo_net::http::Request::put(&endpoint(&config.url, USER_PATH)), config, access_token)
                .json(&body)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, access_token, password);
            Err(unavailable_on_server())
        }
    }

    /// Confirm an email address from the token in its confirmation link.
    /// The service answers with a session, which is stored and announced.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Status` for an expired or reused link, or
    /// another `IdentityError` when the service or profile lookup fails.
    pub async fn verify_email(&self, token_hash: &str) -> Result<User, IdentityError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "type": "email", "token_hash": token_hash });
            let resp = gloo_net::http::Request::post(&endpoint(&config.url, VERIFY_PATH))
                .header("apikey", &config.anon_key)
                .json(&body)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            if !resp.ok() {
                return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
            }
            let token: TokenResponse = resp.json().await.map_err(parse_error)?;
            let user = self.establish(config, token, "").await?;
            log::info!("email verified for user {}", user.id);
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, token_hash);
            Err(unavailable_on_server())
        }
    }

    /// Load the profile behind a fresh token, persist the token and tell
    /// listeners about the new session.
    #[cfg(feature = "hydrate")]
    async fn establish(&self, config: &IdentityConfig, token: TokenResponse, email: &str) -> Result<User, IdentityError> {
        let email = token.user.email.clone().unwrap_or_else(|| email.to_owned());
        if email.is_empty() {
            return Err(IdentityError::Parse("session user has no email".to_owned()));
        }
        let user = load_profile(config, &token.access_token, &email).await?;
        token_store::save(&token.stored());
        self.inner.listeners.notify(Some(SessionRecord { access_token: token.access_token, user: user.clone() }));
        Ok(user)
    }
}

impl IdentityBackend for HostedIdentity {
    fn current_session(&self) -> LocalBoxFuture<'static, SessionCheck> {
        let this = self.clone();
        async move { this.fetch_session().await }.boxed_local()
    }

    fn on_session_change(&self, callback: SessionCallback) -> Subscription {
        self.inner.listeners.subscribe(callback)
    }
}

// =============================================================================
// BROWSER PLUMBING
// =============================================================================

#[cfg(feature = "hydrate")]
fn authed(
    builder: gloo_net::http::RequestBuilder,
    config: &IdentityConfig,
    token: &str,
) -> gloo_net::http::RequestBuilder {
    builder.header("apikey", &config.anon_key).header("Authorization", &format!("Bearer {token}"))
}

/// The auth user behind `token`, or `None` once the token is no longer accepted.
#[cfg(feature = "hydrate")]
async fn fetch_auth_user(config: &IdentityConfig, token: &str) -> Result<Option<AuthUser>, IdentityError> {
    let resp = authed(gloo_net::http::Request::get(&endpoint(&config.url, USER_PATH)), config, token)
        .send()
        .await
        .map_err(request_error)?;
    if session_expired(resp.status()) {
        log::debug!("access token rejected ({})", resp.status());
        return Ok(None);
    }
    if !resp.ok() {
        return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
    }
    resp.json().await.map(Some).map_err(parse_error)
}

/// Trade a refresh token for a new token pair, or `None` if it was refused.
#[cfg(feature = "hydrate")]
async fn refresh_tokens(config: &IdentityConfig, refresh_token: &str) -> Result<Option<TokenResponse>, IdentityError> {
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let resp = gloo_net::http::Request::post(&endpoint(&config.url, REFRESH_PATH))
        .header("apikey", &config.anon_key)
        .json(&body)
        .map_err(request_error)?
        .send()
        .await
        .map_err(request_error)?;
    if refresh_rejected(resp.status()) {
        log::debug!("refresh token rejected ({})", resp.status());
        return Ok(None);
    }
    if !resp.ok() {
        return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
    }
    resp.json().await.map(Some).map_err(parse_error)
}

#[cfg(feature = "hydrate")]
async fn load_profile(config: &IdentityConfig, token: &str, email: &str) -> Result<User, IdentityError> {
    let url = endpoint(&config.url, &profile_path(&encode(email)));
    let resp = authed(gloo_net::http::Request::get(&url), config, token)
        .header("Accept", "application/vnd.pgrst.object+json")
        .send()
        .await
        .map_err(request_error)?;
    if !resp.ok() {
        return Err(status_error(resp.status(), &resp.text().await.unwrap_or_default()));
    }
    let row: ProfileRow = resp.json().await.map_err(parse_error)?;
    Ok(row.into_user())
}

#[cfg(feature = "hydrate")]
fn encode(raw: &str) -> String {
    String::from(js_sys::encode_uri_component(raw))
}

#[cfg(feature = "hydrate")]
fn request_error(e: gloo_net::Error) -> IdentityError {
    IdentityError::Request(e.to_string())
}

#[cfg(feature = "hydrate")]
fn parse_error(e: gloo_net::Error) -> IdentityError {
    IdentityError::Parse(e.to_string())
}

#[cfg(feature = "hydrate")]
mod token_store {
    use super::{STORAGE_KEY, StoredSession, parse_stored};

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub(super) fn load() -> Option<StoredSession> {
        let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
        parse_stored(&raw)
    }

    pub(super) fn save(session: &StoredSession) {
        let Some(storage) = storage() else {
            return;
        };
        match serde_json::to_string(session) {
            Ok(raw) => {
                let _ = storage.set_item(STORAGE_KEY, &raw);
            }
            Err(e) => log::warn!("could not persist session token: {e}"),
        }
    }

    pub(super) fn clear() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
