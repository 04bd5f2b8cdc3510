//! Session provider: the single writer of the session cell.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once by `components::auth_provider::AuthProvider`. It issues one
//! session check and holds one change subscription for its lifetime; guards
//! reach the result through `use_session`.
//!
//! CONCURRENCY
//! ===========
//! The check continuation and the change callback may land in any order.
//! Each applies one whole-value update to the cell, so the last writer wins
//! for `user`. Both consult the `alive` flag first; after `teardown` neither
//! writes, which also covers a check that resolves late.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use super::session::{AuthState, Session};
use crate::config::ConfigError;
use crate::net::identity::{IdentityBackend, Subscription};
use crate::net::types::SessionRecord;

/// Storage the provider writes the session into.
pub trait SessionSlot: Clone + Send + Sync + 'static {
    fn replace(&self, session: Session);
    fn update_session(&self, apply: impl FnOnce(&mut Session));
}

impl SessionSlot for RwSignal<Session> {
    fn replace(&self, session: Session) {
        let _ = self.try_set(session);
    }

    fn update_session(&self, apply: impl FnOnce(&mut Session)) {
        let _ = self.try_update(apply);
    }
}

/// Owns the session lifecycle for one mount.
pub struct SessionProvider {
    alive: Arc<AtomicBool>,
    subscription: Subscription,
}

impl SessionProvider {
    /// Reset `slot` to pending, subscribe to changes, and return the
    /// provider plus the initial session check for the caller to spawn.
    pub fn mount<S: SessionSlot>(backend: &dyn IdentityBackend, slot: S) -> (Self, LocalBoxFuture<'static, ()>) {
        slot.replace(Session::pending());
        let alive = Arc::new(AtomicBool::new(true));

        let subscription = {
            let slot = slot.clone();
            let alive = alive.clone();
            backend.on_session_change(Arc::new(move |record: Option<SessionRecord>| {
                if !alive.load(Ordering::Acquire) {
                    log::debug!("session change after teardown ignored");
                    return;
                }
                log::debug!("session change applied: signed_in={}", record.is_some());
                slot.update_session(|session| session.apply_change(record));
            }))
        };

        let check = backend.current_session();
        let task = {
            let alive = alive.clone();
            async move {
                let outcome = check.await;
                if !alive.load(Ordering::Acquire) {
                    log::debug!("session check resolved after teardown; dropped");
                    return;
                }
                match &outcome {
                    Ok(Some(record)) => log::info!("session check: signed in as user {}", record.user.id),
                    Ok(None) => log::info!("session check: no active session"),
                    Err(e) => log::warn!("session check failed [{}]: {e}", e.error_code()),
                }
                slot.update_session(|session| session.resolve_check(outcome));
            }
            .boxed_local()
        };

        (Self { alive, subscription }, task)
    }

    /// Release the subscription and stop all further writes.
    pub fn teardown(&self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            log::debug!("session provider torn down");
        }
        self.subscription.unsubscribe();
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// CONSUMER HOOK
// =============================================================================

/// Reactive auth view for the nearest `AuthProvider`.
///
/// # Errors
///
/// Returns `ConfigError::MissingProvider` when no provider is in scope.
pub fn try_use_session() -> Result<Signal<AuthState>, ConfigError> {
    let session = use_context::<ReadSignal<Session>>().ok_or(ConfigError::MissingProvider)?;
    Ok(Signal::derive(move || session.with(|s| AuthState::from(s))))
}

/// Reactive auth view for the nearest `AuthProvider`.
///
/// # Panics
///
/// Panics when called outside an `AuthProvider`; that is a wiring bug.
pub fn use_session() -> Signal<AuthState> {
    match try_use_session() {
        Ok(state) => state,
        Err(e) => panic!("{e}"),
    }
}
