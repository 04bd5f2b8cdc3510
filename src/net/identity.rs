//! Identity backend seam consumed by the session provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider is the only caller of this trait. Guards and pages never talk
//! to the backend for session state; they read the provider's session cell.
//!
//! DESIGN
//! ======
//! Futures are `LocalBoxFuture` because browser HTTP futures are `!Send`.
//! Callbacks and subscriptions are `Send + Sync` so they can live inside
//! Leptos cleanup closures and reactive contexts.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::LocalBoxFuture;

use super::types::{IdentityError, SessionRecord};

/// Listener invoked with the new session (or `None` after sign-out).
pub type SessionCallback = Arc<dyn Fn(Option<SessionRecord>) + Send + Sync>;

/// Result of a one-shot session check.
pub type SessionCheck = Result<Option<SessionRecord>, IdentityError>;

/// External identity service as seen by the session provider.
pub trait IdentityBackend: Send + Sync {
    /// Ask the backend for the current session, once.
    fn current_session(&self) -> LocalBoxFuture<'static, SessionCheck>;

    /// Register a durable listener for session changes.
    fn on_session_change(&self, callback: SessionCallback) -> Subscription;
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for a registered session listener.
///
/// `unsubscribe` runs the release hook at most once; later calls are no-ops.
/// Dropping the handle unsubscribes.
pub struct Subscription {
    active: AtomicBool,
    release: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { active: AtomicBool::new(true), release: Mutex::new(Some(Box::new(release))) }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        let release = match self.release.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(release) = release {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

/// Fan-out registry backends use to implement `on_session_change`.
#[derive(Clone, Default)]
pub struct SessionListeners {
    inner: Arc<ListenersInner>,
}

#[derive(Default)]
struct ListenersInner {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, SessionCallback)>>,
}

impl SessionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: SessionCallback) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        lock_entries(&self.inner.entries).push((id, callback));

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                lock_entries(&inner.entries).retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `session` to every registered listener.
    ///
    /// Listeners are snapshotted first so a callback may unsubscribe itself.
    pub fn notify(&self, session: Option<SessionRecord>) {
        let callbacks: Vec<SessionCallback> =
            lock_entries(&self.inner.entries).iter().map(|(_, cb)| cb.clone()).collect();
        log::debug!("session change: notifying {} listener(s), signed_in={}", callbacks.len(), session.is_some());
        for callback in callbacks {
            callback(session.clone());
        }
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.inner.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_entries(entries: &Mutex<Vec<(u64, SessionCallback)>>) -> std::sync::MutexGuard<'_, Vec<(u64, SessionCallback)>> {
    match entries.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
