use super::*;
use crate::net::types::{Role, User};
use std::sync::atomic::AtomicUsize;

// =============================================================
// Helpers
// =============================================================

fn record(id: i64) -> SessionRecord {
    SessionRecord {
        access_token: format!("token-{id}"),
        user: User { id, name: "Ada".to_owned(), email: "ada@example.com".to_owned(), role: Role::Employee },
    }
}

fn counting_callback(hits: &Arc<AtomicUsize>) -> SessionCallback {
    let hits = hits.clone();
    Arc::new(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    })
}

// =============================================================
// Subscription
// =============================================================

#[test]
fn unsubscribe_runs_release_once() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    let sub = Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(sub.is_active());
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_after_unsubscribe_does_not_release_again() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    let sub = Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    sub.unsubscribe();
    drop(sub);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_releases_active_subscription() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    drop(Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

// =============================================================
// SessionListeners
// =============================================================

#[test]
fn notify_reaches_every_listener() {
    let listeners = SessionListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = listeners.subscribe(counting_callback(&hits));
    let _b = listeners.subscribe(counting_callback(&hits));

    listeners.notify(Some(record(1)));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribed_listener_is_not_notified() {
    let listeners = SessionListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = listeners.subscribe(counting_callback(&hits));
    let _other = listeners.subscribe(counting_callback(&hits));

    sub.unsubscribe();
    sub.unsubscribe();
    assert_eq!(listeners.len(), 1);

    listeners.notify(None);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_receives_delivered_session() {
    let listeners = SessionListeners::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _sub = listeners.subscribe(Arc::new(move |session: Option<SessionRecord>| {
        sink.lock().unwrap().push(session.map(|s| s.user.id));
    }));

    listeners.notify(Some(record(3)));
    listeners.notify(None);
    assert_eq!(*seen.lock().unwrap(), vec![Some(3), None]);
}

#[test]
fn subscription_outliving_registry_unsubscribes_cleanly() {
    let listeners = SessionListeners::new();
    let sub = listeners.subscribe(Arc::new(|_| {}));
    drop(listeners);
    sub.unsubscribe();
    assert!(!sub.is_active());
}
