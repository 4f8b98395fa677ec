//! Observable state container for the report document.
//!
//! The store holds one [`Report`] and broadcasts every mutation to all
//! current observers as a whole-document snapshot; there are no partial or
//! diff updates. Each store instance has an explicit lifetime, so sessions
//! and tests run in isolation instead of sharing an ambient singleton.
//!
//! Mutations are synchronous and never suspend: `set` replaces the document
//! and notifies every observer in registration order before it returns.
//! Observers must not call back into the store from inside their callback.
//! There is no persistence; dropping the store loses all state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::report::Report;

type Observer = Box<dyn Fn(&Report) + Send + Sync>;

struct StoreInner {
    report: Mutex<Report>,
    // Registration order is notification order.
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer_id: AtomicU64,
}

/// Observable holder of a single in-memory [`Report`].
#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<StoreInner>,
}

impl ReportStore {
    /// New store holding the default untitled, empty report.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                report: Mutex::new(Report::default()),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(1),
            }),
        }
    }

    /// Snapshot of the current document.
    pub fn get(&self) -> Report {
        self.inner
            .report
            .lock()
            .expect("report lock poisoned")
            .clone()
    }

    /// Registers an observer. It receives the current report immediately,
    /// then the full report again after every subsequent mutation, until the
    /// returned [`Subscription`] is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, observer: impl Fn(&Report) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.get();
        observer(&snapshot);
        self.inner
            .observers
            .lock()
            .expect("observer lock poisoned")
            .push((id, Box::new(observer)));
        debug!(observer_id = id, "Observer subscribed");
        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Atomically replaces the entire document and synchronously notifies
    /// all observers, in registration order, before returning.
    pub fn set(&self, report: Report) {
        {
            let mut current = self.inner.report.lock().expect("report lock poisoned");
            *current = report;
        }
        self.notify();
    }

    /// Reads the current document, applies `f`, and installs the result via
    /// the same replace-and-notify path as [`set`](Self::set).
    pub fn update(&self, f: impl FnOnce(Report) -> Report) {
        let next = f(self.get());
        self.set(next);
    }

    fn notify(&self) {
        let snapshot = self.get();
        let observers = self.inner.observers.lock().expect("observer lock poisoned");
        debug!(
            observers = observers.len(),
            blocks = snapshot.blocks.len(),
            "Broadcasting report snapshot"
        );
        for (_, observer) in observers.iter() {
            observer(&snapshot);
        }
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle tying an observer's registration to a scope; dropping it (or
/// calling [`unsubscribe`](Self::unsubscribe)) stops further notifications.
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    /// Explicitly removes the observer. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            let mut observers = inner.observers.lock().expect("observer lock poisoned");
            observers.retain(|(id, _)| *id != self.id);
            debug!(observer_id = self.id, "Observer unsubscribed");
        }
    }
}
