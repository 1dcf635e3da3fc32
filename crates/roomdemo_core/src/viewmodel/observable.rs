//! Latest-value holder with channel-based subscribers.
//!
//! # Invariants
//! - A new subscriber first receives the current value.
//! - Publications are delivered in publish order to every live subscriber.
//! - Subscribers whose receiver was dropped are pruned on the next publish.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared observable value.
///
/// Clones share the same underlying state.
#[derive(Debug)]
pub struct Observable<T> {
    inner: Arc<Mutex<ObservableState<T>>>,
}

#[derive(Debug)]
struct ObservableState<T> {
    value: T,
    subscribers: Vec<Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ObservableState {
                value: initial,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replaces the current value and notifies subscribers.
    pub fn publish(&self, value: T) {
        let mut state = self.lock();
        state
            .subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
        state.value = value;
    }

    /// Registers a subscriber that receives the current value, then every update.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        let mut state = self.lock();
        // Cannot fail: `rx` is still alive here.
        let _ = tx.send(state.value.clone());
        state.subscribers.push(tx);
        rx
    }

    /// Number of subscribers still attached after the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, ObservableState<T>> {
        // Only whole-value replacement happens under the lock, so the state is
        // consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
