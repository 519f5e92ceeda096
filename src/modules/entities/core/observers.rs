// Observer list shared by every observable model (entities, collections, period lists).
//
// Responsibilities
// - Register callbacks and hand out a Subscription that can remove them again.
// - Call every registered callback on notify, outside the lock, so a callback may unsubscribe.
//
// Notes
// - Callbacks take no arguments. Subscribers pull the new state from the model themselves.

use std::sync::{Arc, Mutex, Weak};

pub type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_token: u64,
    callbacks: Vec<(u64, Callback)>,
}

#[derive(Clone, Default)]
pub struct Observers {
    registry: Arc<Mutex<Registry>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback`, calls it once right away and returns the handle that removes it.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let callback: Callback = Arc::new(callback);
        let token = {
            let mut registry = lock(&self.registry);
            let token = registry.next_token;
            registry.next_token += 1;
            registry.callbacks.push((token, callback.clone()));
            token
        };
        callback();
        Subscription {
            registry: Arc::downgrade(&self.registry),
            token,
        }
    }

    pub fn notify(&self) {
        let callbacks: Vec<Callback> = lock(&self.registry)
            .callbacks
            .iter()
            .map(|(_, c)| c.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.registry).callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panicking callback poisons the lock; the registry itself is still consistent.
fn lock(registry: &Mutex<Registry>) -> std::sync::MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Removal token returned by `subscribe`. Dropping it keeps the callback registered.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    token: u64,
}

impl Subscription {
    /// Deregisters the callback. Calling it again, or after the model is gone, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).callbacks.retain(|(t, _)| *t != self.token);
        }
    }
}
