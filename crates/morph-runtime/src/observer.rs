#![forbid(unsafe_code)]

//! Snapshot subscription for rendering layers.
//!
//! The controller publishes a [`Snapshot`](crate::controller::Snapshot)
//! whenever a command or tick changes observable state. Renderers register
//! callbacks here; they receive state by reference and cannot mutate the
//! controller through it, which keeps progress ownership with the state
//! machine.

use crate::controller::Snapshot;

/// Handle for removing a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// A set of snapshot observers, notified in registration order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    subs: Vec<(SubscriptionId, Box<dyn FnMut(&Snapshot)>)>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.subs.len())
            .finish()
    }
}

impl Observers {
    /// Create an empty observer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; returns a handle for later removal.
    pub fn subscribe(&mut self, f: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subs.push((id, Box::new(f)));
        id
    }

    /// Remove a previously registered callback.
    ///
    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|(sid, _)| *sid != id);
        self.subs.len() != before
    }

    /// Deliver a snapshot to every observer.
    pub fn notify(&mut self, snapshot: &Snapshot) {
        for (_, f) in &mut self.subs {
            f(snapshot);
        }
    }

    /// Number of registered observers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Whether no observers are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
