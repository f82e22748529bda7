//! "Graph changed" observers.
//!
//! Observers run synchronously, in subscription order. A batch (opened with
//! [`Notifier::begin_batch`]) coalesces every change inside it into a single notification
//! delivered when the outermost batch closes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Payload handed to observers. `revision` increases by one per delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphChanged {
    pub revision: u64,
}

type Observer = Box<dyn FnMut(&GraphChanged)>;

#[derive(Default)]
pub struct Notifier {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    revision: u64,
    batch_depth: u32,
    pending: bool,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .field("batch_depth", &self.batch_depth)
            .field("pending", &self.pending)
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GraphChanged) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of notifications delivered so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Closes one batch level; the outermost close flushes a pending change.
    pub fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.pending {
            self.pending = false;
            self.emit();
        }
    }

    /// Record a change: delivered now, or once the current batch closes.
    pub fn changed(&mut self) {
        if self.batch_depth > 0 {
            self.pending = true;
        } else {
            self.emit();
        }
    }

    fn emit(&mut self) {
        self.revision += 1;
        let event = GraphChanged {
            revision: self.revision,
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}
