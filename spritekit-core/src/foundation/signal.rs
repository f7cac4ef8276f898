use std::fmt;

/// Identifier returned by [`Signal::subscribe`], used to detach the callback again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot = Box<dyn FnMut()>;

/// Single-producer, multi-subscriber notification channel.
///
/// The owner emits; subscribers register plain callbacks. Subscribing and unsubscribing are
/// idempotent and safe during teardown: unsubscribing an unknown id is a no-op.
#[derive(Default)]
pub struct Signal {
    next_id: u64,
    slots: Vec<(SubscriptionId, Slot)>,
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

impl Signal {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` to run on every [`Signal::emit`].
    pub fn subscribe(&mut self, f: impl FnMut() + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.slots.push((id, Box::new(f)));
        id
    }

    /// Detach a subscriber. Returns whether anything was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(sid, _)| *sid != id);
        before != self.slots.len()
    }

    /// Invoke every subscriber in subscription order.
    pub fn emit(&mut self) {
        for (_, slot) in &mut self.slots {
            slot();
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every subscriber.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/signal.rs"]
mod tests;
