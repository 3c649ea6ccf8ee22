//! Process-local state cell with explicit read/update/subscribe.
//!
//! Each write replaces the held `Arc<T>`, so a snapshot obtained from
//! [`Store::get`] never changes underneath its holder.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&Arc<T>)>;

pub struct Store<T> {
    current: Arc<T>,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(initial),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.current)
    }

    /// Replace the state and notify subscribers in registration order.
    pub fn set(&mut self, value: T) -> Arc<T> {
        self.current = Arc::new(value);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.current);
        }
        Arc::clone(&self.current)
    }

    /// Derive the next state from the current one.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> Arc<T> {
        let next = f(&self.current);
        self.set(next)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
